//! The Ollama configuration record inside the application's `package.json`.
//!
//! The record lives at `config.ollama` and holds the connection defaults for
//! the local model server. [`ensure_defaults`] fills in missing fields with a
//! read-modify-write that only touches the file when something changed.

use crate::error::{LauncherError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Model the application is pinned to.
pub const DEFAULT_MODEL: &str = "llama3.2";
/// Default model server address.
pub const DEFAULT_IP: &str = "127.0.0.1";
/// Default model server port (stored as a string).
pub const DEFAULT_PORT: &str = "11434";
/// Default UI style.
pub const DEFAULT_STYLE: &str = "default";

/// Typed view of `config.ollama`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OllamaRecord {
    pub model: String,
    pub ip: String,
    /// Either a string (`"11434"`) or a number (`11434`).
    pub port: Value,
    pub style: String,
}

impl OllamaRecord {
    /// `ip:port` for display.
    pub fn address(&self) -> String {
        match &self.port {
            Value::String(s) => format!("{}:{}", self.ip, s),
            other => format!("{}:{}", self.ip, other),
        }
    }
}

/// Make sure `config.ollama` in the JSON document at `path` has its defaults.
///
/// Absent fields get their default; `model` is also overwritten when it
/// differs from [`DEFAULT_MODEL`]. Other present fields are left alone, as
/// are all unrelated keys and their order. Returns whether the file was
/// rewritten.
///
/// # Errors
///
/// - `ConfigMissing` if the file does not exist
/// - `ConfigParseError` if it is not valid JSON
/// - `ConfigInvalid` if the root, `config` or `config.ollama` is not an object
pub fn ensure_defaults(path: &Path) -> Result<bool> {
    let mut document = read_document(path)?;

    let changed = apply_defaults(&mut document).map_err(|message| LauncherError::ConfigInvalid {
        path: path.to_path_buf(),
        message,
    })?;

    if changed {
        let mut content = serde_json::to_string_pretty(&document)
            .map_err(|e| anyhow::anyhow!("failed to serialize {}: {}", path.display(), e))?;
        content.push('\n');
        fs::write(path, content)?;
        tracing::debug!("wrote Ollama defaults to {}", path.display());
    } else {
        tracing::debug!("Ollama defaults already present in {}", path.display());
    }

    Ok(changed)
}

/// Seed an empty JSON document at `path` if nothing is there yet.
///
/// Returns whether a file was created.
pub fn create_if_missing(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, "{}\n")?;
    tracing::debug!("created empty {}", path.display());
    Ok(true)
}

/// Read the typed record from `path`.
pub fn read_record(path: &Path) -> Result<OllamaRecord> {
    let document = read_document(path)?;
    let ollama = document
        .get("config")
        .and_then(|c| c.get("ollama"))
        .cloned()
        .ok_or_else(|| LauncherError::ConfigInvalid {
            path: path.to_path_buf(),
            message: "missing config.ollama".to_string(),
        })?;

    serde_json::from_value(ollama).map_err(|e| LauncherError::ConfigInvalid {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LauncherError::ConfigMissing {
                path: path.to_path_buf(),
            }
        } else {
            LauncherError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| LauncherError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply the defaults in memory. Returns whether anything changed, or a
/// message describing why the document cannot hold the record.
fn apply_defaults(document: &mut Value) -> std::result::Result<bool, String> {
    let root = document
        .as_object_mut()
        .ok_or_else(|| "document root is not an object".to_string())?;

    let mut changed = false;
    let config = child_object(root, "config", &mut changed)?;
    let ollama = child_object(config, "ollama", &mut changed)?;

    if ollama.get("model").and_then(Value::as_str) != Some(DEFAULT_MODEL) {
        ollama.insert("model".to_string(), Value::from(DEFAULT_MODEL));
        changed = true;
    }

    for (key, default) in [("ip", DEFAULT_IP), ("port", DEFAULT_PORT), ("style", DEFAULT_STYLE)] {
        if !ollama.contains_key(key) {
            ollama.insert(key.to_string(), Value::from(default));
            changed = true;
        }
    }

    Ok(changed)
}

fn child_object<'a>(
    parent: &'a mut Map<String, Value>,
    key: &str,
    changed: &mut bool,
) -> std::result::Result<&'a mut Map<String, Value>, String> {
    if !parent.contains_key(key) {
        parent.insert(key.to_string(), Value::Object(Map::new()));
        *changed = true;
    }
    parent
        .get_mut(key)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| format!("'{}' is not an object", key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write_json(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("package.json");
        fs::write(&path, content).unwrap();
        path
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn fills_all_defaults_into_empty_object() {
        let temp = TempDir::new().unwrap();
        let path = write_json(&temp, "{}");

        assert!(ensure_defaults(&path).unwrap());

        assert_eq!(
            read_json(&path),
            json!({"config": {"ollama": {
                "model": "llama3.2",
                "ip": "127.0.0.1",
                "port": "11434",
                "style": "default"
            }}})
        );
    }

    #[test]
    fn second_run_does_not_write() {
        let temp = TempDir::new().unwrap();
        let path = write_json(&temp, r#"{"name": "internet-server-browser"}"#);

        assert!(ensure_defaults(&path).unwrap());
        let first = fs::read_to_string(&path).unwrap();
        let modified = fs::metadata(&path).unwrap().modified().unwrap();

        assert!(!ensure_defaults(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), modified);
    }

    #[test]
    fn forces_model_but_keeps_other_values() {
        let temp = TempDir::new().unwrap();
        let path = write_json(
            &temp,
            r#"{"config": {"ollama": {"model": "mistral", "ip": "10.0.0.5", "port": 8080, "style": "dark"}}}"#,
        );

        assert!(ensure_defaults(&path).unwrap());

        let ollama = &read_json(&path)["config"]["ollama"];
        assert_eq!(ollama["model"], "llama3.2");
        assert_eq!(ollama["ip"], "10.0.0.5");
        assert_eq!(ollama["port"], 8080);
        assert_eq!(ollama["style"], "dark");
    }

    #[test]
    fn present_but_empty_values_are_kept() {
        let temp = TempDir::new().unwrap();
        let path = write_json(
            &temp,
            r#"{"config": {"ollama": {"model": "llama3.2", "ip": "", "port": null, "style": ""}}}"#,
        );

        assert!(!ensure_defaults(&path).unwrap());
        let ollama = &read_json(&path)["config"]["ollama"];
        assert_eq!(ollama["ip"], "");
        assert!(ollama["port"].is_null());
    }

    #[test]
    fn unrelated_keys_and_order_survive() {
        let temp = TempDir::new().unwrap();
        let path = write_json(
            &temp,
            r#"{"name": "isb", "version": "1.0.0", "config": {"theme": "xp"}, "main": "main.js"}"#,
        );

        ensure_defaults(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let name = content.find("\"name\"").unwrap();
        let version = content.find("\"version\"").unwrap();
        let config = content.find("\"config\"").unwrap();
        let main = content.find("\"main\"").unwrap();
        assert!(name < version && version < config && config < main);

        let doc = read_json(&path);
        assert_eq!(doc["config"]["theme"], "xp");
        assert_eq!(doc["config"]["ollama"]["model"], "llama3.2");
    }

    #[test]
    fn output_uses_two_space_indent_and_trailing_newline() {
        let temp = TempDir::new().unwrap();
        let path = write_json(&temp, "{}");

        ensure_defaults(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n  \"config\""));
        assert!(content.ends_with("}\n"));
    }

    #[test]
    fn missing_file_is_config_missing() {
        let temp = TempDir::new().unwrap();
        let err = ensure_defaults(&temp.path().join("package.json")).unwrap_err();
        assert!(matches!(err, LauncherError::ConfigMissing { .. }));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write_json(&temp, "{ not json");
        let err = ensure_defaults(&path).unwrap_err();
        assert!(matches!(err, LauncherError::ConfigParseError { .. }));
    }

    #[test]
    fn non_object_config_is_rejected_without_write() {
        let temp = TempDir::new().unwrap();
        let before = r#"{"config": "oops"}"#;
        let path = write_json(&temp, before);

        let err = ensure_defaults(&path).unwrap_err();

        assert!(matches!(err, LauncherError::ConfigInvalid { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn array_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_json(&temp, "[]");
        let err = ensure_defaults(&path).unwrap_err();
        assert!(matches!(err, LauncherError::ConfigInvalid { .. }));
    }

    #[test]
    fn create_if_missing_seeds_empty_object() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("package.json");

        assert!(create_if_missing(&path).unwrap());
        assert_eq!(read_json(&path), json!({}));
        assert!(ensure_defaults(&path).unwrap());
    }

    #[test]
    fn create_if_missing_leaves_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = write_json(&temp, r#"{"name": "isb"}"#);

        assert!(!create_if_missing(&path).unwrap());
        assert_eq!(read_json(&path), json!({"name": "isb"}));
    }

    #[test]
    fn read_record_after_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_json(&temp, "{}");
        ensure_defaults(&path).unwrap();

        let record = read_record(&path).unwrap();
        assert_eq!(record.model, DEFAULT_MODEL);
        assert_eq!(record.address(), "127.0.0.1:11434");
    }

    #[test]
    fn record_address_with_numeric_port() {
        let record = OllamaRecord {
            model: DEFAULT_MODEL.to_string(),
            ip: "localhost".to_string(),
            port: json!(8080),
            style: DEFAULT_STYLE.to_string(),
        };
        assert_eq!(record.address(), "localhost:8080");
    }
}
