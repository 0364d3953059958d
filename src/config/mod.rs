//! Configuration for the launcher.
//!
//! Two separate documents are handled here:
//! - [`record`]: the application's `package.json`, where the launcher keeps
//!   the `config.ollama` defaults in place
//! - [`settings`]: the launcher's own YAML settings with environment overrides
//!
//! # Example
//!
//! ```
//! use isb_launcher::config::{ensure_defaults, read_record};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("package.json");
//! fs::write(&path, r#"{"name": "internet-server-browser"}"#).unwrap();
//!
//! assert!(ensure_defaults(&path).unwrap());
//! assert!(!ensure_defaults(&path).unwrap());
//! assert_eq!(read_record(&path).unwrap().model, "llama3.2");
//! ```

pub mod record;
pub mod settings;

pub use record::{
    create_if_missing, ensure_defaults, read_record, OllamaRecord, DEFAULT_IP, DEFAULT_MODEL,
    DEFAULT_PORT, DEFAULT_STYLE,
};
pub use settings::{LauncherSettings, ProjectLayout, PythonSettings, SETTINGS_FILE};
