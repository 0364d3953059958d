//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use isb_launcher::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.warning("Ollama configuration issues detected");
//! ui.success("Verification completed");
//!
//! assert!(ui.has_warning("Ollama"));
//! assert!(ui.has_success("Verification"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    infos: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    banners: Vec<String>,
    error_blocks: Vec<(String, String)>,
    spinners: Vec<String>,
    spinner_results: Rc<RefCell<Vec<SpinnerResult>>>,
}

/// How a mock spinner was finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinnerResult {
    Success(String),
    Error(String),
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn infos(&self) -> &[String] {
        &self.infos
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Banner titles shown.
    pub fn banners(&self) -> &[String] {
        &self.banners
    }

    /// Error blocks shown, as (command, output).
    pub fn error_blocks(&self) -> &[(String, String)] {
        &self.error_blocks
    }

    /// Messages of all spinners started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// How spinners were finished, in order.
    pub fn spinner_results(&self) -> Vec<SpinnerResult> {
        self.spinner_results.borrow().clone()
    }

    pub fn has_info(&self, msg: &str) -> bool {
        self.infos.iter().any(|m| m.contains(msg))
    }

    /// Check for a success message, including finished spinners.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
            || self
                .spinner_results
                .borrow()
                .iter()
                .any(|r| matches!(r, SpinnerResult::Success(m) if m.contains(msg)))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check for an error message, including failed spinners.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
            || self
                .spinner_results
                .borrow()
                .iter()
                .any(|r| matches!(r, SpinnerResult::Error(m) if m.contains(msg)))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn info(&mut self, msg: &str) {
        self.infos.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_banner(&mut self, title: &str, _subtitle: &str, _version: &str) {
        self.banners.push(title.to_string());
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        self.error_blocks
            .push((command.to_string(), output.to_string()));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            results: Rc::clone(&self.spinner_results),
        })
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that records how it was finished.
struct MockSpinner {
    results: Rc<RefCell<Vec<SpinnerResult>>>,
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.results
            .borrow_mut()
            .push(SpinnerResult::Success(msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.results
            .borrow_mut()
            .push(SpinnerResult::Error(msg.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages_by_severity() {
        let mut ui = MockUI::new();
        ui.info("Mode: Normal");
        ui.success("done");
        ui.warning("careful");
        ui.error("broken");

        assert_eq!(ui.infos(), ["Mode: Normal"]);
        assert!(ui.has_success("done"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("broken"));
    }

    #[test]
    fn spinner_results_are_visible_after_drop() {
        let mut ui = MockUI::new();
        {
            let mut spinner = ui.start_spinner("Installing");
            spinner.finish_error("Install failed");
        }

        assert_eq!(ui.spinners(), ["Installing"]);
        assert!(ui.has_error("Install failed"));
        assert_eq!(
            ui.spinner_results(),
            vec![SpinnerResult::Error("Install failed".to_string())]
        );
    }

    #[test]
    fn with_mode_sets_mode() {
        let ui = MockUI::with_mode(OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }
}
