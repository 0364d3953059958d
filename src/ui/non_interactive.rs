//! Non-interactive UI for pipes, CI and other headless environments.

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Plain-text UI: no colors, no spinners, one line per event.
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn info(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("› {}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_banner(&mut self, title: &str, subtitle: &str, version: &str) {
        if self.mode.shows_status() {
            println!("{} {} ({})", title, version, subtitle);
        }
    }

    fn show_error_block(&mut self, command: &str, output: &str) {
        eprintln!("  $ {}", command);
        for line in output.lines() {
            eprintln!("  | {}", line);
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(PlainSpinner { mode: self.mode })
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints the final status line only.
struct PlainSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for PlainSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::NoopSpinner;

    #[test]
    fn non_interactive_is_never_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn quiet_spinner_has_no_progress_bar() {
        let mut ui = NonInteractiveUI::new(OutputMode::Quiet);
        let spinner = ui.start_spinner("Installing");
        assert!(spinner.progress_bar().is_none());
    }

    #[test]
    fn noop_spinner_accepts_calls() {
        let mut spinner = NoopSpinner;
        spinner.set_message("x");
        spinner.finish_success("done");
        assert!(spinner.progress_bar().is_none());
    }
}
