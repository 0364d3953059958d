//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::process::{OutputCallback, OutputLine};

use super::theme::LauncherTheme;
use super::SpinnerHandle;

/// A progress spinner for long-running operations such as installs.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: LauncherTheme,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str, theme: LauncherTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar, theme }
    }

    fn finish_with(&mut self, line: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(line);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.finish_with(line);
    }

    fn finish_error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.finish_with(line);
    }

    fn progress_bar(&self) -> Option<ProgressBar> {
        Some(self.bar.clone())
    }
}

/// Create an output callback that shows the last `max_lines` output lines
/// under the spinner's base message.
pub fn live_output_callback(
    bar: ProgressBar,
    base_message: String,
    max_lines: usize,
) -> OutputCallback {
    let buffer: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(VecDeque::new()));
    let dim = LauncherTheme::new().dim;

    Box::new(move |line: OutputLine| {
        let text = match &line {
            OutputLine::Stdout(s) | OutputLine::Stderr(s) => s.trim_end(),
        };
        if text.is_empty() {
            return;
        }

        let display_text = if text.chars().count() > 72 {
            let cut: String = text.chars().take(69).collect();
            format!("{}...", cut)
        } else {
            text.to_string()
        };

        let Ok(mut buf) = buffer.lock() else {
            return;
        };
        buf.push_back(display_text);
        while buf.len() > max_lines {
            buf.pop_front();
        }

        let mut msg = base_message.clone();
        for line in buf.iter() {
            msg.push_str("\n  ");
            msg.push_str(&dim.apply_to(format!("» {}", line)).to_string());
        }
        bar.set_message(msg);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_output_keeps_last_lines() {
        let bar = ProgressBar::hidden();
        let callback = live_output_callback(bar.clone(), "Installing".to_string(), 2);

        callback(OutputLine::Stdout("added 1 package".to_string()));
        callback(OutputLine::Stderr("npm WARN deprecated".to_string()));
        callback(OutputLine::Stdout("added 2 packages".to_string()));

        let msg = bar.message();
        assert!(msg.starts_with("Installing"));
        assert!(!msg.contains("added 1 package"));
        assert!(msg.contains("npm WARN deprecated"));
        assert!(msg.contains("added 2 packages"));
    }

    #[test]
    fn live_output_skips_blank_lines() {
        let bar = ProgressBar::hidden();
        let callback = live_output_callback(bar.clone(), "Installing".to_string(), 2);

        bar.set_message("Installing");
        callback(OutputLine::Stdout("   ".to_string()));

        assert_eq!(bar.message(), "Installing");
    }

    #[test]
    fn live_output_truncates_long_lines() {
        let bar = ProgressBar::hidden();
        let callback = live_output_callback(bar.clone(), "Installing".to_string(), 1);

        callback(OutputLine::Stdout("x".repeat(200)));

        assert!(bar.message().contains("..."));
        assert!(!bar.message().contains(&"x".repeat(70)));
    }
}
