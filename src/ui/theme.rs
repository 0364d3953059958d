//! Visual theme and styling.

use console::Style;

/// The launcher's visual theme.
#[derive(Debug, Clone)]
pub struct LauncherTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (yellow).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for informational messages (blue).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for the banner frame (cyan).
    pub banner: Style,
    /// Style for commands shown in output (dim italic).
    pub command: Style,
    /// Style for box-drawing borders (dim).
    pub border: Style,
}

impl Default for LauncherTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl LauncherTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            info: Style::new().blue(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            banner: Style::new().cyan(),
            command: Style::new().dim().italic(),
            border: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            banner: Style::new(),
            command: Style::new(),
            border: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_info(&self, msg: &str) -> String {
        format!("{} {}", self.info.apply_to("›"), msg)
    }

    /// Format the framed startup banner.
    pub fn format_banner(&self, title: &str, subtitle: &str, version: &str) -> String {
        let version_line = format!("Version: {}", version);
        let width = [title, subtitle, version_line.as_str()]
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
            + 2;

        let b = &self.banner;
        let line = |text: String, style: &Style| {
            let pad = width - console::measure_text_width(&text) - 1;
            format!(
                "{} {}{}{}",
                b.apply_to("║"),
                style.apply_to(&text),
                " ".repeat(pad),
                b.apply_to("║")
            )
        };

        [
            b.apply_to(format!("╔{}╗", "═".repeat(width))).to_string(),
            line(title.to_string(), &self.highlight),
            line(subtitle.to_string(), &self.info),
            line(version_line, &self.success),
            b.apply_to(format!("╚{}╝", "═".repeat(width))).to_string(),
        ]
        .join("\n")
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() || !console::colors_enabled() {
        return false;
    }

    console::Term::stdout().is_term()
}
