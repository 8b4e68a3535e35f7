//! User-facing error and warning output.
//!
//! Library errors convert to a [`Diagnostic`] through their
//! `to_diagnostic()` method; the binary prints it to stderr.

use std::fmt;

/// Help lines appended to `anyhow` errors raised by the CLI.
pub mod suggestions {
    pub const NO_CONFIG: &str = "help: Create a `qtforge.toml` or pass options on the command line";

    pub const NO_PLATFORM: &str =
        "help: Run `qtforge platform` with `--os`, `--arch` and `--compiler` to check a target";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(&self, color: bool) -> &'static str {
        match (self, color) {
            (Severity::Error, true) => "\x1b[1;31merror\x1b[0m",
            (Severity::Warning, true) => "\x1b[1;33mwarning\x1b[0m",
            (Severity::Error, false) => "error",
            (Severity::Warning, false) => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(false))
    }
}

/// A message with the options or modules involved and possible fixes.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    /// Lines naming what the message is about
    pub context: Vec<String>,
    /// Suggested fixes, printed as a numbered list
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Render for a terminal; `color` adds ANSI escapes to the labels.
    pub fn format(&self, color: bool) -> String {
        let mut lines = vec![format!("{}: {}", self.severity.label(color), self.message)];

        lines.extend(self.context.iter().map(|ctx| format!("  = {}", ctx)));

        if !self.suggestions.is_empty() {
            let help = if color { "\x1b[1;32mhelp\x1b[0m" } else { "help" };
            lines.push(String::new());
            lines.push(format!("{}: consider:", help));
            lines.extend(
                self.suggestions
                    .iter()
                    .enumerate()
                    .map(|(i, s)| format!("  {}. {}", i + 1, s)),
            );
        }

        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("unknown module `qtgui`")
            .with_context("`qtsvg` depends on `qtgui`")
            .with_suggestion("Add `qtgui` to the catalog")
            .with_suggestion("Remove `qtgui` from `qtsvg`'s depends list");

        assert_eq!(
            diag.format(false),
            "error: unknown module `qtgui`\n\
             \x20 = `qtsvg` depends on `qtgui`\n\
             \n\
             help: consider:\n\
             \x20 1. Add `qtgui` to the catalog\n\
             \x20 2. Remove `qtgui` from `qtsvg`'s depends list\n"
        );
    }

    #[test]
    fn test_plain_message() {
        assert_eq!(Diagnostic::warning("no platform").to_string(), "warning: no platform\n");
    }

    #[test]
    fn test_warning_colored() {
        let output = Diagnostic::warning("no platform").format(true);
        assert!(output.starts_with("\x1b[1;33mwarning\x1b[0m: no platform"));
    }
}
