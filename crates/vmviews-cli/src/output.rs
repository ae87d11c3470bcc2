//! Terminal output

use crate::config::ColorChoice;
use console::{style, Term};

/// Writes command output to stdout and failures to stderr
#[derive(Debug)]
pub struct Printer {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
}

impl Printer {
    /// Create a printer for the given color choice
    #[must_use]
    pub fn new(color: ColorChoice) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color: color.should_color(),
        }
    }

    /// A name followed by dimmed detail, aligned for listings
    #[must_use]
    pub fn entry(&self, name: &str, detail: &str) -> String {
        if self.use_color {
            format!("{:<24} {}", style(name).cyan().bold(), style(detail).dim())
        } else {
            format!("{name:<24} {detail}")
        }
    }

    /// Print command output
    pub fn print(&self, text: &str) -> std::io::Result<()> {
        self.out.write_line(text.trim_end_matches('\n'))
    }

    /// Print an error, always shown
    pub fn error(&self, message: &str) {
        let prefix = if self.use_color {
            style("Error:").red().bold().to_string()
        } else {
            "Error:".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_entry_aligned() {
        let printer = Printer::new(ColorChoice::Never);
        assert_eq!(
            printer.entry("edit", "9 widgets"),
            format!("{:<24} 9 widgets", "edit")
        );
    }

    #[test]
    fn test_colored_entry_keeps_text() {
        let printer = Printer::new(ColorChoice::Always);
        let line = printer.entry("provision", "90 widgets");
        assert!(line.contains("provision"));
        assert!(line.contains("90 widgets"));
    }
}
