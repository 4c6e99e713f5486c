//! Terminal output

use console::{style, Term};

/// Writes results to stdout and failures to stderr
#[derive(Debug)]
pub struct Reporter {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let _ = self
            .out
            .write_line(&format!("{} {message}", self.prefix(Level::Pass)));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let _ = self
            .err
            .write_line(&format!("{} {message}", self.prefix(Level::Fail)));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }
        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };
        let _ = self.out.write_line(&styled);
    }

    /// Print an aligned `key: value` line
    pub fn field(&self, key: &str, value: impl std::fmt::Display) {
        if self.quiet {
            return;
        }
        let key = format!("{key}:");
        let key = if self.use_color {
            style(format!("{key:<16}")).dim().to_string()
        } else {
            format!("{key:<16}")
        };
        let _ = self.out.write_line(&format!("  {key}{value}"));
    }

    /// Print raw text, ignoring quiet mode (machine-readable output)
    pub fn raw(&self, text: &str) {
        let _ = self.out.write_line(text);
    }

    fn prefix(&self, level: Level) -> String {
        match (level, self.use_color) {
            (Level::Pass, true) => style("✓").green().bold().to_string(),
            (Level::Fail, true) => style("✗").red().bold().to_string(),
            (Level::Pass, false) => "PASS".to_string(),
            (Level::Fail, false) => "FAIL".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Level {
    Pass,
    Fail,
}
