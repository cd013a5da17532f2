//! User-facing terminal output.
//!
//! Progress goes to stdout, warnings to stderr. Diagnostics for developers go
//! through `log` instead. Styling follows `console`'s color detection, so
//! piped output and `NO_COLOR` get plain text.

use console::{Style, Term, measure_text_width};
use std::io;

/// Output manager for colored terminal output.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    stdout: Term,
    stderr: Term,
}

/// Render `prefix` in `style` followed by `message`.
fn styled_line(prefix: &str, style: &Style, message: &str) -> String {
    format!("{} {message}", style.apply_to(prefix))
}

impl OutputManager {
    /// Create a new output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }

    /// Print only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        self.stdout
            .write_line(&format!("  {}", Style::new().dim().apply_to(message)))
    }

    /// Print a progress line.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout
            .write_line(&styled_line("→", &Style::new().cyan(), message))
    }

    /// Print a success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout
            .write_line(&styled_line("✓", &Style::new().green().bold(), message))
    }

    /// Print a warning to stderr.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stderr.write_line(&styled_line(
            "⚠",
            &Style::new().yellow().bold().for_stderr(),
            message,
        ))
    }

    /// Print a section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let bold = Style::new().bold();
        self.stdout.write_line("")?;
        self.stdout.write_line(&bold.apply_to(title).to_string())?;
        self.stdout
            .write_line(&"─".repeat(measure_text_width(title)))
    }

    /// Print indented text.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout.write_line(&format!("    {message}"))
    }

    /// Print raw text (for machine-readable values such as keys).
    pub fn plain(&self, message: &str) -> io::Result<()> {
        self.stdout.write_line(message)
    }
}
