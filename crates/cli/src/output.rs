//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use apkspec_core::document::Section;
use apkspec_core::validation::ValidationResult;
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.len()));
    }
}

/// Print a section's entries as an aligned `key = value` listing.
pub fn print_entries(section: &Section) {
    let width = section.keys().map(str::len).max().unwrap_or(0);
    for entry in section.entries() {
        let key = format!("{:<width$}", entry.key());
        println!("{} = {}", key.cyan(), entry.raw());
    }
}

/// Print a validation result, errors then warnings.
pub fn print_validation(result: &ValidationResult) {
    for error in result.errors() {
        Status::error(&format!("{} [{}]", error, error.code));
    }
    for warning in result.warnings() {
        Status::warning(&warning.to_string());
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apkspec_core::parser::parse;

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "entry", "entries"), "1 entry");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(5, "entry", "entries"), "5 entries");
    }

    #[test]
    fn test_print_entries_handles_empty_section() {
        let doc = parse("[app]\n").unwrap();
        print_entries(doc.section("app").unwrap());
    }
}
