//! Error handling with codes, line numbers and recovery suggestions
//!
//! This module provides structured error types with:
//! - Error codes for programmatic handling
//! - The offending line number where one exists
//! - Recovery suggestions
//! - Serializable error reports

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    Unknown = 1000,
    Internal = 1001,

    // IO errors (2xxx)
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,
    SpecNotFound = 2003,
    FileExists = 2004,

    // Format errors (3xxx)
    FormatError = 3000,
    MalformedLine = 3001,
    BadSectionHeader = 3002,
    AssignmentOutsideSection = 3003,
    DuplicateSection = 3004,
    BadPlaceholder = 3005,
    InterpolationDepth = 3006,

    // Reference errors (4xxx)
    ReferenceError = 4000,
    UndefinedKey = 4001,
    NoSuchSection = 4002,
    NoSuchEntry = 4003,

    // Validation errors (5xxx)
    ValidationError = 5000,
    InvalidBool = 5001,
    InvalidInt = 5002,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Format",
            4 => "Reference",
            5 => "Validation",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// 1-based line number in the spec file, where applicable
    pub line: Option<usize>,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(line) = self.line {
            write!(f, " (line {})", line)?;
        }
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            line: None,
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Attach the offending 1-based line number
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether this is a format error (3xxx range)
    pub fn is_format(&self) -> bool {
        self.code.code() / 1000 == 3
    }

    /// Whether this is a reference error (4xxx range)
    pub fn is_reference(&self) -> bool {
        self.code.code() / 1000 == 4
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            line: self.line,
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoError, message)
    }

    pub fn file_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::FileNotFound,
            format!("File not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Check that the file exists and you have read permissions")
    }

    pub fn spec_not_found() -> Self {
        Self::new(ErrorCode::SpecNotFound, "No spec file found")
            .with_suggestion("Run 'apkspec init' to create one, or use --config to specify a path")
    }

    pub fn malformed_line(line: usize, text: &str) -> Self {
        Self::new(
            ErrorCode::MalformedLine,
            format!("Not a section header, comment or assignment: {:?}", text),
        )
        .at_line(line)
    }

    pub fn bad_section_header(line: usize, text: &str) -> Self {
        Self::new(
            ErrorCode::BadSectionHeader,
            format!("Malformed section header: {:?}", text),
        )
        .at_line(line)
        .with_suggestion("Section headers look like [app], with nothing after the closing bracket")
    }

    pub fn assignment_outside_section(line: usize, key: &str) -> Self {
        Self::new(
            ErrorCode::AssignmentOutsideSection,
            format!("Assignment to '{}' before any section header", key),
        )
        .at_line(line)
        .with_suggestion("Add a section header such as [app] above this line")
    }

    pub fn duplicate_section(line: usize, name: &str) -> Self {
        Self::new(
            ErrorCode::DuplicateSection,
            format!("Section [{}] declared more than once", name),
        )
        .at_line(line)
    }

    pub fn bad_placeholder(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadPlaceholder, message)
            .with_suggestion("Interpolation placeholders look like %(key)s; write %% for a literal %")
    }

    pub fn interpolation_depth(section: &str, key: &str) -> Self {
        Self::new(
            ErrorCode::InterpolationDepth,
            format!(
                "Interpolation in [{}] {} exceeds the maximum depth",
                section, key
            ),
        )
        .with_suggestion("Check for placeholder cycles between keys in this section")
    }

    pub fn undefined_key(section: &str, key: &str) -> Self {
        Self::new(
            ErrorCode::UndefinedKey,
            format!("Placeholder references undefined key '{}' in [{}]", key, section),
        )
    }

    pub fn no_such_section(name: &str) -> Self {
        Self::new(ErrorCode::NoSuchSection, format!("No section named [{}]", name))
    }

    pub fn no_such_entry(section: &str, key: &str) -> Self {
        Self::new(
            ErrorCode::NoSuchEntry,
            format!("No key '{}' in section [{}]", key, section),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn invalid_bool(section: &str, key: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::InvalidBool,
            format!("[{}] {} = {:?} is not a boolean", section, key, value),
        )
        .with_suggestion("Use one of: 1, yes, true, on, 0, no, false, off")
    }

    pub fn invalid_int(section: &str, key: &str, value: &str) -> Self {
        Self::new(
            ErrorCode::InvalidInt,
            format!("[{}] {} = {:?} is not an integer", section, key, value),
        )
    }
}

/// Serializable error report for logging and `--json` output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub code_str: String,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const VALIDATION_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            std::io::ErrorKind::AlreadyExists => ErrorCode::FileExists,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::Internal, format!("JSON error: {}", err)).with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::BadSectionHeader.to_string(), "E3002");
        assert_eq!(ErrorCode::UndefinedKey.to_string(), "E4001");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::IoError.category(), "IO");
        assert_eq!(ErrorCode::MalformedLine.category(), "Format");
        assert_eq!(ErrorCode::UndefinedKey.category(), "Reference");
    }

    #[test]
    fn test_error_display_includes_line() {
        let err = Error::malformed_line(14, "???");
        assert!(err.to_string().contains("(line 14)"));
    }

    #[test]
    fn test_error_ranges() {
        assert!(Error::malformed_line(1, "x").is_format());
        assert!(Error::undefined_key("app", "title").is_reference());
        assert!(!Error::undefined_key("app", "title").is_format());
    }

    #[test]
    fn test_error_report_serialization() {
        let err = Error::assignment_outside_section(3, "title")
            .with_context("While parsing buildozer.spec");

        let report = err.to_report();
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("E3003"));
        assert!(json.contains("Format"));
        assert!(json.contains("\"line\":3"));
    }
}
