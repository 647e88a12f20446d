//! Semantic validation of spec documents
//!
//! The parser only cares about the text format; this module checks that a
//! parsed document actually describes a packageable application: required
//! `[app]` keys, identifier shapes, API level ordering.
//!
//! # Example
//!
//! ```rust,ignore
//! use apkspec_core::{parser, validation};
//!
//! let doc = parser::parse(text)?;
//! let result = validation::validate_spec(&doc)?;
//! for error in result.errors() {
//!     eprintln!("{}", error);
//! }
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::SpecDocument;
use crate::error::{Error, ErrorCode, Result};
use crate::schema::PackagingProfile;

static PACKAGE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap());
static PACKAGE_DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$").unwrap());
static VERSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)*$").unwrap());
static PERMISSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").unwrap());

/// Keys that must be present in `[app]` for packaging to proceed.
const REQUIRED_APP_KEYS: &[&str] = &[
    "title",
    "package.name",
    "package.domain",
    "version",
    "requirements",
];

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
    warnings: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get all warnings
    pub fn warnings(&self) -> &[ValidationError] {
        &self.warnings
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationError) {
        self.warnings.push(warning);
    }

    /// Convert to Result type
    pub fn to_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
            Err(Error::new(
                ErrorCode::ValidationError,
                format!("Validation failed: {}", messages.join("; ")),
            ))
        }
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a field is present and not empty
    pub fn required(mut self, field: &str, value: Option<&str>) -> Self {
        if value.is_none_or(|v| v.trim().is_empty()) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Field is required".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty value".to_string()),
                actual: Some(if value.is_none() { "absent" } else { "empty" }.to_string()),
            });
        }
        self
    }

    /// Validate against a pre-compiled regex pattern
    pub fn pattern(mut self, field: &str, value: &str, re: &Regex, description: &str) -> Self {
        if !re.is_match(value) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must match {}", description),
                code: "PATTERN".to_string(),
                expected: Some(description.to_string()),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Validate that a value is in a list of allowed values
    pub fn one_of(mut self, field: &str, value: &str, allowed: &[&str]) -> Self {
        if !allowed.contains(&value) {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be one of: {}", allowed.join(", ")),
                code: "ONE_OF".to_string(),
                expected: Some(allowed.join(", ")),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Add a custom validation
    pub fn custom<F>(mut self, field: &str, f: F) -> Self
    where
        F: FnOnce() -> Option<String>,
    {
        if let Some(message) = f() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message,
                code: "CUSTOM".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Add a warning (non-blocking)
    pub fn warn_if(mut self, field: &str, condition: bool, message: &str) -> Self {
        if condition {
            self.result.add_warning(ValidationError {
                field: field.to_string(),
                message: message.to_string(),
                code: "WARNING".to_string(),
                expected: None,
                actual: None,
            });
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

/// Run the full rule set over a parsed document.
///
/// Format and reference errors inside values (bad coercions, unresolvable
/// placeholders) are fatal and surface as `Err`; everything else lands in
/// the returned [`ValidationResult`].
pub fn validate_spec(doc: &SpecDocument) -> Result<ValidationResult> {
    let Some(app) = doc.section("app") else {
        let mut result = ValidationResult::new();
        result.add_error(ValidationError {
            field: "app".to_string(),
            message: "Missing [app] section".to_string(),
            code: "REQUIRED".to_string(),
            expected: Some("an [app] section".to_string()),
            actual: Some("absent".to_string()),
        });
        return Ok(result);
    };

    let profile = PackagingProfile::from_document(doc)?;

    let mut validator = Validator::new();
    for key in REQUIRED_APP_KEYS {
        validator = validator.required(&format!("app.{key}"), app.raw(key));
    }

    let mut result = validator
        .pattern(
            "app.package.name",
            &profile.app.package_name,
            &PACKAGE_NAME,
            "lowercase letters, digits and underscores, starting with a letter",
        )
        .pattern(
            "app.package.domain",
            &profile.app.package_domain,
            &PACKAGE_DOMAIN,
            "a reverse-DNS domain with at least two labels",
        )
        .pattern(
            "app.version",
            &profile.app.version,
            &VERSION,
            "dot-separated digits, e.g. 1.0.0",
        )
        .one_of(
            "app.orientation",
            &profile.app.orientation,
            &["landscape", "portrait", "all"],
        )
        .custom("app.android.minapi", || {
            (profile.android.minapi > profile.android.api).then(|| {
                format!(
                    "android.minapi ({}) is above android.api ({})",
                    profile.android.minapi, profile.android.api
                )
            })
        })
        .warn_if(
            "app.android.api",
            profile.android.api < 21,
            "Target API levels below 21 are not accepted by current app stores",
        )
        .validate();

    for permission in &profile.android.permissions {
        if !PERMISSION.is_match(permission) {
            result.add_warning(ValidationError {
                field: "app.android.permissions".to_string(),
                message: format!(
                    "'{}' does not look like an Android permission name",
                    permission
                ),
                code: "WARNING".to_string(),
                expected: Some("SCREAMING_SNAKE_CASE".to_string()),
                actual: Some(permission.clone()),
            });
        }
    }

    tracing::debug!(
        errors = result.errors().len(),
        warnings = result.warnings().len(),
        "validated spec document"
    );
    Ok(result)
}
