//! Core library for the apkspec packaging-configuration toolkit
//!
//! This crate owns the configuration layer of a pipeline that packages
//! Python/Kivy applications into Android binaries:
//!
//! - **Document model**: ordered sections of `key = value` entries
//! - **Parser**: the line-oriented spec format with `%(key)s` interpolation
//! - **Loader**: spec file discovery and reading
//! - **Template**: `init`-style starter spec generation
//! - **Schema**: typed profiles over the well-known packaging keys
//! - **Validation**: semantic checks with errors and warnings
//! - **Error handling**: structured errors with codes, line numbers and
//!   recovery suggestions
//!
//! The packaging tool that consumes the configuration (interpreter
//! embedding, APK assembly) is not part of this crate.
//!
//! # Example
//!
//! ```rust
//! use apkspec_core::parser;
//!
//! let doc = parser::parse("[app]\nsource.dir = .\nicon = %(source.dir)s/icon.png\n").unwrap();
//! assert_eq!(doc.resolve("app", "icon").unwrap(), "./icon.png");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod interpolate;
pub mod loader;
pub mod parser;
pub mod schema;
pub mod template;
pub mod validation;

pub use document::{Entry, Section, SpecDocument};
pub use error::{Error, ErrorCode, Result, ResultExt};
pub use parser::parse;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{Entry, Section, SpecDocument};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::loader::SpecFile;
    pub use crate::parser::parse;
    pub use crate::schema::{AndroidProfile, AppProfile, BuildProfile, PackagingProfile};
    pub use crate::validation::{validate_spec, ValidationResult, Validator};
}
