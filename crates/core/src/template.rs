//! Default spec generation
//!
//! `apkspec init` writes this starter document. It covers the key set the
//! packaging pipeline understands, with optional keys left commented out.

use std::path::Path;

use crate::document::SpecDocument;
use crate::error::{Error, ErrorCode, Result};
use crate::parser;

/// The generated starter spec.
pub const DEFAULT_SPEC: &str = r#"# apkspec.spec — packaging configuration
#
# Lines starting with # or ; are comments. Values may reference other keys
# in the same section with %(key)s placeholders; %% is a literal percent.

[app]

# Title shown on the device
title = My Application

# Package name (lowercase, letters/digits/underscores)
package.name = myapp

# Package domain (reverse DNS, combined with package.name)
package.domain = org.example

# Directory containing main.py, relative to this file
source.dir = .

# File extensions copied into the package
source.include_exts = py,png,jpg,kv,atlas

# Application version
version = 0.1

# Comma-separated runtime requirements
requirements = python3,kivy

# Icon and presplash, relative to the source directory
icon.filename = %(source.dir)s/data/icon.png
presplash.filename = %(source.dir)s/data/presplash.png

# Supported orientation: landscape, portrait or all
orientation = portrait

# Hide the status bar
fullscreen = 0

# Android permissions the app requests
android.permissions = INTERNET

# Target Android API level
android.api = 31

# Minimum API level supported
android.minapi = 21

# Android NDK version
android.ndk = 23b

# Architectures to build for
android.archs = arm64-v8a,armeabi-v7a

# Allow the app's data to be backed up
android.allow_backup = 1

# Use AndroidX support libraries
android.enable_androidx = 1

# Comma-separated Gradle dependencies
# android.gradle_dependencies =

[build]

# Log verbosity: 0 errors only, 1 info, 2 debug
log_level = 2

# Warn when invoked as root
warn_on_root = 1
"#;

/// The default spec in parsed form.
pub fn default_document() -> Result<SpecDocument> {
    parser::parse(DEFAULT_SPEC)
}

/// Write the starter spec to `path`. Refuses to overwrite an existing file.
pub fn write_template(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(Error::new(
            ErrorCode::FileExists,
            format!("{} already exists", path.display()),
        )
        .with_suggestion("Remove the file first if you want a fresh template"));
    }
    std::fs::write(path, DEFAULT_SPEC)?;
    tracing::debug!(path = %path.display(), "wrote starter spec");
    Ok(())
}
