//! Typed profiles over the well-known spec keys
//!
//! The parser treats every key as an opaque string; this module is the
//! consumer side, mapping the known `[app]` and `[build]` keys onto typed
//! structs with defaults. Android settings live in `[app]` under the
//! `android.` prefix, as the packaging tool expects.

use serde::Serialize;

use crate::document::SpecDocument;
use crate::error::{Error, ErrorCode, Result};

/// Application metadata from `[app]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppProfile {
    /// Title shown on the device
    pub title: String,
    /// Package name component
    pub package_name: String,
    /// Reverse-DNS package domain
    pub package_domain: String,
    /// Application version string
    pub version: String,
    /// Directory containing the application sources
    pub source_dir: String,
    /// File extensions copied into the package
    pub include_exts: Vec<String>,
    /// Runtime requirements
    pub requirements: Vec<String>,
    /// landscape, portrait or all
    pub orientation: String,
    /// Hide the status bar
    pub fullscreen: bool,
}

impl Default for AppProfile {
    fn default() -> Self {
        Self {
            title: default_title(),
            package_name: default_package_name(),
            package_domain: default_package_domain(),
            version: default_version(),
            source_dir: default_source_dir(),
            include_exts: default_include_exts(),
            requirements: default_requirements(),
            orientation: default_orientation(),
            fullscreen: false,
        }
    }
}

fn default_title() -> String {
    "My Application".to_string()
}

fn default_package_name() -> String {
    "myapp".to_string()
}

fn default_package_domain() -> String {
    "org.example".to_string()
}

fn default_version() -> String {
    "0.1".to_string()
}

fn default_source_dir() -> String {
    ".".to_string()
}

fn default_include_exts() -> Vec<String> {
    ["py", "png", "jpg", "kv", "atlas"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_requirements() -> Vec<String> {
    vec!["python3".to_string(), "kivy".to_string()]
}

fn default_orientation() -> String {
    "portrait".to_string()
}

impl AppProfile {
    /// Build from a parsed document, falling back to defaults for absent keys.
    pub fn from_document(doc: &SpecDocument) -> Result<Self> {
        Ok(Self {
            title: string_or(doc, "app", "title", default_title)?,
            package_name: string_or(doc, "app", "package.name", default_package_name)?,
            package_domain: string_or(doc, "app", "package.domain", default_package_domain)?,
            version: string_or(doc, "app", "version", default_version)?,
            source_dir: string_or(doc, "app", "source.dir", default_source_dir)?,
            include_exts: list_or(doc, "app", "source.include_exts", default_include_exts)?,
            requirements: list_or(doc, "app", "requirements", default_requirements)?,
            orientation: string_or(doc, "app", "orientation", default_orientation)?,
            fullscreen: bool_or(doc, "app", "fullscreen", false)?,
        })
    }

    /// The fully-qualified application identifier, domain plus name.
    pub fn package_id(&self) -> String {
        format!("{}.{}", self.package_domain, self.package_name)
    }
}

/// Android build parameters from the `android.*` keys in `[app]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AndroidProfile {
    /// Target API level
    pub api: u32,
    /// Minimum supported API level
    pub minapi: u32,
    /// NDK version
    pub ndk: String,
    /// Architectures to build for
    pub archs: Vec<String>,
    /// Requested permissions
    pub permissions: Vec<String>,
    /// Allow the app's data to be backed up
    pub allow_backup: bool,
    /// Use AndroidX support libraries
    pub enable_androidx: bool,
    /// Extra Gradle dependencies
    pub gradle_dependencies: Vec<String>,
}

impl Default for AndroidProfile {
    fn default() -> Self {
        Self {
            api: default_api(),
            minapi: default_minapi(),
            ndk: default_ndk(),
            archs: default_archs(),
            permissions: default_permissions(),
            allow_backup: true,
            enable_androidx: true,
            gradle_dependencies: Vec::new(),
        }
    }
}

fn default_api() -> u32 {
    31
}

fn default_minapi() -> u32 {
    21
}

fn default_ndk() -> String {
    "23b".to_string()
}

fn default_archs() -> Vec<String> {
    vec!["arm64-v8a".to_string(), "armeabi-v7a".to_string()]
}

fn default_permissions() -> Vec<String> {
    vec!["INTERNET".to_string()]
}

impl AndroidProfile {
    /// Build from a parsed document, falling back to defaults for absent keys.
    pub fn from_document(doc: &SpecDocument) -> Result<Self> {
        Ok(Self {
            api: int_or(doc, "app", "android.api", default_api())?,
            minapi: int_or(doc, "app", "android.minapi", default_minapi())?,
            ndk: string_or(doc, "app", "android.ndk", default_ndk)?,
            archs: list_or(doc, "app", "android.archs", default_archs)?,
            permissions: list_or(doc, "app", "android.permissions", default_permissions)?,
            allow_backup: bool_or(doc, "app", "android.allow_backup", true)?,
            enable_androidx: bool_or(doc, "app", "android.enable_androidx", true)?,
            gradle_dependencies: list_or(doc, "app", "android.gradle_dependencies", Vec::new)?,
        })
    }
}

/// Tool behavior from `[build]` (or `[buildozer]` in drop-in spec files).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildProfile {
    /// 0 errors only, 1 info, 2 debug
    pub log_level: u32,
    /// Warn when invoked as root
    pub warn_on_root: bool,
}

impl Default for BuildProfile {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            warn_on_root: true,
        }
    }
}

fn default_log_level() -> u32 {
    1
}

impl BuildProfile {
    /// Build from a parsed document, falling back to defaults for absent keys.
    pub fn from_document(doc: &SpecDocument) -> Result<Self> {
        let section = if doc.has_section("build") {
            "build"
        } else {
            "buildozer"
        };
        Ok(Self {
            log_level: int_or(doc, section, "log_level", default_log_level())?,
            warn_on_root: bool_or(doc, section, "warn_on_root", true)?,
        })
    }
}

/// Everything the packaging pipeline reads, in typed form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PackagingProfile {
    pub app: AppProfile,
    pub android: AndroidProfile,
    pub build: BuildProfile,
}

impl PackagingProfile {
    /// Build all profiles from a parsed document.
    pub fn from_document(doc: &SpecDocument) -> Result<Self> {
        Ok(Self {
            app: AppProfile::from_document(doc)?,
            android: AndroidProfile::from_document(doc)?,
            build: BuildProfile::from_document(doc)?,
        })
    }
}

// Lookup helpers. An absent section or key falls back; format and reference
// errors inside present values still propagate.

fn resolved(doc: &SpecDocument, section: &str, key: &str) -> Result<Option<String>> {
    match doc.resolve(section, key) {
        Ok(v) => Ok(Some(v)),
        Err(e) if matches!(e.code, ErrorCode::NoSuchSection | ErrorCode::NoSuchEntry) => Ok(None),
        Err(e) => Err(e),
    }
}

fn string_or(
    doc: &SpecDocument,
    section: &str,
    key: &str,
    default: impl FnOnce() -> String,
) -> Result<String> {
    Ok(resolved(doc, section, key)?.unwrap_or_else(default))
}

fn list_or(
    doc: &SpecDocument,
    section: &str,
    key: &str,
    default: impl FnOnce() -> Vec<String>,
) -> Result<Vec<String>> {
    match resolved(doc, section, key)? {
        Some(_) => doc.get_list(section, key, ','),
        None => Ok(default()),
    }
}

fn bool_or(doc: &SpecDocument, section: &str, key: &str, default: bool) -> Result<bool> {
    match resolved(doc, section, key)? {
        Some(v) => parse_bool(section, key, &v),
        None => Ok(default),
    }
}

fn int_or(doc: &SpecDocument, section: &str, key: &str, default: u32) -> Result<u32> {
    match resolved(doc, section, key)? {
        Some(v) => v
            .parse::<u32>()
            .map_err(|_| Error::invalid_int(section, key, &v)),
        None => Ok(default),
    }
}

/// Boolean coercion accepted by the spec format family.
fn parse_bool(section: &str, key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" => Ok(false),
        _ => Err(Error::invalid_bool(section, key, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_empty_document_yields_defaults() {
        let doc = parse("[app]\n").unwrap();
        let profile = PackagingProfile::from_document(&doc).unwrap();
        assert_eq!(profile, PackagingProfile::default());
    }

    #[test]
    fn test_app_fields_read_from_document() {
        let doc = parse(concat!(
            "[app]\n",
            "title = Counter\n",
            "package.name = counter\n",
            "package.domain = com.acme\n",
            "version = 1.2.0\n",
            "requirements = python3, kivy, requests\n",
            "fullscreen = yes\n",
        ))
        .unwrap();
        let app = AppProfile::from_document(&doc).unwrap();
        assert_eq!(app.title, "Counter");
        assert_eq!(app.package_id(), "com.acme.counter");
        assert_eq!(app.requirements, ["python3", "kivy", "requests"]);
        assert!(app.fullscreen);
    }

    #[test]
    fn test_android_keys_live_in_app_section() {
        let doc = parse(concat!(
            "[app]\n",
            "android.api = 33\n",
            "android.permissions = INTERNET,VIBRATE\n",
            "android.allow_backup = off\n",
        ))
        .unwrap();
        let android = AndroidProfile::from_document(&doc).unwrap();
        assert_eq!(android.api, 33);
        assert_eq!(android.permissions, ["INTERNET", "VIBRATE"]);
        assert!(!android.allow_backup);
        assert_eq!(android.minapi, 21);
    }

    #[test]
    fn test_build_section_with_buildozer_fallback() {
        let doc = parse("[app]\n[buildozer]\nlog_level = 2\nwarn_on_root = 0\n").unwrap();
        let build = BuildProfile::from_document(&doc).unwrap();
        assert_eq!(build.log_level, 2);
        assert!(!build.warn_on_root);
    }

    #[test]
    fn test_bool_coercion_variants() {
        for value in ["1", "yes", "TRUE", "On"] {
            let doc = parse(&format!("[app]\nfullscreen = {value}\n")).unwrap();
            assert!(AppProfile::from_document(&doc).unwrap().fullscreen);
        }
        for value in ["0", "No", "false", "OFF"] {
            let doc = parse(&format!("[app]\nfullscreen = {value}\n")).unwrap();
            assert!(!AppProfile::from_document(&doc).unwrap().fullscreen);
        }
    }

    #[test]
    fn test_invalid_bool_rejected() {
        let doc = parse("[app]\nfullscreen = maybe\n").unwrap();
        let err = AppProfile::from_document(&doc).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidBool);
    }

    #[test]
    fn test_invalid_int_rejected() {
        let doc = parse("[app]\nandroid.api = thirty\n").unwrap();
        let err = AndroidProfile::from_document(&doc).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInt);
    }

    #[test]
    fn test_interpolated_value_resolves_through_schema() {
        let doc = parse("[app]\npackage.domain = org.kivy\ntitle = %(package.domain)s demo\n")
            .unwrap();
        let app = AppProfile::from_document(&doc).unwrap();
        assert_eq!(app.title, "org.kivy demo");
    }

    #[test]
    fn test_template_matches_defaults() {
        let doc = crate::template::default_document().unwrap();
        let profile = PackagingProfile::from_document(&doc).unwrap();
        assert_eq!(profile.android.api, 31);
        assert_eq!(profile.android.minapi, 21);
        assert_eq!(profile.app.requirements, ["python3", "kivy"]);
        assert_eq!(profile.build.log_level, 2);
    }
}
