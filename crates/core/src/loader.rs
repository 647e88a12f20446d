//! Spec file loading
//!
//! Finds and reads a spec file from disk and hands the text to the parser.
//! The document is read once per invocation and immutable afterwards.

use std::path::{Path, PathBuf};

use crate::document::SpecDocument;
use crate::error::{Error, Result, ResultExt};
use crate::parser;

/// Spec file names probed in the working directory, in order. The buildozer
/// name is accepted so existing projects work without renaming their spec.
pub const SPEC_FILE_CANDIDATES: &[&str] = &["apkspec.spec", "buildozer.spec"];

/// A parsed spec document together with the path it came from.
#[derive(Debug, Clone)]
pub struct SpecFile {
    pub document: SpecDocument,
    pub path: PathBuf,
}

impl SpecFile {
    /// Load a spec from an explicit path, or search the working directory
    /// for one of [`SPEC_FILE_CANDIDATES`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => find_spec_file().ok_or_else(Error::spec_not_found)?,
        };
        let document = load_spec_file(&path)?;
        Ok(Self { document, path })
    }
}

/// Find a spec file in the working directory, probing the standard names.
pub fn find_spec_file() -> Option<PathBuf> {
    for candidate in SPEC_FILE_CANDIDATES {
        let path = Path::new(candidate);
        if path.exists() {
            tracing::debug!(path = %path.display(), "found spec file");
            return Some(path.to_path_buf());
        }
    }
    None
}

/// Read and parse a spec file.
fn load_spec_file(path: &Path) -> Result<SpecDocument> {
    if !path.exists() {
        return Err(Error::file_not_found(path));
    }
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read {}", path.display()))?;

    parser::parse(&content).context(format!("While parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::fs;

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.spec");
        fs::write(&path, "[app]\ntitle = Counter\n").unwrap();

        let spec = SpecFile::load(Some(&path)).unwrap();
        assert_eq!(spec.path, path);
        assert_eq!(spec.document.raw("app", "title").unwrap(), "Counter");
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = SpecFile::load(Some(Path::new("/nonexistent/apkspec.spec"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn test_parse_error_carries_path_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.spec");
        fs::write(&path, "title = X\n").unwrap();

        let err = SpecFile::load(Some(&path)).unwrap_err();
        assert_eq!(err.code, ErrorCode::AssignmentOutsideSection);
        assert!(err.context.as_deref().unwrap().contains("broken.spec"));
    }

    #[test]
    fn test_find_spec_file_prefers_apkspec_name() {
        let dir = tempfile::tempdir().unwrap();
        let prev = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        assert!(find_spec_file().is_none());

        fs::write("buildozer.spec", "[app]\n").unwrap();
        assert_eq!(find_spec_file().unwrap(), Path::new("buildozer.spec"));

        fs::write("apkspec.spec", "[app]\n").unwrap();
        assert_eq!(find_spec_file().unwrap(), Path::new("apkspec.spec"));

        std::env::set_current_dir(prev).unwrap();
    }
}
