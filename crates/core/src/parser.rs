//! Single-pass spec file parser
//!
//! Transforms the line-oriented spec format into a [`SpecDocument`]:
//! `[name]` headers open sections, `key = value` lines assign entries,
//! `#`/`;` lines are comments, blank lines are ignored. Parsing is fatal on
//! the first malformed line and never returns a partial document.

use crate::document::{Section, SpecDocument};
use crate::error::{Error, ErrorCode, Result};
use crate::interpolate;

/// Parse spec text into a document.
///
/// Both `\n` and `\r\n` line endings are accepted. Errors carry the 1-based
/// line number of the offending line. Placeholder syntax inside values is
/// checked eagerly here; whether a placeholder's target key exists is only
/// decided at resolution time.
pub fn parse(text: &str) -> Result<SpecDocument> {
    let mut doc = SpecDocument::new();

    for (idx, raw_line) in text.lines().enumerate() {
        let lineno = idx + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            let name = parse_section_header(line)
                .ok_or_else(|| Error::bad_section_header(lineno, line))?;
            if doc.has_section(name) {
                return Err(Error::duplicate_section(lineno, name));
            }
            doc.push_section(Section::new(name));
            continue;
        }

        let Some(eq) = line.find('=') else {
            return Err(Error::malformed_line(lineno, line));
        };
        let key = line[..eq].trim();
        let value = line[eq + 1..].trim();
        if key.is_empty() {
            return Err(
                Error::new(ErrorCode::MalformedLine, "Assignment with an empty key")
                    .at_line(lineno),
            );
        }

        let Some(section) = doc.last_section_mut() else {
            return Err(Error::assignment_outside_section(lineno, key));
        };

        interpolate::check_syntax(value).map_err(|e| e.at_line(lineno))?;
        section.set(key, value);
    }

    tracing::debug!(
        sections = doc.len(),
        entries = doc.sections().map(Section::len).sum::<usize>(),
        "parsed spec document"
    );
    Ok(doc)
}

/// Extract the section name from a trimmed `[name]` line, or `None` if the
/// header is malformed (missing `]`, trailing text, empty name).
fn parse_section_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let close = rest.find(']')?;
    if !rest[close + 1..].trim().is_empty() {
        return None;
    }
    let name = rest[..close].trim();
    if name.is_empty() { None } else { Some(name) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_document() {
        let doc = parse("[app]\ntitle = X\nversion = 1.0.0").unwrap();
        assert_eq!(doc.len(), 1);
        let app = doc.section("app").unwrap();
        assert_eq!(app.len(), 2);
        assert_eq!(app.raw("title"), Some("X"));
        assert_eq!(app.raw("version"), Some("1.0.0"));
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let doc = parse(concat!(
            "# build configuration\n",
            "\n",
            "[app]\n",
            "   # indented comment\n",
            "; alternative comment prefix\n",
            "title = Counter\n",
        ))
        .unwrap();
        assert_eq!(doc.section("app").unwrap().len(), 1);
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = parse("[app]\r\ntitle = Counter\r\n").unwrap();
        assert_eq!(doc.raw("app", "title").unwrap(), "Counter");
    }

    #[test]
    fn test_whitespace_trimmed_around_key_and_value() {
        let doc = parse("[app]\n   title   =   Counter App   \n").unwrap();
        assert_eq!(doc.raw("app", "title").unwrap(), "Counter App");
    }

    #[test]
    fn test_value_may_contain_equals() {
        let doc = parse("[app]\nextra = a=b=c\n").unwrap();
        assert_eq!(doc.raw("app", "extra").unwrap(), "a=b=c");
    }

    #[test]
    fn test_empty_value() {
        let doc = parse("[app]\npresplash.filename =\n").unwrap();
        assert_eq!(doc.raw("app", "presplash.filename").unwrap(), "");
    }

    #[test]
    fn test_section_name_trimmed() {
        let doc = parse("[ app ]\ntitle = X\n").unwrap();
        assert!(doc.has_section("app"));
    }

    #[test]
    fn test_assignment_before_section_fails() {
        let err = parse("title = X\n[app]\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::AssignmentOutsideSection);
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn test_malformed_line_fails() {
        let err = parse("[app]\nthis is not an assignment\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedLine);
        assert_eq!(err.line, Some(2));
    }

    #[test]
    fn test_empty_key_fails() {
        let err = parse("[app]\n= value\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedLine);
    }

    #[test]
    fn test_unterminated_section_header_fails() {
        let err = parse("[app\ntitle = X\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::BadSectionHeader);
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn test_trailing_text_after_header_fails() {
        let err = parse("[app] extra\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::BadSectionHeader);
    }

    #[test]
    fn test_empty_section_name_fails() {
        let err = parse("[]\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::BadSectionHeader);
    }

    #[test]
    fn test_duplicate_section_fails() {
        let err = parse("[app]\ntitle = X\n[app]\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateSection);
        assert_eq!(err.line, Some(3));
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let doc = parse("[app]\ntitle = First\ntitle = Second\n").unwrap();
        assert_eq!(doc.raw("app", "title").unwrap(), "Second");
        assert_eq!(doc.section("app").unwrap().len(), 1);
    }

    #[test]
    fn test_bad_placeholder_reported_with_line() {
        let err = parse("[app]\nicon = %(source.dir\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::BadPlaceholder);
        assert_eq!(err.line, Some(2));
    }

    #[test]
    fn test_multiple_sections() {
        let doc = parse(concat!(
            "[app]\n",
            "title = Counter\n",
            "\n",
            "[build]\n",
            "log_level = 2\n",
        ))
        .unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.raw("build", "log_level").unwrap(), "2");
    }
}
