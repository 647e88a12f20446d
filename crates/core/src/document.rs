//! Parsed spec document model
//!
//! A [`SpecDocument`] is an ordered sequence of named sections, each holding
//! ordered `key = value` entries. Documents are built once by the parser and
//! are read-only afterwards; the packaging keys themselves are opaque strings
//! at this layer.

use serde::Serialize;
use std::fmt;

use crate::error::{Error, Result};
use crate::interpolate::{self, Token};

/// A single `key = value` pair within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    key: String,
    raw: String,
}

impl Entry {
    /// The entry key. Dotted names like `android.permissions` carry no
    /// hierarchy; the dots are cosmetic.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw value, before interpolation.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// A named group of entries delimited by a `[name]` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    name: String,
    entries: Vec<Entry>,
}

impl Section {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Assign a key. A re-assignment overwrites the previous value in place,
    /// keeping the entry's original position.
    pub(crate) fn set(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        let key = key.into();
        let raw = raw.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.raw = raw,
            None => self.entries.push(Entry { key, raw }),
        }
    }

    /// The section name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in document order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Raw value lookup.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.raw.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the section has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An ordered, immutable collection of sections parsed from a spec file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SpecDocument {
    sections: Vec<Section>,
}

impl SpecDocument {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub(crate) fn last_section_mut(&mut self) -> Option<&mut Section> {
        self.sections.last_mut()
    }

    /// Sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Section names in document order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    /// Look up a section by name.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Whether a section exists.
    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Raw value of `key` in `section`, without interpolation.
    pub fn raw(&self, section: &str, key: &str) -> Result<&str> {
        let s = self
            .section(section)
            .ok_or_else(|| Error::no_such_section(section))?;
        s.raw(key).ok_or_else(|| Error::no_such_entry(section, key))
    }

    /// Resolved value of `key` in `section`.
    ///
    /// Every `%(other_key)s` placeholder is substituted with the resolved
    /// value of `other_key` from the same section; `%%` renders as `%`.
    /// Referencing an undefined key is a reference error; substitution
    /// deeper than [`interpolate::MAX_DEPTH`] levels fails, which also
    /// catches placeholder cycles.
    pub fn resolve(&self, section: &str, key: &str) -> Result<String> {
        let s = self
            .section(section)
            .ok_or_else(|| Error::no_such_section(section))?;
        let raw = s.raw(key).ok_or_else(|| Error::no_such_entry(section, key))?;
        let value = resolve_in(s, key, raw, 1)?;
        tracing::trace!(section, key, %value, "resolved");
        Ok(value)
    }

    /// Resolved value of `key` split on `delimiter`, each element trimmed,
    /// empty elements dropped.
    pub fn get_list(&self, section: &str, key: &str, delimiter: char) -> Result<Vec<String>> {
        let value = self.resolve(section, key)?;
        Ok(value
            .split(delimiter)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect())
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn resolve_in(section: &Section, key: &str, raw: &str, depth: usize) -> Result<String> {
    if depth > interpolate::MAX_DEPTH {
        return Err(Error::interpolation_depth(section.name(), key));
    }

    let mut out = String::new();
    for token in interpolate::tokenize(raw)? {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Percent => out.push('%'),
            Token::Placeholder(other) => {
                let other_raw = section
                    .raw(other)
                    .ok_or_else(|| Error::undefined_key(section.name(), other))?;
                out.push_str(&resolve_in(section, other, other_raw, depth + 1)?);
            }
        }
    }
    Ok(out)
}

/// Serialization. `parse(doc.to_string())` reproduces an equivalent document;
/// comments are not retained.
impl fmt::Display for SpecDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", section.name)?;
            for entry in &section.entries {
                writeln!(f, "{} = {}", entry.key, entry.raw)?;
            }
        }
        Ok(())
    }
}
