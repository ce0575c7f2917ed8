//! Note element
//!
//! A note is the text of an inline `;` comment attached to a transaction or
//! posting. Notes own a map of parsed tags; populating it is reserved for a
//! later tag-extraction pass, so the map is empty today.

use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub text: String,
    tags: BTreeMap<String, String>,
}

impl Note {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: BTreeMap::new(),
        }
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Note('{}')", self.text)
    }
}
