//! Localized UI strings loaded from embedded JSON tables.
//!
//! Lookups never fail: a missing key renders as the key itself so a gap in
//! a table shows up on screen instead of an empty label.

#[cfg(test)]
#[path = "strings_test.rs"]
mod strings_test;

use std::collections::HashMap;

const ENGLISH: &str = include_str!("../../strings/en.json");

/// Languages with an embedded string table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    English,
}

impl Language {
    fn table(self) -> &'static str {
        match self {
            Self::English => ENGLISH,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Strings {
    table: HashMap<String, String>,
}

impl Strings {
    /// Load the table for `language`. A malformed table loads as empty.
    #[must_use]
    pub fn load(language: Language) -> Self {
        Self::parse(language.table())
    }

    fn parse(raw: &str) -> Self {
        match serde_json::from_str::<HashMap<String, String>>(raw) {
            Ok(table) => Self { table },
            Err(_e) => {
                #[cfg(feature = "hydrate")]
                log::warn!("string table failed to parse: {_e}");
                Self::default()
            }
        }
    }

    /// String for `key`, or `key` itself when the table has no entry.
    #[must_use]
    pub fn get_or_default(&self, key: &str) -> String {
        self.table.get(key).cloned().unwrap_or_else(|| key.to_owned())
    }
}
