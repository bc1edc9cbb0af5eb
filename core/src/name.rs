//! Canonical element names and the lookup keys derived from them
//!
//! An [`ElementName`] is the name exactly as the schema stores it
//! ("named thing", "RNA product"). Raw user input and display strings are
//! plain `String`s; the only ways between the two are name resolution and
//! display formatting.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Canonical, unformatted name of a schema element
///
/// Cheap to clone; the text is shared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementName(Arc<str>);

impl ElementName {
    /// Wrap a canonical name
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// Borrow the canonical text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lookup key with case, underscores and repeated whitespace folded away
    #[must_use]
    pub fn folded_key(&self) -> String {
        fold_key(&self.0)
    }
}

impl fmt::Display for ElementName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ElementName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ElementName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ElementName {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ElementName {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl From<&str> for ElementName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ElementName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

/// Fold a name for case- and separator-insensitive lookup
///
/// Lowercases, treats `_` as a space, trims and collapses whitespace runs:
/// `"RNA Product"`, `"rna_product"` and `" rna  product "` all fold to
/// `"rna product"`.
#[must_use]
pub fn fold_key(input: &str) -> String {
    input
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fold a name down to its lowercase alphanumeric characters
///
/// Lets display forms such as `GeneOrGeneProduct`, `related_to` or
/// `NonCodingRna` find "non-coding RNA" and friends again.
#[must_use]
pub fn compact_key(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}
