//! Case-insensitive identifier keys.
//!
//! Logo identifiers compare case-insensitively: `make "X 1` and
//! `pr :x` address the same variable. A [`Name`] keeps the spelling
//! the user wrote but folds for equality, hashing and ordering, so a
//! single key type serves every variable and procedure table in the
//! interpreter and ordered iteration stays deterministic.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use smol_str::SmolStr;

/// An identifier key: as-written spelling, case-folded identity.
#[derive(Debug, Clone)]
pub struct Name {
    display: SmolStr,
    folded: SmolStr,
}

impl Name {
    pub fn new(name: &str) -> Self {
        Self {
            display: SmolStr::new(name),
            folded: SmolStr::new(name.to_ascii_lowercase()),
        }
    }

    /// The spelling the identifier was first written with.
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// The folded form used for comparisons.
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded.cmp(&other.folded)
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}
