//! Ballots and ballot identifiers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::TypeError;

/// A ballot identifier of the form `VT-<year>-<9 uppercase alphanumerics>`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BallotId(String);

impl BallotId {
    pub const PREFIX: &'static str = "VT-";
    /// Length of the random suffix.
    pub const SUFFIX_LEN: usize = 9;

    /// Parse user input: surrounding whitespace is trimmed and the value is
    /// upper-cased before the shape is checked.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let normalized = raw.trim().to_ascii_uppercase();
        if Self::is_well_formed(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(TypeError::InvalidBallotId(raw.trim().to_string()))
        }
    }

    /// Assemble an ID from its year and random suffix.
    pub fn from_parts(year: i32, suffix: &str) -> Result<Self, TypeError> {
        Self::parse(&format!("{}{:04}-{}", Self::PREFIX, year, suffix))
    }

    fn is_well_formed(s: &str) -> bool {
        let Some(rest) = s.strip_prefix(Self::PREFIX) else {
            return false;
        };
        let Some((year, suffix)) = rest.split_once('-') else {
            return false;
        };
        year.len() == 4
            && year.bytes().all(|b| b.is_ascii_digit())
            && suffix.len() == Self::SUFFIX_LEN
            && suffix
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BallotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BallotId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<BallotId> for String {
    fn from(id: BallotId) -> Self {
        id.0
    }
}

/// One voter's selections: race id -> candidate id.
///
/// Held client-side only; it never carries voter identity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    selections: BTreeMap<String, String>,
}

impl Ballot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) the selection for a race.
    pub fn select(&mut self, race_id: impl Into<String>, candidate_id: impl Into<String>) {
        self.selections.insert(race_id.into(), candidate_id.into());
    }

    pub fn selection(&self, race_id: &str) -> Option<&str> {
        self.selections.get(race_id).map(String::as_str)
    }

    pub fn contains(&self, race_id: &str) -> bool {
        self.selections.contains_key(race_id)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
