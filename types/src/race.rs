//! Races and candidates, as defined by the election configuration.

use serde::{Deserialize, Serialize};

/// A single decision item: an office contest or a referendum question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Ordered options; at least two.
    pub candidates: Vec<Candidate>,
}

impl Race {
    pub fn candidate(&self, candidate_id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == candidate_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    /// Party for office contests, "Support"/"Oppose" for referendums.
    pub party: String,
    #[serde(default)]
    pub description: String,
    /// Reference to the ballot symbol artwork.
    #[serde(default)]
    pub symbol: String,
}

impl Candidate {
    /// Display label, e.g. `Priya Patel (Bharatiya Janata Party)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.party)
    }
}
