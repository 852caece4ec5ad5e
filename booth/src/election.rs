//! Election configuration: the fixed, ordered list of races on the ballot.

use std::collections::HashSet;
use std::path::Path;

use ballot_types::{Candidate, Race};
use serde::{Deserialize, Serialize};

use crate::BoothError;

/// The races a voter steps through, in wizard order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Election {
    #[serde(default = "default_name")]
    pub name: String,
    pub races: Vec<Race>,
}

fn default_name() -> String {
    "General Election".to_string()
}

impl Election {
    /// Build and validate an election from a list of races.
    pub fn new(name: impl Into<String>, races: Vec<Race>) -> Result<Self, BoothError> {
        let election = Self {
            name: name.into(),
            races,
        };
        election.validate()?;
        Ok(election)
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, BoothError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, BoothError> {
        let election: Self = toml::from_str(s).map_err(|e| BoothError::Election(e.to_string()))?;
        election.validate()?;
        Ok(election)
    }

    /// Check structural rules: at least one race, unique race ids, at least
    /// two candidates per race, unique candidate ids within a race.
    pub fn validate(&self) -> Result<(), BoothError> {
        if self.races.is_empty() {
            return Err(BoothError::Election("election has no races".into()));
        }
        let mut race_ids = HashSet::new();
        for race in &self.races {
            if !race_ids.insert(race.id.as_str()) {
                return Err(BoothError::Election(format!("duplicate race id '{}'", race.id)));
            }
            if race.candidates.len() < 2 {
                return Err(BoothError::Election(format!(
                    "race '{}' needs at least two options",
                    race.id
                )));
            }
            let mut candidate_ids = HashSet::new();
            for candidate in &race.candidates {
                if !candidate_ids.insert(candidate.id.as_str()) {
                    return Err(BoothError::Election(format!(
                        "duplicate candidate id '{}' in race '{}'",
                        candidate.id, race.id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn race(&self, race_id: &str) -> Option<&Race> {
        self.races.iter().find(|r| r.id == race_id)
    }

    pub fn len(&self) -> usize {
        self.races.len()
    }

    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }
}

fn candidate(id: &str, name: &str, party: &str, description: &str, symbol: &str) -> Candidate {
    Candidate {
        id: id.into(),
        name: name.into(),
        party: party.into(),
        description: description.into(),
        symbol: symbol.into(),
    }
}

impl Default for Election {
    /// The demo ballot: two office contests and one referendum.
    fn default() -> Self {
        Self {
            name: default_name(),
            races: vec![
                Race {
                    id: "president".into(),
                    title: "President of India".into(),
                    description: "Choose one candidate for President".into(),
                    candidates: vec![
                        candidate(
                            "candidate-1",
                            "Rajesh Kumar Sharma",
                            "Indian National Congress",
                            "Former Chief Minister focused on education and rural development",
                            "congress-symbol.png",
                        ),
                        candidate(
                            "candidate-2",
                            "Priya Patel",
                            "Bharatiya Janata Party",
                            "Business leader advocating for economic growth and digital India",
                            "bjp-symbol.png",
                        ),
                        candidate(
                            "candidate-3",
                            "Arjun Singh",
                            "Aam Aadmi Party",
                            "Reform candidate focused on anti-corruption and transparency",
                            "aap-symbol.png",
                        ),
                    ],
                },
                Race {
                    id: "chief-minister".into(),
                    title: "Chief Minister of State".into(),
                    description: "Choose one candidate for Chief Minister".into(),
                    candidates: vec![
                        candidate(
                            "cm-1",
                            "Sunita Devi",
                            "Indian National Congress",
                            "Former MLA with focus on infrastructure and women's empowerment",
                            "congress-symbol.png",
                        ),
                        candidate(
                            "cm-2",
                            "Vikram Reddy",
                            "Bharatiya Janata Party",
                            "Business leader advocating for industrial development",
                            "bjp-symbol.png",
                        ),
                    ],
                },
                Race {
                    id: "referendum-1".into(),
                    title: "National Education Policy".into(),
                    description: "Should the government increase education funding by ₹50,000 crore annually?".into(),
                    candidates: vec![
                        candidate(
                            "ref-yes",
                            "YES",
                            "Support",
                            "Increase funding for government schools and universities",
                            "yes-symbol.png",
                        ),
                        candidate(
                            "ref-no",
                            "NO",
                            "Oppose",
                            "Maintain current funding levels",
                            "no-symbol.png",
                        ),
                    ],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_election_is_valid() {
        let election = Election::default();
        election.validate().unwrap();
        assert_eq!(election.len(), 3);
        assert_eq!(election.races[0].id, "president");
    }

    #[test]
    fn parses_toml() {
        let toml = r#"
            name = "Ward Election"

            [[races]]
            id = "mayor"
            title = "Mayor"
            description = "Choose one"

            [[races.candidates]]
            id = "a"
            name = "Anita"
            party = "Independent"

            [[races.candidates]]
            id = "b"
            name = "Bala"
            party = "Civic Party"
        "#;
        let election = Election::from_toml_str(toml).unwrap();
        assert_eq!(election.name, "Ward Election");
        assert_eq!(election.race("mayor").unwrap().candidates.len(), 2);
    }

    #[test]
    fn rejects_single_option_race() {
        let mut election = Election::default();
        election.races[1].candidates.truncate(1);
        assert!(matches!(election.validate(), Err(BoothError::Election(_))));
    }

    #[test]
    fn rejects_duplicate_race_ids() {
        let mut election = Election::default();
        election.races[2].id = "president".into();
        assert!(matches!(election.validate(), Err(BoothError::Election(_))));
    }

    #[test]
    fn rejects_empty_election() {
        assert!(Election::from_toml_str("races = []").is_err());
    }
}
