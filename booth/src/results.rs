//! Results display data and CSV export.
//!
//! The figures are static demo aggregates; no tallying happens anywhere in
//! the booth.

use ballot_types::Timestamp;
use serde::{Deserialize, Serialize};

pub const CSV_HEADER: &str = "Race,Candidate,Party,Votes,Percentage";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    /// Counting in progress.
    Live,
    Projected,
    Final,
}

impl ResultStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "Live",
            Self::Projected => "Projected",
            Self::Final => "Final",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub name: String,
    pub party: String,
    pub votes: u64,
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub title: String,
    pub total_votes: u64,
    pub status: ResultStatus,
    pub candidates: Vec<CandidateResult>,
}

impl RaceResult {
    /// The candidate with the most votes.
    pub fn leader(&self) -> Option<&CandidateResult> {
        self.candidates.iter().max_by_key(|c| c.votes)
    }
}

/// Headline numbers shown above the per-race breakdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultsSummary {
    pub total_votes_cast: u64,
    pub turnout_percent: f64,
    pub precincts_reporting: u32,
    pub precincts_total: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElectionResults {
    pub summary: ResultsSummary,
    pub races: Vec<RaceResult>,
}

fn result(name: &str, party: &str, votes: u64, percentage: f64) -> CandidateResult {
    CandidateResult {
        name: name.into(),
        party: party.into(),
        votes,
        percentage,
    }
}

impl ElectionResults {
    /// The demo results board.
    pub fn demo() -> Self {
        Self {
            summary: ResultsSummary {
                total_votes_cast: 2_847_329,
                turnout_percent: 73.4,
                precincts_reporting: 3_247,
                precincts_total: 3_892,
            },
            races: vec![
                RaceResult {
                    title: "President of India".into(),
                    total_votes: 2_847_329,
                    status: ResultStatus::Live,
                    candidates: vec![
                        result("Rajesh Kumar Sharma", "Indian National Congress", 1_423_665, 52.1),
                        result("Priya Patel", "Bharatiya Janata Party", 1_281_234, 44.2),
                        result("Arjun Singh", "Aam Aadmi Party", 142_430, 3.7),
                    ],
                },
                RaceResult {
                    title: "Chief Minister of State".into(),
                    total_votes: 2_654_891,
                    status: ResultStatus::Projected,
                    candidates: vec![
                        result("Sunita Devi", "Indian National Congress", 1_487_623, 56.0),
                        result("Vikram Reddy", "Bharatiya Janata Party", 1_167_268, 44.0),
                    ],
                },
                RaceResult {
                    title: "National Education Policy".into(),
                    total_votes: 2_789_156,
                    status: ResultStatus::Live,
                    candidates: vec![
                        result("YES", "Support", 1_672_894, 60.0),
                        result("NO", "Oppose", 1_116_262, 40.0),
                    ],
                },
            ],
        }
    }

    /// One CSV row per candidate; text columns are quoted.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);
        csv.push('\n');
        for race in &self.races {
            for candidate in &race.candidates {
                csv.push_str(&format!(
                    "{},{},{},{},{}\n",
                    quote(&race.title),
                    quote(&candidate.name),
                    quote(&candidate.party),
                    candidate.votes,
                    candidate.percentage
                ));
            }
        }
        csv
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// `election_results_<YYYY-MM-DD>.csv`
pub fn results_filename(now: Timestamp) -> String {
    format!("election_results_{}.csv", now.date().format("%Y-%m-%d"))
}
