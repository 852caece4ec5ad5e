use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ballot_booth::{Election, WizardState};
use ballot_types::{BallotId, Candidate, Race, Timestamp, VoterRecord};

fn election(shape: &[usize]) -> Election {
    let races = shape
        .iter()
        .enumerate()
        .map(|(r, &count)| Race {
            id: format!("race-{r}"),
            title: format!("Race {r}"),
            description: String::new(),
            candidates: (0..count)
                .map(|c| Candidate {
                    id: format!("c-{r}-{c}"),
                    name: format!("Candidate {c}"),
                    party: "Independent".into(),
                    description: String::new(),
                    symbol: String::new(),
                })
                .collect(),
        })
        .collect();
    Election::new("Prop Election", races).unwrap()
}

fn eligible() -> VoterRecord {
    VoterRecord {
        name: "Asha Rao".into(),
        phone_number: "9876543210".into(),
        national_id: "123456789012".into(),
        date_of_birth: chrono::NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
        email: None,
        address: None,
        ballot_id: None,
        has_voted: false,
    }
}

fn start() -> WizardState {
    WizardState::RegistrationCheck
        .answer_registration_check(true)
        .unwrap()
        .identity_checked(Some(&eligible()))
        .unwrap()
}

proptest! {
    /// After k successful Next calls the ballot holds exactly k selections,
    /// and the final Next issues a well-formed ballot ID.
    #[test]
    fn next_accumulates_one_selection_per_race(
        shape in prop::collection::vec(2usize..5, 1..6),
        picks in prop::collection::vec(0usize..5, 6),
        seed in any::<u64>(),
    ) {
        let election = election(&shape);
        let mut rng = StdRng::seed_from_u64(seed);
        let now = Timestamp::new(1_730_817_025);
        let mut state = start();

        for (k, race) in election.races.iter().enumerate() {
            let candidate = &race.candidates[picks[k] % race.candidates.len()];
            state = state.select(&election, &race.id, &candidate.id).unwrap();
            state = state.next(&election, &mut rng, now).unwrap();
            match &state {
                WizardState::InProgress { index, ballot } => {
                    prop_assert_eq!(*index, k + 1);
                    prop_assert_eq!(ballot.len(), k + 1);
                }
                WizardState::Complete(done) => {
                    prop_assert_eq!(k + 1, election.len());
                    prop_assert_eq!(done.votes.len(), election.len());
                    prop_assert!(BallotId::parse(done.ballot_id.as_str()).is_ok());
                    prop_assert!(done.ballot_id.as_str().starts_with("VT-2024-"));
                }
                other => prop_assert!(false, "unexpected state {:?}", other),
            }
        }
        prop_assert!(matches!(state, WizardState::Complete(_)));
    }

    /// Stepping back never drops a selection.
    #[test]
    fn previous_keeps_selections(
        shape in prop::collection::vec(2usize..4, 2..6),
        back in 0usize..8,
    ) {
        let election = election(&shape);
        let mut rng = StdRng::seed_from_u64(0);
        let now = Timestamp::new(1_730_817_025);
        let mut state = start();

        // Fill every race but the last.
        for race in &election.races[..election.len() - 1] {
            state = state.select(&election, &race.id, &race.candidates[0].id).unwrap();
            state = state.next(&election, &mut rng, now).unwrap();
        }
        for _ in 0..back {
            state = state.previous();
        }
        let WizardState::InProgress { index, ballot } = &state else {
            panic!("left the voting stage");
        };
        prop_assert_eq!(*index, (election.len() - 1).saturating_sub(back));
        prop_assert_eq!(ballot.len(), election.len() - 1);
    }
}
