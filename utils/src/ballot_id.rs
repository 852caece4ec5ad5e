//! Ballot ID generation.
//!
//! IDs come from a caller-supplied, non-cryptographic RNG and are not
//! checked for collisions; uniqueness is only probabilistic.

use ballot_types::BallotId;
use rand::Rng;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate `VT-<year>-<9 uppercase alphanumerics>`.
pub fn generate_ballot_id<R: Rng + ?Sized>(rng: &mut R, year: i32) -> BallotId {
    let suffix: String = (0..BallotId::SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    let year = year.clamp(1000, 9999);
    match BallotId::from_parts(year, &suffix) {
        Ok(id) => id,
        // Year is clamped to four digits and the suffix is drawn from the
        // accepted alphabet, so assembly cannot fail.
        Err(e) => unreachable!("generated ballot ID rejected: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn generated_id_has_expected_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_ballot_id(&mut rng, 2024);
        let s = id.as_str();
        assert!(s.starts_with("VT-2024-"));
        assert_eq!(s.len(), "VT-2024-".len() + 9);
    }

    #[test]
    fn same_seed_same_id() {
        let a = generate_ballot_id(&mut StdRng::seed_from_u64(42), 2025);
        let b = generate_ballot_id(&mut StdRng::seed_from_u64(42), 2025);
        assert_eq!(a, b);
    }
}
