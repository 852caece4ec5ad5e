use chrono::{Datelike, Days, NaiveDate};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ballot_utils::{compute_age, generate_ballot_id, is_digit_string};

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..60_000).prop_map(|days| {
        NaiveDate::from_ymd_opt(1900, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(days))
            .unwrap()
    })
}

proptest! {
    /// Age never decreases as the reference date moves forward.
    #[test]
    fn age_is_monotonic(birth in any_date(), offset in 0u64..40_000, step in 0u64..1_000) {
        let t1 = birth.checked_add_days(Days::new(offset)).unwrap();
        let t2 = t1.checked_add_days(Days::new(step)).unwrap();
        prop_assert!(compute_age(birth, t1) <= compute_age(birth, t2));
    }

    /// Age is the year difference, minus one before the birthday.
    #[test]
    fn age_matches_calendar(birth in any_date(), today in any_date()) {
        prop_assume!(today >= birth);
        let age = compute_age(birth, today);
        let diff = today.year() - birth.year();
        prop_assert!(age == diff || age == diff - 1);
        prop_assert!(age >= 0);
    }

    /// Only strings of exactly `len` ASCII digits pass.
    #[test]
    fn digit_string_matches_regex(value in "[0-9A-Za-z ]{0,14}", len in 0usize..14) {
        let expected = value.len() == len && value.bytes().all(|b| b.is_ascii_digit());
        prop_assert_eq!(is_digit_string(&value, len), expected);
    }

    /// Generated IDs always match VT-\d{4}-[A-Z0-9]{9}.
    #[test]
    fn generated_ids_are_well_formed(seed in any::<u64>(), year in 1000i32..=9999) {
        let id = generate_ballot_id(&mut StdRng::seed_from_u64(seed), year);
        let s = id.as_str();
        prop_assert_eq!(s.len(), 17);
        prop_assert!(s.starts_with("VT-"));
        prop_assert!(s[3..7].bytes().all(|b| b.is_ascii_digit()));
        prop_assert_eq!(&s[7..8], "-");
        prop_assert!(s[8..].bytes().all(|b| b.is_ascii_digit() || b.is_ascii_uppercase()));
    }
}
