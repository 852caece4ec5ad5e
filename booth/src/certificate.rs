//! Plain-text verification certificate.

use ballot_types::{BallotId, Timestamp};

use crate::verification::{VerificationRecord, VerificationStatus};

/// `Vote-Certificate-<ballotId>.txt`
pub fn certificate_filename(ballot_id: &BallotId) -> String {
    format!("Vote-Certificate-{ballot_id}.txt")
}

/// Render the certificate offered for download after verification.
pub fn render_certificate(record: &VerificationRecord, generated_at: Timestamp) -> String {
    let cast_at = record
        .cast_at
        .map(|ts| ts.to_human())
        .unwrap_or_else(|| "not retained".to_string());
    let mut lines = vec![
        "OFFICIAL VOTE VERIFICATION CERTIFICATE".to_string(),
        "======================================".to_string(),
        String::new(),
        format!("Ballot ID: {}", record.ballot_id),
        format!("Timestamp: {cast_at}"),
        format!("Status: {}", record.status.as_str().to_uppercase()),
        String::new(),
        "RECORDED VOTES:".to_string(),
    ];

    match record.status {
        VerificationStatus::Verified => {
            for (i, race) in record.races.iter().enumerate() {
                lines.push(String::new());
                lines.push(format!("{}. {}", i + 1, race.title));
                lines.push(format!("   Selection: {}", race.selection));
                let verified = if race.verified { "YES" } else { "NO" };
                lines.push(format!("   Verified: {verified}"));
            }
        }
        VerificationStatus::DetailsUnavailable => {
            lines.push(String::new());
            lines.push(
                "Your vote is on record. Individual selections are not retained after the voting session."
                    .to_string(),
            );
        }
    }

    lines.push(String::new());
    lines.push("This certificate confirms that your vote was recorded.".to_string());
    lines.push(String::new());
    lines.push(format!("Generated: {}", generated_at.to_human()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::RaceVerification;

    fn record(status: VerificationStatus) -> VerificationRecord {
        VerificationRecord {
            ballot_id: BallotId::parse("VT-2024-ABC123XYZ").unwrap(),
            cast_at: Some(Timestamp::new(1_730_817_025)),
            verified_at: Timestamp::new(1_730_817_100),
            status,
            races: vec![RaceVerification {
                title: "President of India".into(),
                selection: "Arjun Singh (Aam Aadmi Party)".into(),
                verified: true,
            }],
        }
    }

    #[test]
    fn filename_uses_ballot_id() {
        let id = BallotId::parse("VT-2024-ABC123XYZ").unwrap();
        assert_eq!(certificate_filename(&id), "Vote-Certificate-VT-2024-ABC123XYZ.txt");
    }

    #[test]
    fn verified_certificate_lists_races() {
        let text = render_certificate(&record(VerificationStatus::Verified), Timestamp::new(0));
        assert!(text.starts_with("OFFICIAL VOTE VERIFICATION CERTIFICATE\n"));
        assert!(text.contains("Status: VERIFIED\n"));
        assert!(text.contains("1. President of India\n   Selection: Arjun Singh (Aam Aadmi Party)\n   Verified: YES"));
        assert!(text.ends_with("Generated: 1970-01-01 00:00:00 UTC"));
    }

    #[test]
    fn placeholder_certificate_layout() {
        let mut r = record(VerificationStatus::DetailsUnavailable);
        r.cast_at = None;
        r.races.clear();
        let text = render_certificate(&r, Timestamp::new(0));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[3], "Ballot ID: VT-2024-ABC123XYZ");
        assert_eq!(lines[4], "Timestamp: not retained");
        assert_eq!(lines[5], "Status: VERIFIED (DETAILS UNAVAILABLE)");
        assert_eq!(lines.len(), 14);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn placeholder_certificate_omits_races() {
        let text = render_certificate(
            &record(VerificationStatus::DetailsUnavailable),
            Timestamp::new(0),
        );
        assert!(!text.contains("1. President of India"));
        assert!(text.contains("not retained after the voting session"));
    }
}
