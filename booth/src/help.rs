//! Static help content: FAQ and support channels.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SupportChannel {
    pub title: &'static str,
    pub description: &'static str,
    pub contact: &'static str,
    pub action: &'static str,
}

pub const FAQ: &[FaqEntry] = &[
    FaqEntry {
        question: "How do I register to vote?",
        answer: "Run `ballot register` with your name, date of birth, 12-digit national ID and 10-digit phone number, and accept the terms. You must be at least 18 years old.",
    },
    FaqEntry {
        question: "Is online voting secure?",
        answer: "Your ballot is stored against a ballot ID with no link from the ID back to your individual selections once the session ends.",
    },
    FaqEntry {
        question: "Can I change my vote after submitting?",
        answer: "No, once your ballot is cast and confirmed it cannot be changed. Review your choices carefully before submitting the final race.",
    },
    FaqEntry {
        question: "How do I verify my vote was counted?",
        answer: "Use your ballot ID (provided after voting) with `ballot verify`. This confirms your vote is on record and lets you export a certificate.",
    },
    FaqEntry {
        question: "What if I lose my ballot ID?",
        answer: "Run `ballot recover` with the name and phone number you registered with. Recovery works once your vote has been recorded.",
    },
    FaqEntry {
        question: "When are results available?",
        answer: "Preliminary results are available in real-time as votes are counted. Final, certified results are typically available within 24-48 hours after polls close.",
    },
    FaqEntry {
        question: "What platforms are supported?",
        answer: "The `ballot` tool runs on Linux, macOS and Windows. Point it at a local directory or a hosted one through the configuration file.",
    },
    FaqEntry {
        question: "Can I vote from more than one device?",
        answer: "You can start a session anywhere, but each registered voter can cast exactly one ballot. Identity verification refuses voters who have already voted.",
    },
];

pub const SUPPORT_CHANNELS: &[SupportChannel] = &[
    SupportChannel {
        title: "Phone Support",
        description: "24/7 voting assistance",
        contact: "1-800-VOTE-NOW",
        action: "Call Now",
    },
    SupportChannel {
        title: "Email Support",
        description: "Response within 2 hours",
        contact: "support@securevote.gov",
        action: "Send Email",
    },
    SupportChannel {
        title: "Live Chat",
        description: "Instant help available",
        contact: "Available 24/7",
        action: "Start Chat",
    },
];

/// FAQ entries whose question or answer contains `term` (case-insensitive).
/// An empty term matches everything.
pub fn search_faq(term: &str) -> Vec<&'static FaqEntry> {
    let needle = term.trim().to_lowercase();
    FAQ.iter()
        .filter(|entry| {
            needle.is_empty()
                || entry.question.to_lowercase().contains(&needle)
                || entry.answer.to_lowercase().contains(&needle)
        })
        .collect()
}
