//! Subcommands and their terminal rendering.

use std::collections::HashMap;

use anyhow::Context;
use ballot_booth::certificate::{certificate_filename, render_certificate};
use ballot_booth::export::write_export;
use ballot_booth::help::{search_faq, SUPPORT_CHANNELS};
use ballot_booth::results::{results_filename, ElectionResults};
use ballot_booth::{
    recover_ballot_id, verify_ballot, BoothError, CompletedBallot, Election, RegistrationForm,
    VerificationRecord, VerificationStatus, VotingSession,
};
use ballot_store::VoterDirectory;
use ballot_types::{PostalAddress, Timestamp};

use crate::config::BoothConfig;

#[derive(clap::Subcommand)]
pub enum Command {
    /// Register a new voter.
    Register {
        #[arg(long)]
        name: String,
        /// Date of birth, YYYY-MM-DD.
        #[arg(long)]
        dob: String,
        /// 12-digit national ID.
        #[arg(long)]
        national_id: String,
        /// 10-digit phone number.
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, requires_all = ["city", "state", "zip"])]
        street: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        zip: Option<String>,
        /// Accept the terms and conditions.
        #[arg(long)]
        agree: bool,
    },

    /// Verify identity and cast a ballot.
    Vote {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        /// One selection per race, as RACE_ID=CANDIDATE_ID. Repeatable.
        #[arg(long = "choice", value_parser = parse_choice)]
        choices: Vec<(String, String)>,
        /// Also export the verification certificate.
        #[arg(long)]
        certificate: bool,
    },

    /// Look up a ballot by ID.
    Verify {
        ballot_id: String,
        /// Export the verification certificate.
        #[arg(long)]
        certificate: bool,
    },

    /// Recover a lost ballot ID.
    Recover {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
    },

    /// Show election results.
    Results {
        /// Export the results as CSV.
        #[arg(long)]
        export: bool,
    },

    /// Frequently asked questions and support contacts.
    Help {
        /// Only show questions containing this text.
        #[arg(long)]
        search: Option<String>,
    },
}

impl Command {
    pub fn needs_directory(&self) -> bool {
        !matches!(self, Self::Results { .. } | Self::Help { .. })
    }
}

fn parse_choice(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((race, candidate)) if !race.trim().is_empty() && !candidate.trim().is_empty() => {
            Ok((race.trim().to_string(), candidate.trim().to_string()))
        }
        _ => Err(format!("expected RACE_ID=CANDIDATE_ID, got '{s}'")),
    }
}

pub fn run_offline(command: Command, config: &BoothConfig) -> anyhow::Result<()> {
    match command {
        Command::Results { export } => {
            let results = ElectionResults::demo();
            print_results(&results);
            if export {
                let path = write_export(
                    &config.export_dir,
                    &results_filename(Timestamp::now()),
                    &results.to_csv(),
                )?;
                println!("\nResults exported to {}", path.display());
            }
        }
        Command::Help { search } => print_help(search.as_deref().unwrap_or("")),
        _ => anyhow::bail!("command needs a voter directory"),
    }
    Ok(())
}

pub async fn run<D: VoterDirectory>(
    command: Command,
    directory: &D,
    election: &Election,
    config: &BoothConfig,
) -> anyhow::Result<()> {
    match command {
        Command::Register {
            name,
            dob,
            national_id,
            phone,
            email,
            street,
            city,
            state,
            zip,
            agree,
        } => {
            let address = match (street, city, state, zip) {
                (Some(street), Some(city), Some(state), Some(zip_code)) => Some(PostalAddress {
                    street,
                    city,
                    state,
                    zip_code,
                }),
                _ => None,
            };
            let form = RegistrationForm {
                name,
                date_of_birth: dob,
                national_id,
                phone_number: phone,
                email,
                address,
                agreed: agree,
            };
            let record = form.submit(directory, Timestamp::now().date()).await?;
            println!("Registration successful. Welcome, {}.", record.name);
            println!("You can now vote with `ballot vote --name ... --phone ...`.");
        }

        Command::Vote {
            name,
            phone,
            choices,
            certificate,
        } => {
            let choices: HashMap<String, String> = choices.into_iter().collect();
            let completed = cast(directory, election.clone(), &name, &phone, &choices).await?;
            print_receipt(&completed);
            if certificate {
                let record = verify_ballot(
                    directory,
                    completed.ballot_id.as_str(),
                    Some(&completed),
                    Timestamp::now(),
                )
                .await?;
                export_certificate(&record, config)?;
            }
        }

        Command::Verify {
            ballot_id,
            certificate,
        } => {
            let record = verify_ballot(directory, &ballot_id, None, Timestamp::now()).await?;
            print_verification(&record);
            if certificate {
                export_certificate(&record, config)?;
            }
        }

        Command::Recover { name, phone } => {
            let ballot_id = recover_ballot_id(directory, &name, &phone).await?;
            println!("Your ballot ID: {ballot_id}");
        }

        Command::Results { .. } | Command::Help { .. } => return run_offline(command, config),
    }
    Ok(())
}

/// Drive one voting session from identity check to a recorded ballot.
async fn cast<D: VoterDirectory>(
    directory: &D,
    election: Election,
    name: &str,
    phone: &str,
    choices: &HashMap<String, String>,
) -> anyhow::Result<CompletedBallot> {
    let mut session = VotingSession::new(election);
    session.answer_registration_check(true)?;
    session
        .verify_identity(directory, name, phone)
        .await
        .map_err(|e| match e {
            BoothError::NotRegistered => {
                anyhow::anyhow!("{e}. Register first with `ballot register`.")
            }
            other => other.into(),
        })?;

    let mut rng = rand::thread_rng();
    while let Some(race) = session.current_race() {
        let race_id = race.id.clone();
        tracing::debug!(race = %race_id, progress = ?session.progress_percent(), "voting");
        if let Some(candidate) = choices.get(&race_id) {
            session.select(&race_id, candidate)?;
        }
        session
            .next(&mut rng, Timestamp::now())
            .with_context(|| format!("pass --choice {race_id}=<candidate>"))?;
    }

    match session.record_completion(directory).await {
        Ok(()) => {}
        Err(BoothError::AlreadyVoted) => {
            anyhow::bail!("ballot rejected: a vote for this voter was already recorded")
        }
        Err(e) => {
            // The ballot ID is still shown; verification will not find it
            // until the directory acknowledges the vote.
            tracing::error!(error = %e, "vote not recorded");
            eprintln!("warning: your vote could not be recorded yet ({e})");
        }
    }
    session
        .into_completed()
        .context("voting session ended without a completed ballot")
}

fn export_certificate(record: &VerificationRecord, config: &BoothConfig) -> anyhow::Result<()> {
    let text = render_certificate(record, Timestamp::now());
    let path = write_export(
        &config.export_dir,
        &certificate_filename(&record.ballot_id),
        &text,
    )?;
    println!("\nCertificate saved to {}", path.display());
    Ok(())
}

fn print_receipt(completed: &CompletedBallot) {
    println!("Vote cast successfully.");
    println!();
    println!("Ballot ID: {}", completed.ballot_id);
    println!("Cast at:   {}", completed.timestamp.to_human());
    println!();
    for (race, candidate) in completed.selections() {
        let choice = candidate.map(|c| c.label()).unwrap_or_else(|| "-".into());
        println!("  {:<28} {}", race.title, choice);
    }
    println!();
    println!("Keep your ballot ID to verify your vote later.");
}

fn print_verification(record: &VerificationRecord) {
    println!("Ballot ID:   {}", record.ballot_id);
    println!("Status:      {}", record.status.as_str());
    println!("Verified at: {}", record.verified_at.to_human());
    match record.status {
        VerificationStatus::Verified => {
            if let Some(cast_at) = record.cast_at {
                println!("Cast at:     {}", cast_at.to_human());
            }
            println!();
            for race in &record.races {
                println!("  {:<28} {}", race.title, race.selection);
            }
        }
        VerificationStatus::DetailsUnavailable => {
            println!();
            println!("Your vote is on record. Individual selections are not");
            println!("retained after the voting session ends.");
        }
    }
}

fn print_results(results: &ElectionResults) {
    let s = &results.summary;
    println!("Total votes cast:    {}", s.total_votes_cast);
    println!("Turnout:             {:.1}%", s.turnout_percent);
    println!(
        "Precincts reporting: {} / {}",
        s.precincts_reporting, s.precincts_total
    );
    for race in &results.races {
        println!();
        println!(
            "{} [{}] ({} votes)",
            race.title,
            race.status.as_str(),
            race.total_votes
        );
        for c in &race.candidates {
            println!(
                "  {:<22} {:<26} {:>10} {:>5.1}%",
                c.name, c.party, c.votes, c.percentage
            );
        }
    }
}

fn print_help(search: &str) {
    let entries = search_faq(search);
    if entries.is_empty() {
        println!("No questions match '{search}'.");
    }
    for entry in entries {
        println!("Q: {}", entry.question);
        println!("A: {}", entry.answer);
        println!();
    }
    println!("Need more help?");
    for channel in SUPPORT_CHANNELS {
        println!(
            "  {:<14} {:<26} {:<24} [{}]",
            channel.title, channel.description, channel.contact, channel.action
        );
    }
}
