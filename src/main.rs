//! blanco - keep in touch, barely.
//!
//! Check sent mail to make sure you're keeping in contact with your friends.

mod address;
mod args;
mod config;
mod contact;
mod correspondence;
mod datetime;
mod duration;
mod error;
mod mailbox;
mod message;
mod msmtp;
mod reminder;
mod report;
mod sent;
mod utils;

use anyhow::Context;
use args::Args;
use chrono::Utc;
use config::{Config, SentType};
use contact::Roster;
use correspondence::AddressFilter;
use report::Reporter;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let mut config = Config::load(args.config.as_deref())?;
    config.apply(&args);
    init_logging(config.verbose);
    do_main(&args, &config)
}

fn init_logging(verbose: bool) {
    let default = if verbose { "blanco=debug" } else { "blanco=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn do_main(args: &Args, config: &Config) -> anyhow::Result<()> {
    let roster = Roster::load(&config.addressbook, &config.field)?;
    info!(contacts = roster.len(), "Loaded address book");
    if roster.is_empty() {
        warn!(field = %config.field, "No address book entry has a frequency field");
    }

    let reporter = if config.notify {
        Reporter::popup()
    } else {
        Reporter::terminal(config.colour, config.verbose)
    };

    let filter = AddressFilter::new(&roster.addresses());
    let sent = match config.sent_type {
        SentType::Msmtp => msmtp::parse_msmtp(&config.log, config.all, &filter, config.gmail)?,
        SentType::Mailbox => {
            let progress = utils::create_progress_bar(args);
            sent::parse_sent(&config.mbox, config.all, &filter, &progress)?
        }
    };
    info!(addresses = sent.len(), "Read sent mail");
    if sent.is_empty() {
        warn!("No sent mail to any contact was found");
    }
    for (address, date) in sent.iter() {
        debug!(address, %date, "Last sent");
    }

    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    for (contact, verdict) in reminder::classify(&roster, &sent, today) {
        reporter
            .report(contact, verdict)
            .with_context(|| format!("Failed to report on {}", contact.name))?;
    }

    Ok(())
}
