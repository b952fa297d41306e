mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use automail_core::{config, Config, ScheduleDraft};
use automail_rules::{fallback_cadence, legal_cadences, legal_periods, normalize_schedule};
use automail_store::{Directory, JsonScheduleStore, ScheduleStore};

use crate::cli::{Cli, Command, DraftArgs};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    config::load_dotenv();
    let mut config = Config::from_env();

    let args = Cli::parse();
    if let Some(dir) = args.schedules_dir {
        config.storage.schedules_dir = dir;
    }
    config.log_summary();

    match args.command {
        Command::Periods { report_type } => {
            for period in legal_periods(report_type) {
                println!("{}", period);
            }
        }

        Command::Cadences {
            report_type,
            period,
        } => {
            let legal = legal_cadences(&[report_type], period);
            for cadence in &legal {
                println!("{}", cadence);
            }
            if let Some(p) = period {
                let suggested = fallback_cadence(p, &legal)
                    .context("no legal cadence for this type/period combination")?;
                println!("suggested: {}", suggested);
            }
        }

        Command::Validate(draft_args) => {
            let draft = build_draft(&config, draft_args)?;
            let schedule = normalize_schedule(&draft).context("draft rejected")?;
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }

        Command::Add(draft_args) => {
            let draft = build_draft(&config, draft_args)?;
            let schedule = normalize_schedule(&draft).context("draft rejected")?;
            let store = open_store(&config)?;
            let stored = store.upsert(schedule).context("failed to persist schedule")?;
            info!(schedule_id = %stored.id.as_deref().unwrap_or("?"), "schedule added");
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }

        Command::List => {
            let store = open_store(&config)?;
            let mut schedules = store.list().context("failed to list schedules")?;
            schedules.sort_by(|a, b| a.id.cmp(&b.id));
            for s in schedules {
                println!(
                    "{}  {}  {}  {}  {:02}:{:02}",
                    s.id.as_deref().unwrap_or("-"),
                    s.report_types
                        .first()
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    s.report_period,
                    s.interval_preset,
                    s.time.hour,
                    s.time.minute,
                );
            }
        }

        Command::Update { id, draft } => {
            let draft = build_draft(&config, draft)?;
            let schedule = normalize_schedule(&draft).context("draft rejected")?;
            let store = open_store(&config)?;
            let stored = store
                .update(&id, schedule)
                .with_context(|| format!("failed to update schedule '{}'", id))?;
            println!("{}", serde_json::to_string_pretty(&stored)?);
        }

        Command::Delete { id } => {
            let store = open_store(&config)?;
            store
                .delete(&id)
                .with_context(|| format!("failed to delete schedule '{}'", id))?;
            println!("deleted {}", id);
        }
    }

    Ok(())
}

/// Open the JSON store and load persisted schedules into memory.
fn open_store(config: &Config) -> Result<JsonScheduleStore> {
    let store = JsonScheduleStore::new(config.storage.schedules_dir.clone());
    store
        .load_all()
        .context("failed to scan schedules directory")?;
    Ok(store)
}

/// Assemble a raw draft from flags, resolving `--user` ids through the
/// directory. All real validation happens in the normalizer.
fn build_draft(config: &Config, args: DraftArgs) -> Result<ScheduleDraft> {
    let mut emails = args.emails;
    if !args.users.is_empty() {
        let directory = Directory::load(
            &config.directory.groups_file,
            &config.directory.users_file,
        )
        .context("failed to load directory files")?;
        emails.extend(directory.resolve_emails(&args.users));
    }

    Ok(ScheduleDraft {
        report_types: args.report_type.into_iter().collect(),
        period: args.period,
        cadence: args.cadence,
        interval_preset: None,
        custom: None,
        hour: args.hour,
        minute: args.minute,
        day_of_week: args.day_of_week,
        day_of_month: args.day_of_month,
        mail_group_ids: args.groups,
        emails,
    })
}
