use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use storage::{Database, models::NewParticipant, repository::participant::ParticipantRepository};

const PALETTE: [&str; 6] = [
    "#9333EA", "#7E22CE", "#6B21A8", "#A855F7", "#8B5CF6", "#7C3AED",
];

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Load the MoneyFit participant roster", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// JSON array of participants (`name`, `photo_url`, `color`); defaults to the built-in roster
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Insert alongside existing participants instead of replacing them
    #[arg(long)]
    keep_existing: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn default_roster() -> Vec<NewParticipant> {
    ["Bruno", "Daiane", "Cris", "Fran", "Paulinho", "Douglas"]
        .iter()
        .zip(PALETTE)
        .map(|(name, color)| NewParticipant {
            name: name.to_string(),
            photo_url: Some(format!("/images/{}.png", name.to_lowercase())),
            color: color.to_string(),
        })
        .collect()
}

fn load_roster(path: &Path) -> anyhow::Result<Vec<NewParticipant>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file {}", path.display()))?;
    let roster = serde_json::from_str(&raw)
        .with_context(|| format!("Roster file {} is not a valid participant list", path.display()))?;
    Ok(roster)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("seed={},storage={}", log_level, log_level).into()),
        )
        .init();

    let roster = match &cli.roster {
        Some(path) => load_roster(path)?,
        None => default_roster(),
    };

    let db = Database::new(&cli.database_url, 1)
        .await
        .context("Failed to initialize database")?;
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;

    let repo = ParticipantRepository::new(db.pool());
    let created = repo
        .replace_roster(&roster, cli.keep_existing)
        .await
        .context("Failed to seed participants")?;

    for participant in &created {
        tracing::info!(
            participant_id = participant.participant_id,
            name = %participant.name,
            "Seeded participant"
        );
    }
    tracing::info!("Seeded {} participants", created.len());

    Ok(())
}
