use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Map, Value};
use tracing_subscriber::EnvFilter;

use cardoctor_db::{Database, DatabaseConfig};

#[derive(Parser)]
#[command(name = "cardoctor", version, about = "Car Doctor operator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load service documents from a JSON file into the services collection
    Seed {
        /// Path to a JSON array of service objects
        file: PathBuf,

        /// Delete existing services before inserting
        #[arg(long, default_value_t = false)]
        replace: bool,
    },

    /// Print every stored service
    Services,

    /// Print stored bookings
    Bookings {
        /// Only bookings with this email
        #[arg(short, long)]
        email: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("cardoctor=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = connect_db().await?;

    match cli.command {
        Commands::Seed { file, replace } => cmd_seed(&file, replace, &db).await?,
        Commands::Services => cmd_services(&db).await?,
        Commands::Bookings { email } => cmd_bookings(email.as_deref(), &db).await?,
    }

    Ok(())
}

/// Connect using MONGODB_URI, or the DB_USER/DB_PASS Atlas credentials.
async fn connect_db() -> Result<Database> {
    let config = DatabaseConfig::from_env().context("Database configuration missing")?;

    let db = Database::connect(&config)
        .await
        .context("Failed to create MongoDB client")?;
    db.ping().await.context("Failed to reach MongoDB")?;

    Ok(db)
}

/// Read a seed file: a JSON array whose entries are all objects.
fn load_seed_file(path: &Path) -> Result<Vec<Map<String, Value>>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw).context("Invalid JSON in seed file")?;

    let Value::Array(entries) = value else {
        anyhow::bail!("Seed file must contain a JSON array of services");
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            Value::Object(map) => Ok(map),
            other => anyhow::bail!("Seed entry {i} is not an object: {other}"),
        })
        .collect()
}

async fn cmd_seed(path: &Path, replace: bool, db: &Database) -> Result<()> {
    let services = load_seed_file(path)?;
    let repo = db.service_repo();

    if replace {
        let removed = repo.clear().await?;
        tracing::info!(removed, "Cleared services collection");
    }

    let inserted = repo.insert_many(&services).await?;
    tracing::info!(inserted, file = %path.display(), "Seeded services");

    println!("Inserted {inserted} services");
    Ok(())
}

async fn cmd_services(db: &Database) -> Result<()> {
    let services = db.service_repo().list().await?;

    if services.is_empty() {
        println!("No services found");
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&services)?);
    Ok(())
}

async fn cmd_bookings(email: Option<&str>, db: &Database) -> Result<()> {
    let bookings = db.booking_repo().list(email).await?;

    if bookings.is_empty() {
        match email {
            Some(email) => println!("No bookings found for {email}"),
            None => println!("No bookings found"),
        }
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(&bookings)?);
    Ok(())
}
