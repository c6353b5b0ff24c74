use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tax_core::calculations::{compute_batch, validate_deduction};
use tax_core::{DeductionConfig, DeductionKind, DeductionRepository};
use tax_data::BatchCsvLoader;
use tax_db_sqlite::SqliteRepository;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Compute tax for every row of a CSV file and print the report as JSON.
///
/// The CSV file must start with the header `totalIncome,wht,donation`.
/// Deduction values are read from the database unless both `--personal` and
/// `--k-receipt` are given.
#[derive(Parser, Debug)]
#[command(name = "tax-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing one filer per row
    #[arg(short, long)]
    file: PathBuf,

    /// SQLite database URL (e.g., sqlite:tax.db?mode=rwc to create if missing)
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:tax.db?mode=rwc")]
    database: String,

    /// Run database migrations before reading deductions
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Run seed files from the specified directory after migrations
    #[arg(short, long)]
    seeds: Option<PathBuf>,

    /// Personal deduction to use instead of the stored value
    #[arg(long)]
    personal: Option<f64>,

    /// Maximum k-receipt deduction to use instead of the stored value
    #[arg(long)]
    k_receipt: Option<f64>,
}

async fn stored_deductions(args: &Args) -> Result<DeductionConfig> {
    let repo = SqliteRepository::new(&args.database).await?;

    if args.migrate {
        info!("running migrations");
        repo.run_migrations().await?;
    }

    if let Some(seeds_dir) = &args.seeds {
        info!(seeds = %seeds_dir.display(), "running seeds");
        repo.run_seeds(seeds_dir).await?;
    }

    repo.current_deductions()
        .await
        .with_context(|| format!("Failed to read deductions from: {}", args.database))
}

fn apply_override(
    deductions: &mut DeductionConfig,
    kind: DeductionKind,
    value: Option<f64>,
) -> Result<()> {
    let Some(amount) = value else {
        return Ok(());
    };
    if let Err(e) = validate_deduction(kind, amount) {
        bail!("--{}: {}", kind.as_str(), e);
    }
    match kind {
        DeductionKind::Personal => deductions.personal = amount,
        DeductionKind::KReceipt => deductions.k_receipt = amount,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut deductions = if args.personal.is_some() && args.k_receipt.is_some() {
        DeductionConfig::default()
    } else {
        stored_deductions(&args).await?
    };
    apply_override(&mut deductions, DeductionKind::Personal, args.personal)?;
    apply_override(&mut deductions, DeductionKind::KReceipt, args.k_receipt)?;

    info!(file = %args.file.display(), "reading batch file");
    let records = BatchCsvLoader::load_from_file(&args.file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    info!(
        rows = records.len(),
        personal = deductions.personal,
        k_receipt = deductions.k_receipt,
        "computing batch"
    );
    let report = compute_batch(&records, &deductions);

    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    println!("{json}");

    Ok(())
}
