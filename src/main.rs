// Entrypoint for the command-line tool.
// - Keeps `main` small: resolve config, build the client, run the batch.
// - Returns `anyhow::Result` so an unreadable input file exits non-zero.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tracing::info;
use tvac::{ui::ProgressObserver, AnnotationClient};

/// Annotate genomic variants and print a tab-separated report.
#[derive(Parser, Debug)]
#[command(name = "tvac")]
struct Args {
    /// File with one variant identifier per line
    filename: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tvac=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let client = AnnotationClient::from_env().context("Failed to create annotation client")?;
    tracing::debug!("Variant endpoint: {}", client.variant_endpoint());

    let mut progress = ProgressObserver::new();
    let report = client
        .annotate_file_with(&args.filename, &mut progress)
        .with_context(|| format!("Failed to annotate {}", args.filename.display()))?;
    progress.finish();
    if progress.failed() > 0 {
        info!(
            "{} variant(s) could not be annotated and were left out of the report",
            progress.failed()
        );
    }

    println!("{}", report);
    Ok(())
}
