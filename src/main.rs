//! CRD schema extractor
//!
//! Entry point. Parses arguments, sets up logging and runs the extraction
//! pipeline over every source in order.

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crd_schema_extract::{cli::Cli, pipeline::Extractor, source::SourceReader};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Exits with usage and a non-zero status when no source is given
    let cli = Cli::parse();

    init_tracing();

    let reader = SourceReader::new()?;
    let extractor = Extractor::new(reader, &cli.config());
    let report = extractor.run(&cli.sources).await;

    // Partial failure is reported through logs only; the exit status
    // reflects argument presence.
    if report.has_failures() {
        warn!("Some sources, documents or files were skipped");
    }

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();
}
