use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gazetteer::{JsonStore, MunicipalityConfig, Source};

mod cmd;

#[derive(Parser)]
#[command(
    name = "gazetteer",
    about = "Build and verify the Basey location gazetteer",
    version
)]
struct Cli {
    /// Path to the canonical location store
    #[arg(long, default_value = "data/basey-locations.json")]
    data: PathBuf,

    /// Path to the barangay boundary GeoJSON file
    #[arg(long, default_value = "data/Barangay.shp.json")]
    boundaries: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Harvest all sources and merge new locations into the store
    Collect {
        /// Skip the Google Places source even if an API key is configured
        #[arg(long)]
        skip_google: bool,

        /// Skip the OpenStreetMap source
        #[arg(long)]
        skip_osm: bool,
    },

    /// Run duplicate, proximity, bounds, and verification checks
    Verify,

    /// Detailed per-category verification report
    Report,

    /// Compare the store against the official barangay roster
    Missing,

    /// List unverified locations grouped by kind
    Unverified,

    /// Mark every record from a source as verified
    VerifySource {
        /// Source tag: geojson, google, osm, psa, or manual
        source: String,
    },

    /// Interactive cleanup menu
    Clean,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    tracing::debug!(store = %cli.data.display(), "using canonical store");

    let store = JsonStore::new(&cli.data);
    let config = MunicipalityConfig::basey();

    match cli.command {
        Command::Collect {
            skip_google,
            skip_osm,
        } => cmd::collect::run(&store, &config, &cli.boundaries, skip_google, skip_osm).await,
        Command::Verify => cmd::verify::run(&store, &config),
        Command::Report => {
            let dataset = store.load()?;
            cmd::report::detailed(&dataset);
            Ok(())
        }
        Command::Missing => {
            let dataset = store.load()?;
            cmd::report::missing(&dataset, &config);
            Ok(())
        }
        Command::Unverified => {
            let dataset = store.load()?;
            cmd::report::unverified_groups(&dataset);
            Ok(())
        }
        Command::VerifySource { source } => {
            let Some(source) = Source::parse(&source) else {
                bail!("unknown source tag: {source} (expected geojson, google, osm, psa, or manual)");
            };
            cmd::clean::verify_source(&store, source)
        }
        Command::Clean => cmd::clean::run(&store, &config),
    }
}
