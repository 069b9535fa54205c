use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// Distance between named places
#[derive(Parser)]
#[command(name = "geodist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// World-cities CSV used for CSV mode and place lookups
    #[arg(
        short,
        long,
        env = "GEODIST_GAZETTEER",
        default_value = "worldcities.csv",
        global = true
    )]
    gazetteer: PathBuf,

    /// Nominatim-compatible search endpoint used for API mode
    #[arg(
        long,
        env = "GEODIST_GEOCODER_URL",
        default_value = geodist::DEFAULT_GEOCODER_URL,
        global = true
    )]
    geocoder_url: String,

    /// Timeout for geocoder requests, in seconds
    #[arg(
        short,
        long,
        env = "GEODIST_GEOCODER_TIMEOUT",
        default_value = "10",
        global = true
    )]
    timeout: u64,

    /// Log lookups to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance between two places
    Distance {
        /// First place name
        from: String,

        /// Second place name
        to: String,

        /// Resolution mode: CSV, API or MOCK
        #[arg(short, long, default_value = "CSV")]
        mode: String,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the gazetteer entry for a place
    Place {
        /// Place name (exact, case-sensitive)
        name: String,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// List the geocoder's candidates for a place
    Geocode {
        /// Free-text place name
        name: String,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "geodist=debug".into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let geocoder = commands::GeocoderArgs {
        url: cli.geocoder_url,
        timeout_secs: cli.timeout,
    };

    match cli.command {
        Commands::Distance {
            from,
            to,
            mode,
            json,
        } => commands::distance::run(cli.gazetteer, geocoder, from, to, mode, json).await,
        Commands::Place { name, json } => commands::place::run(cli.gazetteer, name, json),
        Commands::Geocode { name, json } => commands::geocode::run(geocoder, name, json).await,
    }
}
