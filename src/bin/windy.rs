use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use windy_forecast::{Client, ClientOptions, Config, Formatter, JsonFormatter, TableFormatter, store};

#[derive(Debug, Parser)]
#[command(name = "windy", version, about = "Windy point-forecast client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch and print the forecast for a coordinate.
    Forecast {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// API key; falls back to the config file, then WINDY_API_KEY.
        #[arg(long)]
        key: Option<String>,

        /// Endpoint alias or URL; overrides the config file.
        #[arg(long)]
        endpoint: Option<String>,

        /// Config file to use instead of the platform default.
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        timeout_secs: Option<u64>,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Print at most this many steps (table only).
        #[arg(long)]
        limit: Option<usize>,

        /// Also write the raw report to `<dir>/<unix>-<tag>.json`.
        #[arg(long)]
        save_dir: Option<PathBuf>,

        #[arg(long, default_value = "DCFG")]
        tag: String,
    },

    /// Print the default config file path.
    ConfigPath,
}

fn run(cli: Cli) -> windy_forecast::Result<()> {
    match cli.command {
        Command::ConfigPath => {
            println!("{}", Config::config_file_path()?.display());
        }
        Command::Forecast {
            lat,
            lon,
            key,
            endpoint,
            config,
            timeout_secs,
            format,
            limit,
            save_dir,
            tag,
        } => {
            let mut cfg = match config {
                Some(path) => Config::load_from(path)?,
                None => Config::load()?,
            }
            .with_env();
            if let Some(key) = key {
                cfg.api_key = key;
            }
            if let Some(endpoint) = endpoint {
                cfg.endpoint = endpoint;
            }

            let client = Client::new(ClientOptions {
                endpoint: cfg.endpoint.clone(),
                timeout: timeout_secs.map(Duration::from_secs),
                ..ClientOptions::default()
            })?;
            let report = client.fetch(lat, lon, &cfg.api_key)?;
            info!(steps = report.len(), "forecast received");

            if let Some(dir) = save_dir {
                let path = store::save_report(&report, dir, &tag, Utc::now())?;
                info!(path = %path.display(), "report saved");
            }

            let out = match format {
                Format::Table => TableFormatter { limit }.format(&report)?,
                Format::Json => JsonFormatter { pretty: true }.format(&report)?,
            };
            print!("{out}");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "windy_forecast=info,windy=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
