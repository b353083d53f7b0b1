use anyhow::{Context, Result};
use apple_to_spotify_playlist as lib;
use clap::{Parser, Subcommand};
use lib::config::{Config, Credentials};
use std::path::PathBuf;
use tracing::subscriber as tracing_subscriber_global;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_log::LogTracer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "apple-to-spotify", version)]
struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy the Apple Music playlist into a new Spotify playlist (one-shot)
    Transfer {
        /// Apple Music playlist URL (overrides config)
        #[arg(long)]
        url: Option<String>,
        /// Name for the new Spotify playlist (overrides config)
        #[arg(long)]
        name: Option<String>,
        /// Create the playlist as private
        #[arg(long)]
        private: bool,
    },
    /// Fetch and print the songs found on the Apple Music page
    Scrape {
        /// Apple Music playlist URL (overrides config)
        #[arg(long)]
        url: Option<String>,
    },
    /// Obtain a Spotify refresh token (interactive)
    Auth,
    /// Validate config file and exit
    ConfigValidate,
}

/// Explicit --config wins; otherwise use the per-user config file if present.
fn resolve_config_path(explicit: Option<&PathBuf>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.clone());
    }
    dirs::config_dir()
        .map(|d| d.join("apple-to-spotify").join("config.toml"))
        .filter(|p| p.exists())
}

fn init_logging(cfg: &Config) -> Result<Option<WorkerGuard>> {
    let _ = LogTracer::init();

    // Honor RUST_LOG if set; otherwise keep the console to warnings so
    // progress output stays readable.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match &cfg.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "apple-to-spotify.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(non_blocking)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer);
    tracing_subscriber_global::set_global_default(subscriber)
        .context("failed to set global tracing subscriber")?;
    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config.as_ref());

    let cfg = match &config_path {
        Some(p) => Config::from_path(p)
            .with_context(|| format!("loading config from {}", p.display()))?,
        None => Config::default(),
    };

    let _guard = init_logging(&cfg)?;

    match cli.command {
        Commands::Transfer { url, name, private } => {
            let mut cfg = cfg;
            if let Some(url) = url {
                cfg.source_url = url;
            }
            if let Some(name) = name {
                cfg.playlist_name = name;
            }
            if private {
                cfg.playlist_public = false;
            }
            let creds = Credentials::from_env().context("reading Spotify credentials")?;
            let mut stdout = std::io::stdout().lock();
            lib::worker::run_transfer(&cfg, &creds, &mut stdout)
                .with_context(|| "running transfer".to_string())?;
        }
        Commands::Scrape { url } => {
            let mut cfg = cfg;
            if let Some(url) = url {
                cfg.source_url = url;
            }
            let client = reqwest::blocking::Client::new();
            let songs = lib::source::fetch_songs(&client, &cfg)
                .with_context(|| format!("scraping {}", cfg.source_url))?;
            for song in &songs {
                println!("{} - {}", song.title, song.artist);
            }
            println!("Found {} songs", songs.len());
        }
        Commands::Auth => {
            lib::api::spotify_auth::run_spotify_auth(&cfg)?;
        }
        Commands::ConfigValidate => match &config_path {
            // Already parsed above; reaching here means it is valid.
            Some(p) => println!("OK ({})", p.display()),
            None => println!("OK (defaults)"),
        },
    }

    Ok(())
}
