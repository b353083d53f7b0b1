use crate::api::spotify::SpotifyProvider;
use crate::api::{spotify_auth, Provider};
use crate::config::{Config, Credentials};
use crate::error::Result;
use crate::models::{RunSummary, SourceTrack};
use crate::{playlist, source};
use reqwest::blocking::Client;
use std::fmt;
use std::io::Write;
use std::time::Duration;

/// Stages of an import run. A run only ever moves forward through these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Authenticating,
    Extracting,
    Resolving { index: usize, total: usize },
    CreatingPlaylist,
    Appending,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Authenticating => f.write_str("authenticating"),
            Stage::Extracting => f.write_str("extracting"),
            Stage::Resolving { index, total } => write!(f, "resolving {}/{}", index, total),
            Stage::CreatingPlaylist => f.write_str("creating playlist"),
            Stage::Appending => f.write_str("appending"),
            Stage::Done => f.write_str("done"),
        }
    }
}

fn enter(stage: Stage) {
    log::debug!("stage: {}", stage);
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub uris: Vec<String>,
    pub unmatched: Vec<SourceTrack>,
}

/// Look every song up one at a time, pausing `delay` after each search.
/// A miss is reported on `out` and the loop moves on; an error aborts.
pub fn resolve_tracks(
    provider: &dyn Provider,
    songs: &[SourceTrack],
    delay: Duration,
    out: &mut dyn Write,
) -> Result<Resolution> {
    let total = songs.len();
    let mut res = Resolution::default();
    for (i, song) in songs.iter().enumerate() {
        let index = i + 1;
        enter(Stage::Resolving { index, total });
        writeln!(out, "Searching Spotify: {} ({}/{})", song, index, total)?;
        match provider.search_track_uri(&song.title, &song.artist)? {
            Some(uri) => res.uris.push(uri),
            None => {
                writeln!(out, "  [WARN] Could not find {}", song)?;
                log::warn!("No {} match for {}", provider.name(), song);
                res.unmatched.push(song.clone());
            }
        }
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
    Ok(res)
}

/// Resolve `songs`, then create the playlist and fill it. Creates nothing
/// when no song resolves.
pub fn import_songs(
    provider: &dyn Provider,
    cfg: &Config,
    user_id: &str,
    songs: &[SourceTrack],
    out: &mut dyn Write,
) -> Result<RunSummary> {
    let resolution = resolve_tracks(provider, songs, cfg.search_delay(), out)?;
    let mut summary = RunSummary {
        songs_found: songs.len(),
        resolved: resolution.uris,
        unmatched: resolution.unmatched,
        ..RunSummary::default()
    };

    if summary.resolved.is_empty() {
        writeln!(out, "No tracks found. Exiting.")?;
        enter(Stage::Done);
        return Ok(summary);
    }

    enter(Stage::CreatingPlaylist);
    let mut pl = playlist::create(provider, user_id, &cfg.playlist_name, cfg.playlist_public)?;

    enter(Stage::Appending);
    let report = playlist::append(provider, &mut pl, &summary.resolved, cfg.batch_size())?;
    if !report.failed.is_empty() {
        writeln!(
            out,
            "  [WARN] {} of {} batches failed; {} tracks were not added",
            report.failed.len(),
            report.batches,
            report.missing()
        )?;
    }
    summary.added = report.added;
    summary.failed_batches = report.failed.len();
    summary.playlist = Some(pl);

    enter(Stage::Done);
    writeln!(out, "Playlist created with {} tracks!", summary.added)?;
    Ok(summary)
}

/// Full import: token, scrape, resolve, create, append.
pub fn run_transfer(cfg: &Config, creds: &Credentials, out: &mut dyn Write) -> Result<RunSummary> {
    let client = Client::new();

    enter(Stage::Authenticating);
    writeln!(out, "Getting Spotify access token...")?;
    let token = spotify_auth::get_access_token(&client, cfg, creds)?;

    enter(Stage::Extracting);
    writeln!(out, "Fetching Apple Music playlist...")?;
    let songs = source::fetch_songs(&client, cfg)?;
    writeln!(out, "Found {} songs", songs.len())?;

    let provider = SpotifyProvider::new(client, cfg, token);
    import_songs(&provider, cfg, &creds.user_id, &songs, out)
}
