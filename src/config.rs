use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

pub const ENV_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
pub const ENV_REFRESH_TOKEN: &str = "SPOTIFY_REFRESH_TOKEN";
pub const ENV_USER_ID: &str = "SPOTIFY_USER_ID";

/// Spotify rejects more than this many URIs in a single add-tracks call.
pub const SPOTIFY_MAX_BATCH: usize = 100;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_source_url")]
    pub source_url: String,
    #[serde(default = "default_playlist_name")]
    pub playlist_name: String,
    #[serde(default = "default_playlist_public")]
    pub playlist_public: bool,

    // Endpoints
    #[serde(default = "default_auth_base")]
    pub auth_base: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pause after every search request.
    #[serde(default = "default_search_delay")]
    pub search_delay_ms: u64,

    #[serde(default = "default_max_batch_spotify")]
    pub max_batch_size_spotify: usize,

    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_source_url() -> String {
    "https://music.apple.com/us/playlist/favorite-songs/pl.u-ovURBX17aZ".into()
}
fn default_playlist_name() -> String { "Imported from Apple Music".into() }
fn default_playlist_public() -> bool { true }
fn default_auth_base() -> String { "https://accounts.spotify.com".into() }
fn default_api_base() -> String { "https://api.spotify.com/v1".into() }
fn default_user_agent() -> String { "Mozilla/5.0".into() }
fn default_search_delay() -> u64 { 200 }
fn default_max_batch_spotify() -> usize { SPOTIFY_MAX_BATCH }

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            playlist_name: default_playlist_name(),
            playlist_public: default_playlist_public(),
            auth_base: default_auth_base(),
            api_base: default_api_base(),
            user_agent: default_user_agent(),
            search_delay_ms: default_search_delay(),
            max_batch_size_spotify: default_max_batch_spotify(),
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&s)?;
        Ok(cfg)
    }

    /// Token endpoint derived from `auth_base`.
    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.auth_base.trim_end_matches('/'))
    }

    /// Configured batch size, kept within what the add-tracks endpoint accepts.
    pub fn batch_size(&self) -> usize {
        self.max_batch_size_spotify.clamp(1, SPOTIFY_MAX_BATCH)
    }

    pub fn search_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.search_delay_ms)
    }
}

/// Long-lived Spotify credentials plus the user that will own the new playlist.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub user_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from an arbitrary key lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(Error::MissingCredential(key))
        };
        Ok(Self {
            client_id: required(ENV_CLIENT_ID)?,
            client_secret: required(ENV_CLIENT_SECRET)?,
            refresh_token: required(ENV_REFRESH_TOKEN)?,
            user_id: required(ENV_USER_ID)?,
        })
    }
}
