use serde::{Deserialize, Serialize};
use std::fmt;

/// One (title, artist) row scraped from the source playlist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTrack {
    pub title: String,
    pub artist: String,
}

impl SourceTrack {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

impl fmt::Display for SourceTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.artist)
    }
}

/// Short-lived bearer token. Fetched once per run and never refreshed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Destination playlist as created by this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub public: bool,
    /// URIs confirmed added, in insertion order.
    pub tracks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Zero-based batch index.
    pub index: usize,
    pub uris: Vec<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendReport {
    pub batches: usize,
    pub added: usize,
    pub failed: Vec<BatchFailure>,
}

impl AppendReport {
    pub fn missing(&self) -> usize {
        self.failed.iter().map(|f| f.uris.len()).sum()
    }
}

/// Result of one complete import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub songs_found: usize,
    pub resolved: Vec<String>,
    pub unmatched: Vec<SourceTrack>,
    pub playlist: Option<Playlist>,
    pub added: usize,
    pub failed_batches: usize,
}
