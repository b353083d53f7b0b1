use super::Provider;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::AccessToken;
use log::{debug, warn};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;

/// `GET /search?type=track` response. Absent or null sections read as empty.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<Option<TrackItem>>,
}

#[derive(Debug, Deserialize)]
pub struct TrackItem {
    #[serde(default)]
    pub uri: String,
}

impl SearchResponse {
    /// URI of the first result only; no disambiguation beyond the API's ranking.
    pub fn first_uri(&self) -> Option<&str> {
        self.tracks
            .as_ref()?
            .items
            .first()?
            .as_ref()
            .map(|t| t.uri.as_str())
            .filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct CreatedPlaylist {
    #[serde(default)]
    id: String,
}

/// Spotify provider backed by the Spotify Web API, holding one bearer token
/// for the lifetime of the run.
pub struct SpotifyProvider {
    client: Client,
    api_base: String,
    token: AccessToken,
}

impl SpotifyProvider {
    pub fn new(client: Client, cfg: &Config, token: AccessToken) -> Self {
        Self {
            client,
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn search_url(&self, title: &str, artist: &str) -> String {
        let q = format!("track:{} artist:{}", title, artist);
        format!(
            "{}/search?q={}&type=track&limit=1",
            self.api_base,
            urlencoding::encode(&q)
        )
    }
}

impl Provider for SpotifyProvider {
    fn name(&self) -> &str {
        "spotify"
    }

    fn search_track_uri(&self, title: &str, artist: &str) -> Result<Option<String>> {
        let resp = self
            .client
            .get(self.search_url(title, artist))
            .header(AUTHORIZATION, self.token.bearer())
            .header(ACCEPT, "application/json")
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().unwrap_or_default();
            warn!("Spotify search for {} - {} failed: {} => {}", title, artist, status, txt);
            return Ok(None);
        }
        let j: SearchResponse = resp.json()?;
        let uri = j.first_uri().map(str::to_string);
        debug!("Spotify search {} - {} -> {:?}", title, artist, uri);
        Ok(uri)
    }

    fn create_playlist(&self, user_id: &str, name: &str, public: bool) -> Result<String> {
        let url = format!(
            "{}/users/{}/playlists",
            self.api_base,
            urlencoding::encode(user_id)
        );
        let body = json!({
            "name": name,
            "public": public
        });
        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.token.bearer())
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()?;
        if !resp.status().is_success() {
            return Err(Error::from_response("create playlist", resp));
        }
        let created: CreatedPlaylist = resp.json()?;
        if created.id.is_empty() {
            return Err(Error::MissingField("id"));
        }
        debug!("Created Spotify playlist {} ({})", name, created.id);
        Ok(created.id)
    }

    fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<()> {
        let url = format!("{}/playlists/{}/tracks", self.api_base, playlist_id);
        let body = json!({ "uris": uris });
        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.token.bearer())
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()?;
        if !resp.status().is_success() {
            return Err(Error::from_response("add tracks", resp));
        }
        Ok(())
    }
}
