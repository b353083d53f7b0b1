//! Apple Music playlist page scraping.
//!
//! Only rows present in the initially served markup are seen; rows the page
//! loads later through script are not part of the result.

use crate::config::Config;
use crate::error::Result;
use crate::models::SourceTrack;
use crate::util::normalize_text;
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use scraper::{ElementRef, Html, Selector};

pub const SONG_ROW: &str = "div.songs-list-row";
pub const SONG_TITLE: &str = "div.songs-list-row__song-name";
pub const SONG_ARTIST: &str = "div.songs-list-row__byline a";

static ROW_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse(SONG_ROW).expect("row selector"));
static TITLE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(SONG_TITLE).expect("title selector"));
static ARTIST_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(SONG_ARTIST).expect("artist selector"));

fn first_text(row: &ElementRef<'_>, sel: &Selector) -> Option<String> {
    row.select(sel)
        .next()
        .map(|el| normalize_text(el.text()))
        .filter(|s| !s.is_empty())
}

/// Extract (title, artist) pairs in document order. Rows without a title or
/// without an artist link are skipped.
pub fn parse_songs(html: &str) -> Vec<SourceTrack> {
    let document = Html::parse_document(html);
    let mut songs = Vec::new();
    for row in document.select(&ROW_SEL) {
        let title = first_text(&row, &TITLE_SEL);
        let artist = first_text(&row, &ARTIST_SEL);
        match (title, artist) {
            (Some(title), Some(artist)) => songs.push(SourceTrack { title, artist }),
            (title, artist) => {
                log::debug!("Skipping incomplete row (title={:?}, artist={:?})", title, artist);
            }
        }
    }
    songs
}

/// GET the page with a browser-like user agent.
///
/// The body is returned whatever the status; a block or error page simply
/// parses to zero songs.
pub fn fetch_page(client: &Client, url: &str, user_agent: &str) -> Result<String> {
    let resp = client.get(url).header(USER_AGENT, user_agent).send()?;
    let status = resp.status();
    if !status.is_success() {
        log::warn!("Source page {} answered {}; parsing body anyway", url, status);
    }
    Ok(resp.text()?)
}

pub fn fetch_songs(client: &Client, cfg: &Config) -> Result<Vec<SourceTrack>> {
    let html = fetch_page(client, &cfg.source_url, &cfg.user_agent)?;
    let songs = parse_songs(&html);
    log::info!("Parsed {} songs from {}", songs.len(), cfg.source_url);
    Ok(songs)
}
