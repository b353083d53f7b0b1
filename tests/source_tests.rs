mod common;

use apple_to_spotify_playlist::error::Error;
use apple_to_spotify_playlist::models::SourceTrack;
use apple_to_spotify_playlist::source;
use mockito::Server;
use reqwest::blocking::Client;

fn title_only(title: &str) -> String {
    format!(
        r#"<div class="songs-list-row"><div class="songs-list-row__song-name">{}</div><div class="songs-list-row__byline"></div></div>"#,
        title
    )
}

fn artist_only(artist: &str) -> String {
    format!(
        r#"<div class="songs-list-row"><div class="songs-list-row__byline"><a>{}</a></div></div>"#,
        artist
    )
}

#[test]
fn well_formed_rows_kept_in_order_malformed_dropped() {
    let html = common::page(&[
        common::song_row("One", "A"),
        title_only("No Artist"),
        common::song_row("Two", "B"),
        artist_only("No Title"),
        common::song_row("Three", "C"),
        title_only("   "),
    ]);
    let songs = source::parse_songs(&html);
    assert_eq!(
        songs,
        vec![
            SourceTrack::new("One", "A"),
            SourceTrack::new("Two", "B"),
            SourceTrack::new("Three", "C"),
        ]
    );
}

#[test]
fn page_without_rows_yields_nothing() {
    assert!(source::parse_songs("<html><body><p>Sign in</p></body></html>").is_empty());
    assert!(source::parse_songs("").is_empty());
}

#[test]
fn fetch_sends_browser_user_agent() {
    let mut server = Server::new();
    let cfg = common::mock_config(&server.url());

    let m = server
        .mock("GET", "/playlist")
        .match_header("user-agent", "Mozilla/5.0")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(common::page(&[
            common::song_row("Song A", "Artist X"),
            common::song_row("Song B", "Artist Y"),
        ]))
        .create();

    let songs = source::fetch_songs(&Client::new(), &cfg).unwrap();
    assert_eq!(
        songs,
        vec![
            SourceTrack::new("Song A", "Artist X"),
            SourceTrack::new("Song B", "Artist Y"),
        ]
    );
    m.assert();
}

#[test]
fn fetch_non_success_still_parses_body() {
    let mut server = Server::new();
    let cfg = common::mock_config(&server.url());

    let _m = server
        .mock("GET", "/playlist")
        .with_status(403)
        .with_header("content-type", "text/html")
        .with_body("<html><body><h1>Access denied</h1></body></html>")
        .create();

    let songs = source::fetch_songs(&Client::new(), &cfg).unwrap();
    assert!(songs.is_empty());
}

#[test]
fn fetch_transport_error_propagates() {
    let cfg = common::mock_config("http://127.0.0.1:1");
    let err = source::fetch_songs(&Client::new(), &cfg).unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}
