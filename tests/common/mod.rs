use apple_to_spotify_playlist::config::{Config, Credentials};

/// Config with every endpoint routed to a mockito server and no search throttle.
#[allow(dead_code)]
pub fn mock_config(base: &str) -> Config {
    Config {
        source_url: format!("{}/playlist", base),
        auth_base: base.to_string(),
        api_base: base.to_string(),
        search_delay_ms: 0,
        ..Config::default()
    }
}

#[allow(dead_code)]
pub fn test_credentials() -> Credentials {
    Credentials {
        client_id: "test_id".into(),
        client_secret: "test_secret".into(),
        refresh_token: "refresh-spotify".into(),
        user_id: "mock_user".into(),
    }
}

#[allow(dead_code)]
pub fn song_row(title: &str, artist: &str) -> String {
    format!(
        r#"<div class="songs-list-row"><div class="songs-list-row__song-name">{}</div><div class="songs-list-row__byline"><a href="/artist">{}</a></div></div>"#,
        title, artist
    )
}

#[allow(dead_code)]
pub fn page(rows: &[String]) -> String {
    format!("<html><body><main>{}</main></body></html>", rows.concat())
}
