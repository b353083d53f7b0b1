use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use tempfile::tempdir;

use apple_to_spotify_playlist::config::{self, Config, Credentials};
use apple_to_spotify_playlist::error::Error;

fn env_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

const ALL: [(&str, &str); 4] = [
    (config::ENV_CLIENT_ID, "cid"),
    (config::ENV_CLIENT_SECRET, "csecret"),
    (config::ENV_REFRESH_TOKEN, "rtoken"),
    (config::ENV_USER_ID, "user1"),
];

#[test]
fn config_from_path_parses_toml() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("cfg.toml");
    let mut f = File::create(&cfg_path).unwrap();
    let toml = r#"
source_url = "https://music.apple.com/us/playlist/x/pl.1"
playlist_name = "Road Trip"
playlist_public = false
search_delay_ms = 0
max_batch_size_spotify = 500
log_dir = "/tmp"
"#;
    f.write_all(toml.as_bytes()).unwrap();
    let cfg = Config::from_path(&cfg_path).expect("parse config");
    assert_eq!(cfg.source_url, "https://music.apple.com/us/playlist/x/pl.1");
    assert_eq!(cfg.playlist_name, "Road Trip");
    assert!(!cfg.playlist_public);
    assert_eq!(cfg.search_delay_ms, 0);
    // clamped to what the endpoint accepts
    assert_eq!(cfg.batch_size(), 100);
    assert_eq!(cfg.log_dir.as_deref(), Some(std::path::Path::new("/tmp")));
    // untouched fields keep defaults
    assert_eq!(cfg.api_base, "https://api.spotify.com/v1");
}

#[test]
fn empty_config_file_uses_defaults() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("empty.toml");
    File::create(&cfg_path).unwrap();
    let cfg = Config::from_path(&cfg_path).expect("parse config");
    assert_eq!(cfg.playlist_name, "Imported from Apple Music");
    assert!(cfg.playlist_public);
    assert_eq!(cfg.search_delay_ms, 200);
    assert_eq!(cfg.batch_size(), 100);
    assert_eq!(cfg.token_url(), "https://accounts.spotify.com/api/token");
    assert_eq!(cfg.user_agent, "Mozilla/5.0");
}

#[test]
fn invalid_config_is_an_error() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("bad.toml");
    std::fs::write(&cfg_path, "search_delay_ms = \"soon\"").unwrap();
    assert!(Config::from_path(&cfg_path).is_err());
    assert!(Config::from_path(&td.path().join("missing.toml")).is_err());
}

#[test]
fn credentials_from_lookup() {
    let env = env_map(&ALL);
    let creds = Credentials::from_lookup(|k| env.get(k).cloned()).unwrap();
    assert_eq!(creds.client_id, "cid");
    assert_eq!(creds.client_secret, "csecret");
    assert_eq!(creds.refresh_token, "rtoken");
    assert_eq!(creds.user_id, "user1");
}

#[test]
fn each_missing_credential_is_named() {
    for (missing, _) in ALL {
        let env: HashMap<String, String> = env_map(&ALL)
            .into_iter()
            .filter(|(k, _)| k != missing)
            .collect();
        match Credentials::from_lookup(|k| env.get(k).cloned()) {
            Err(Error::MissingCredential(name)) => assert_eq!(name, missing),
            other => panic!("expected missing {}, got {:?}", missing, other),
        }
    }
}

#[test]
fn blank_credential_counts_as_missing() {
    let mut env = env_map(&ALL);
    env.insert(config::ENV_REFRESH_TOKEN.into(), "   ".into());
    let err = Credentials::from_lookup(|k| env.get(k).cloned()).unwrap_err();
    assert!(matches!(err, Error::MissingCredential("SPOTIFY_REFRESH_TOKEN")));
}

#[test]
fn credentials_debug_redacts_secrets() {
    let env = env_map(&ALL);
    let creds = Credentials::from_lookup(|k| env.get(k).cloned()).unwrap();
    let dbg = format!("{:?}", creds);
    assert!(dbg.contains("cid"));
    assert!(!dbg.contains("csecret"));
    assert!(!dbg.contains("rtoken"));
}
