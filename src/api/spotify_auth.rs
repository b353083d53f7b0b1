use crate::config::{Config, Credentials};
use crate::error::{Error, Result};
use crate::models::AccessToken;
use anyhow::anyhow;
use base64::{engine::general_purpose, Engine as _};
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::info;
use url::Url;

/// Scopes needed to create a playlist and add tracks to it.
pub const SCOPES: &[&str] = &["playlist-modify-public", "playlist-modify-private"];

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

fn basic_auth(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        general_purpose::STANDARD.encode(format!("{}:{}", client_id, client_secret))
    )
}

fn request_token(
    client: &Client,
    cfg: &Config,
    client_id: &str,
    client_secret: &str,
    params: &[(&str, &str)],
) -> Result<TokenResponse> {
    let resp = client
        .post(cfg.token_url())
        .header(AUTHORIZATION, basic_auth(client_id, client_secret))
        .form(params)
        .send()?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(Error::Authentication {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp.json()?)
}

/// Exchange the long-lived refresh token for a bearer token.
///
/// Any non-2xx answer from the token endpoint is an `Error::Authentication`;
/// there is no retry.
pub fn get_access_token(client: &Client, cfg: &Config, creds: &Credentials) -> Result<AccessToken> {
    let tr = request_token(
        client,
        cfg,
        &creds.client_id,
        &creds.client_secret,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", creds.refresh_token.as_str()),
        ],
    )?;
    if tr.access_token.is_empty() {
        return Err(Error::MissingField("access_token"));
    }
    log::debug!(
        "Obtained Spotify access token (expires_in={:?}, scope={:?})",
        tr.expires_in,
        tr.scope
    );
    Ok(AccessToken::new(tr.access_token))
}

/// Authorization URL the user opens in a browser to approve the app.
pub fn authorize_url(cfg: &Config, client_id: &str, redirect_uri: &str) -> anyhow::Result<Url> {
    let mut url = Url::parse(&format!("{}/authorize", cfg.auth_base.trim_end_matches('/')))?;
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", client_id)
        .append_pair("scope", &SCOPES.join(" "))
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("show_dialog", "true");
    Ok(url)
}

/// Pull the `code` query parameter out of a pasted redirect URL.
pub fn code_from_redirect(redirect: &str) -> anyhow::Result<String> {
    let parsed = Url::parse(redirect.trim()).map_err(|e| anyhow!("invalid url pasted: {}", e))?;
    if let Some((_, err)) = parsed.query_pairs().find(|(k, _)| k == "error") {
        return Err(anyhow!("authorization denied: {}", err));
    }
    let code = parsed
        .query_pairs()
        .find(|(k, _)| k == "code")
        .ok_or_else(|| anyhow!("no code in redirect URL"))?
        .1
        .into_owned();
    Ok(code)
}

/// Exchange an authorization code for tokens and return the refresh token.
pub fn exchange_code(
    client: &Client,
    cfg: &Config,
    client_id: &str,
    client_secret: &str,
    code: &str,
    redirect_uri: &str,
) -> Result<String> {
    let tr = request_token(
        client,
        cfg,
        client_id,
        client_secret,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ],
    )?;
    tr.refresh_token
        .filter(|t| !t.is_empty())
        .ok_or(Error::MissingField("refresh_token"))
}

fn prompt(label: &str) -> anyhow::Result<String> {
    println!("{}", label);
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Manual OAuth helper used to obtain the refresh token an import run needs:
/// 1. Print the authorization URL.
/// 2. User approves and is redirected (the redirect target may be a dummy page).
/// 3. User pastes the full redirect URL back.
/// 4. The `code` is exchanged and the refresh token printed for export.
pub fn run_spotify_auth(cfg: &Config) -> anyhow::Result<()> {
    let client_id = prompt("Enter your Spotify client_id:")?;
    if client_id.is_empty() {
        return Err(anyhow!("no client_id provided"));
    }
    let client_secret = prompt("Enter your Spotify client_secret:")?;
    if client_secret.is_empty() {
        return Err(anyhow!("no client_secret provided"));
    }
    let redirect_uri = {
        let r = prompt("Enter your Spotify redirect URI (leave blank for http://127.0.0.1:8888/):")?;
        if r.is_empty() {
            "http://127.0.0.1:8888/".to_string()
        } else {
            r
        }
    };

    let url = authorize_url(cfg, &client_id, &redirect_uri)?;
    println!(
        "Open this URL in your browser and authorize the application:\n\n{}\n",
        url
    );
    println!("After authorizing, you'll be redirected to your redirect URI. Copy the full redirect URL and paste it here.");
    let pasted = prompt("Paste redirect URL:")?;
    let code = code_from_redirect(&pasted)?;

    let client = Client::new();
    let refresh_token = exchange_code(&client, cfg, &client_id, &client_secret, &code, &redirect_uri)?;
    info!("Spotify refresh token obtained");

    println!("Export these before running `transfer`:\n");
    println!("export {}={}", crate::config::ENV_CLIENT_ID, client_id);
    println!("export {}={}", crate::config::ENV_CLIENT_SECRET, client_secret);
    println!("export {}={}", crate::config::ENV_REFRESH_TOKEN, refresh_token);
    println!("export {}=<your spotify user id>", crate::config::ENV_USER_ID);
    Ok(())
}
