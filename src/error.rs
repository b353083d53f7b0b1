//! Error types shared by every stage of an import run.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required credential variable is absent or blank.
    #[error("missing required credential: {0} is not set")]
    MissingCredential(&'static str),

    /// The token endpoint rejected the credential bundle.
    #[error("token exchange failed: {status} => {body}")]
    Authentication { status: u16, body: String },

    /// A destination API call returned a non-success status.
    #[error("{context} failed: {status} => {body}")]
    Api {
        context: &'static str,
        status: u16,
        body: String,
    },

    /// A success response did not carry a field the pipeline needs.
    #[error("response missing field: {0}")]
    MissingField(&'static str),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an `Api` error from a failed response, consuming its body.
    pub(crate) fn from_response(context: &'static str, resp: reqwest::blocking::Response) -> Self {
        let status = resp.status().as_u16();
        let body = resp.text().unwrap_or_default();
        Error::Api {
            context,
            status,
            body,
        }
    }
}
