//! Upstream failure taxonomy.
//!
//! Callers need to tell an invalid credential from an unknown player
//! and from a transient upstream fault, so the client classifies every
//! non-success status into one of these variants. No retry is
//! performed anywhere; transient variants surface to the caller as-is.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiotError {
    /// Missing or invalid API key (upstream 401/403).
    #[error("Riot API rejected the credential")]
    Auth,

    /// Unknown handle, puuid or match id (upstream 404).
    #[error("Riot API has no data for the requested entity")]
    NotFound,

    /// The shared per-key ceiling was exceeded anyway (upstream 429).
    #[error("Riot API rate limit exceeded")]
    RateLimited,

    /// Any other non-success status.
    #[error("Riot API returned status {status}")]
    Upstream { status: u16 },

    /// Transport or body decoding failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl RiotError {
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            401 | 403 => RiotError::Auth,
            404 => RiotError::NotFound,
            429 => RiotError::RateLimited,
            status => RiotError::Upstream { status },
        }
    }
}
