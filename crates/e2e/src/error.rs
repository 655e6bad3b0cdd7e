//! Error types for the E2E harness
//!
//! Setup and collaborator failures are hard errors that abort the run;
//! reconciliation mismatches never appear here - they flow through the
//! core's soft assertions and surface as one [`AggregatedAssertionError`]
//! per scenario.

use std::path::PathBuf;
use thiserror::Error;

use boardsync_core::AggregatedAssertionError;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Inbox fixture not found at: {0}")]
    FixtureNotFound(PathBuf),

    #[error("Missing credential: {0}. Set it in the environment before running")]
    MissingCredential(String),

    #[error("Board API error: {0}")]
    BoardApi(String),

    #[error("Playwright not found. Install with: npx playwright install")]
    PlaywrightNotFound,

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Authentication expired: saved storage state was rejected by the board. Delete it and log in again")]
    AuthExpired,

    #[error("Card not found on board: '{0}'")]
    CardNotFound(String),

    #[error(transparent)]
    Assertions(#[from] AggregatedAssertionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
