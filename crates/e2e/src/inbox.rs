//! Inbox fixture - the message source feeding the expectation builder

use std::path::Path;
use serde::Deserialize;
use tracing::info;

use boardsync_core::{build_expected_cards, CardRecord, RawMessage};

use crate::error::{HarnessError, HarnessResult};

#[derive(Debug, Deserialize)]
struct FixtureFile {
    #[serde(default)]
    messages: Vec<RawMessage>,
}

/// An ordered set of inbox messages loaded from a JSON fixture.
#[derive(Debug, Clone)]
pub struct InboxFixture {
    messages: Vec<RawMessage>,
}

impl InboxFixture {
    /// Load the fixture from disk. A missing file is a fatal setup error,
    /// never a silently-empty inbox.
    pub fn load(path: &Path) -> HarnessResult<Self> {
        if !path.exists() {
            return Err(HarnessError::FixtureNotFound(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path)?;
        let parsed: FixtureFile = serde_json::from_str(&raw)?;

        info!("Loaded {} raw message(s) from {}", parsed.messages.len(), path.display());
        Ok(Self {
            messages: parsed.messages,
        })
    }

    pub fn messages(&self) -> &[RawMessage] {
        &self.messages
    }

    /// The cards the board should contain, per the sync pipeline's rules.
    pub fn expected_cards(&self) -> Vec<CardRecord> {
        build_expected_cards(&self.messages)
    }
}
