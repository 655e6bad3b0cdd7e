//! Board API client - fetches the actual card set over REST

use serde::Deserialize;
use tracing::info;

use boardsync_core::CardRecord;

use crate::error::{HarnessError, HarnessResult};

/// Credentials and endpoint for a Trello-style board API.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_token: String,
    pub board_id: String,
}

impl BoardConfig {
    /// Read credentials from the environment. Any missing variable fails
    /// construction immediately - there is no comparison worth running
    /// against a board we cannot reach.
    pub fn from_env(base_url: impl Into<String>) -> HarnessResult<Self> {
        Ok(Self {
            base_url: base_url.into(),
            api_key: require_env("BOARD_API_KEY")?,
            api_token: require_env("BOARD_API_TOKEN")?,
            board_id: require_env("BOARD_ID")?,
        })
    }
}

pub(crate) fn require_env(name: &str) -> HarnessResult<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| HarnessError::MissingCredential(name.to_string()))
}

/// Wire shape of one card as the board API returns it.
#[derive(Debug, Deserialize)]
struct ApiCard {
    name: String,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    labels: Vec<ApiLabel>,
}

#[derive(Debug, Deserialize)]
struct ApiLabel {
    #[serde(default)]
    name: String,
}

impl From<ApiCard> for CardRecord {
    fn from(card: ApiCard) -> Self {
        CardRecord {
            title: card.name,
            description: card.desc,
            // Color-only labels come back with an empty name; skip them.
            labels: card
                .labels
                .into_iter()
                .map(|l| l.name)
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }
}

/// REST client for the board.
pub struct BoardClient {
    config: BoardConfig,
    http: reqwest::Client,
}

impl BoardClient {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Fetch every card on the board, in the API's order, selecting only
    /// the fields the reconciliation needs.
    pub async fn get_all_cards(&self) -> HarnessResult<Vec<CardRecord>> {
        let url = format!(
            "{}/boards/{}/cards",
            self.config.base_url, self.config.board_id
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("token", self.config.api_token.as_str()),
                ("fields", "name,desc,labels,idList"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(HarnessError::BoardApi(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let cards: Vec<ApiCard> = response.json().await?;
        info!("Fetched {} card(s) from the board", cards.len());

        Ok(cards.into_iter().map(CardRecord::from).collect())
    }
}
