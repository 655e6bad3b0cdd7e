//! UI detail comparison - reconcile one rendered card against expectations
//!
//! A narrower variant of the reconciliation engine for data scraped out of
//! the board UI rather than fetched over the API. All checks are
//! independent and flow through [`SoftAssert`]; none short-circuits.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::soft::SoftAssert;

/// The four fields extracted from an open card's detail view.
///
/// Deliberately a closed record: a snapshot missing any field is rejected
/// at the deserialization boundary instead of propagating an untyped shape
/// inward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub title: String,
    pub description: String,
    pub labels: Vec<String>,
    pub status: String,
}

/// Expected values for one card's detail view. `label` is singular: one
/// label whose membership is checked, not the full label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedDetails {
    pub title: String,
    pub description: String,
    pub label: String,
    pub status: String,
}

/// Text and markup of one card as rendered on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSnippet {
    /// Visible inner text (first line is the title).
    pub text: String,
    /// Raw inner markup, used for color cues.
    pub markup: String,
}

impl CardSnippet {
    fn title(&self) -> &str {
        self.text.lines().next().unwrap_or_default()
    }

    /// A card reads as urgent when it shows the term literally or carries a
    /// red color cue in its markup.
    fn is_visually_urgent(&self) -> bool {
        self.text.contains("Urgent") || self.markup.contains("red")
    }
}

/// Compare an observed detail snapshot against the expected one.
///
/// Title is exact equality; description is substring containment after the
/// observed text is flattened (newlines to spaces, trimmed); the expected
/// label must be a member of the observed labels; the expected status must
/// be a substring of the observed status.
pub fn verify_card_details(
    actual: &CardDetails,
    expected: &ExpectedDetails,
    soft: &mut SoftAssert<'_>,
) {
    soft.check(
        actual.title == expected.title,
        &format!(
            "[UI] Title Mismatch. Expected: '{}', Got: '{}'",
            expected.title, actual.title
        ),
    );

    let flat_description = actual.description.replace('\n', " ");
    let flat_description = flat_description.trim();
    soft.check(
        flat_description.contains(&expected.description),
        &format!(
            "[UI] Description Mismatch.\nExpected to contain: '{}'\nGot: '{}'",
            expected.description, flat_description
        ),
    );

    soft.check(
        actual.labels.iter().any(|l| l == &expected.label),
        &format!(
            "[UI] Missing Label. Expected '{}' in {:?}",
            expected.label, actual.labels
        ),
    );

    soft.check(
        actual.status.contains(&expected.status),
        &format!(
            "[UI] Wrong Column. Expected '{}', Got: '{}'",
            expected.status, actual.status
        ),
    );
}

/// Check that every rendered card shows an urgency indicator. Each card is
/// checked independently; failures never stop the loop.
pub fn verify_urgent_card_visuals(cards: &[CardSnippet], soft: &mut SoftAssert<'_>) {
    if cards.is_empty() {
        warn!("No urgent cards provided for verification.");
        return;
    }

    for card in cards {
        let urgent = card.is_visually_urgent();
        soft.check(
            urgent,
            &format!(
                "[UI] Card '{}' is missing visual 'Urgent' indicator (Label/Text).",
                card.title()
            ),
        );
        if urgent {
            info!("Card '{}' verified as visually Urgent.", card.title());
        }
    }
}
