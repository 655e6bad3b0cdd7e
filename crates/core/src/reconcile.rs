//! Reconciliation engine - compare expected cards against the live board
//!
//! Every discrepancy is routed through [`SoftAssert`] so a single run
//! reports full coverage: one bad card never hides the next one. Failure
//! messages carry a category tag (`MISSING CARD`, `TITLE NOT CLEANED`,
//! `CONTENT MISMATCH`, `LABEL MISMATCH`, `DIRTY DATA`, `DUPLICATION`) for
//! triage.

use std::collections::HashMap;
use tracing::info;

use crate::card::CardRecord;
use crate::soft::SoftAssert;

/// Compares an expected card set against the cards fetched from the board.
///
/// The actual lookup map is last-seen-wins when the board carries true
/// duplicate titles; the integrity check runs over the original list and
/// flags those duplicates separately.
pub struct SyncVerifier<'a> {
    expected: &'a [CardRecord],
    actual: &'a [CardRecord],
    actual_by_title: HashMap<&'a str, &'a CardRecord>,
}

impl<'a> SyncVerifier<'a> {
    pub fn new(expected: &'a [CardRecord], actual: &'a [CardRecord]) -> Self {
        let mut actual_by_title = HashMap::new();
        for card in actual {
            actual_by_title.insert(card.title.as_str(), card);
        }
        Self {
            expected,
            actual,
            actual_by_title,
        }
    }

    /// Step 1: every expected card must exist on the board with its content
    /// and urgency label intact.
    pub fn verify_existence_and_content(&self, soft: &mut SoftAssert<'_>) {
        info!("Starting verification of existence and content...");
        for expected in self.expected {
            match self.actual_by_title.get(expected.title.as_str()) {
                None => self.handle_missing_card(expected, soft),
                Some(actual) => {
                    self.verify_content(expected, actual, soft);
                    self.verify_labels(expected, actual, soft);
                }
            }
        }
    }

    /// Step 2: the board itself must be clean - no un-normalized prefixes,
    /// no duplicate titles.
    ///
    /// Duplication is re-counted per occurrence: a title present N times
    /// yields N duplication failures. The redundancy is kept for visibility.
    pub fn verify_board_integrity(&self, soft: &mut SoftAssert<'_>) {
        info!("Starting integrity check...");
        let titles: Vec<&str> = self.actual.iter().map(|c| c.title.as_str()).collect();

        for card in self.actual {
            let lowered = card.title.to_lowercase();
            if lowered.starts_with("task:") || lowered.starts_with("meeting:") {
                soft.check(
                    false,
                    &format!(
                        "[BUG - DIRTY DATA] Found invalid card: '{}'. Prefix should be removed.",
                        card.title
                    ),
                );
            }

            let occurrences = titles.iter().filter(|t| **t == card.title).count();
            if occurrences > 1 {
                soft.check(
                    false,
                    &format!(
                        "[BUG - DUPLICATION] Card '{}' appears {} times!",
                        card.title, occurrences
                    ),
                );
            }
        }
    }

    /// An expected card is absent from the lookup. Distinguish "the sync
    /// never cleaned the title" from "the card is simply missing": if some
    /// actual title still contains the expected title plus a Task/Meeting
    /// marker, the prefix was left on. Exactly one failure per missing card.
    fn handle_missing_card(&self, expected: &CardRecord, soft: &mut SoftAssert<'_>) {
        for actual in self.actual {
            let title = actual.title.as_str();
            if title.contains(expected.title.as_str())
                && (title.contains("Task") || title.contains("Meeting"))
            {
                soft.check(
                    false,
                    &format!(
                        "[BUG - TITLE NOT CLEANED] Found '{}', expected clean '{}'.",
                        title, expected.title
                    ),
                );
                return;
            }
        }

        soft.check(
            false,
            &format!(
                "[MISSING CARD] '{}' exists in the inbox but NOT on the board.",
                expected.title
            ),
        );
    }

    /// Line-level containment: every non-empty trimmed line of the expected
    /// description must appear in the actual description. The actual card
    /// may carry extra content.
    fn verify_content(&self, expected: &CardRecord, actual: &CardRecord, soft: &mut SoftAssert<'_>) {
        for line in expected
            .description
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
        {
            soft.check(
                actual.description.contains(line),
                &format!(
                    "CONTENT MISMATCH in '{}': Expected text '{}' missing.",
                    expected.title, line
                ),
            );
        }
    }

    fn verify_labels(&self, expected: &CardRecord, actual: &CardRecord, soft: &mut SoftAssert<'_>) {
        if expected.has_label("Urgent") {
            soft.check(
                actual.has_label("Urgent"),
                &format!("LABEL MISMATCH: '{}' expected 'Urgent' label.", expected.title),
            );
        }
    }
}
