//! Expectation builder - derive expected board cards from inbox messages
//!
//! Applies the sync pipeline's rules to raw messages: subject normalization,
//! merge by normalized title, and urgency labeling. The result is the set of
//! cards the board should contain if the pipeline ran correctly.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

use crate::card::{CardRecord, RawMessage};

static TITLE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(task:|meeting:)\s*").expect("valid prefix pattern"));

/// Normalize a message subject into a card title: strip a leading
/// `Task:`/`Meeting:` prefix (case-insensitive, with trailing whitespace),
/// trim, and collapse internal whitespace runs to single spaces.
///
/// Idempotent: normalizing an already-normalized title is a no-op.
pub fn normalize_title(raw_subject: &str) -> String {
    let stripped = TITLE_PREFIX.replace(raw_subject, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A message is urgent when its body mentions "urgent", any casing.
pub fn is_urgent(body: &str) -> bool {
    body.to_lowercase().contains("urgent")
}

/// Build the expected card set from an ordered message sequence.
///
/// Messages normalizing to an empty title are silently dropped. Messages
/// sharing a normalized title merge into the first-seen card: the body is
/// appended newline-joined unless it is empty or already a substring of the
/// accumulated description (a deliberately lossy dedup heuristic - repeated
/// reminder emails often partially overlap), and an urgent body marks the
/// whole card `Urgent`. Every new card starts with the `New` label.
///
/// Output order is first appearance per title.
pub fn build_expected_cards(messages: &[RawMessage]) -> Vec<CardRecord> {
    debug!("Building expectations from {} raw message(s)", messages.len());

    let mut cards: Vec<CardRecord> = Vec::new();
    let mut index_by_title: HashMap<String, usize> = HashMap::new();

    for msg in messages {
        let title = normalize_title(&msg.subject);
        if title.is_empty() {
            continue;
        }

        let urgent = is_urgent(&msg.body);

        match index_by_title.get(&title) {
            Some(&idx) => {
                let card = &mut cards[idx];

                if !msg.body.is_empty() && !card.description.contains(&msg.body) {
                    if card.description.is_empty() {
                        card.description = msg.body.clone();
                    } else {
                        card.description.push('\n');
                        card.description.push_str(&msg.body);
                    }
                }

                if urgent {
                    card.add_label("Urgent");
                }
            }
            None => {
                let mut card = CardRecord::new(title.clone(), msg.body.clone());
                card.add_label("New");
                if urgent {
                    card.add_label("Urgent");
                }
                index_by_title.insert(title, cards.len());
                cards.push(card);
            }
        }
    }

    cards
}
