//! Boardsync reconciliation core
//!
//! Pure comparison logic for validating an inbox-to-board sync pipeline:
//! - Derive the expected set of board cards from raw inbox messages
//!   (normalization, merge, urgency labeling)
//! - Reconcile that expected set against the cards actually found on the
//!   board, reporting every discrepancy instead of stopping at the first
//! - Compare a single card's rendered detail view against expectations
//!
//! All I/O (fetching messages, fetching cards, driving a browser) lives in
//! the `boardsync-e2e` crate. This crate is synchronous and side-effect
//! free apart from the injected [`ReportSink`].

pub mod card;
pub mod expect;
pub mod reconcile;
pub mod soft;
pub mod ui;

pub use card::{CardRecord, RawMessage};
pub use expect::{build_expected_cards, is_urgent, normalize_title};
pub use reconcile::SyncVerifier;
pub use soft::{AggregatedAssertionError, NullSink, ReportSink, SoftAssert};
pub use ui::{
    verify_card_details, verify_urgent_card_visuals, CardDetails, CardSnippet, ExpectedDetails,
};

/// Boardsync core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
