//! Boardsync E2E harness
//!
//! Rust-controlled end-to-end validation of an inbox-to-board sync
//! pipeline. The pure comparison logic lives in `boardsync-core`; this
//! crate supplies every collaborator that touches the outside world and
//! the scenario runner that wires them together.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 E2E Scenario Runner (Rust)                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  inbox::InboxFixture      JSON fixture -> RawMessage        │
//! │  board::BoardClient       board REST API -> CardRecord      │
//! │  session::ensure_storage_state   login + saved auth state   │
//! │  browser::BoardPage       Playwright via node subprocess    │
//! │  report::DirReporter      failure log + artifact directory  │
//! │  runner::ScenarioRunner   fresh SoftAssert per scenario,    │
//! │                           drained once, results JSON        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  boardsync-core           expectation builder,              │
//! │                           reconciliation, UI comparator     │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod board;
pub mod browser;
pub mod error;
pub mod inbox;
pub mod report;
pub mod runner;
pub mod session;

pub use error::{HarnessError, HarnessResult};
pub use report::DirReporter;
pub use runner::ScenarioRunner;
