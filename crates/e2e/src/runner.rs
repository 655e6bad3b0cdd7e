//! Scenario runner - one fresh SoftAssert per scenario, drained once
//!
//! All I/O happens before a scenario's checks run, so the check phase
//! itself is synchronous: the runner hands the closure a fresh
//! `SoftAssert` wired to the report sink, drains it exactly once when the
//! closure returns, and records the verdict.

use std::path::{Path, PathBuf};
use std::time::Instant;
use serde::Serialize;
use tracing::{error, info};

use boardsync_core::SoftAssert;

use crate::error::HarnessResult;
use crate::report::DirReporter;

/// Verdict of one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub passed: bool,
    pub failure_count: usize,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Verdict of the whole run.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
}

impl SuiteResult {
    /// Write the suite verdict as pretty JSON into `dir`.
    pub fn write_json(&self, dir: &Path) -> HarnessResult<PathBuf> {
        let path = dir.join("results.json");
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json)?;
        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

/// Runs check phases against already-fetched data and collects verdicts.
pub struct ScenarioRunner<'r> {
    reporter: &'r DirReporter,
    results: Vec<ScenarioResult>,
    started: Instant,
}

impl<'r> ScenarioRunner<'r> {
    pub fn new(reporter: &'r DirReporter) -> Self {
        Self {
            reporter,
            results: Vec::new(),
            started: Instant::now(),
        }
    }

    /// Run one scenario's checks with a fresh SoftAssert and drain it.
    /// Returns whether the scenario passed.
    pub fn run_checks<F>(&mut self, name: &str, checks: F) -> bool
    where
        F: FnOnce(&mut SoftAssert<'_>),
    {
        info!("Running scenario: {name}");
        let start = Instant::now();

        let mut soft = SoftAssert::new(self.reporter);
        checks(&mut soft);
        let failure_count = soft.failure_count();

        let duration_ms = start.elapsed().as_millis() as u64;
        let result = match soft.assert_all() {
            Ok(()) => {
                info!("✓ {name} ({duration_ms} ms)");
                ScenarioResult {
                    name: name.to_string(),
                    passed: true,
                    failure_count: 0,
                    duration_ms,
                    error: None,
                }
            }
            Err(e) => {
                error!("✗ {name} - {} failure(s)", e.count);
                ScenarioResult {
                    name: name.to_string(),
                    passed: false,
                    failure_count,
                    duration_ms,
                    error: Some(e.to_string()),
                }
            }
        };

        let passed = result.passed;
        self.results.push(result);
        passed
    }

    pub fn finish(self) -> SuiteResult {
        let duration_ms = self.started.elapsed().as_millis() as u64;
        let passed = self.results.iter().filter(|r| r.passed).count();
        let failed = self.results.len() - passed;

        info!("");
        info!(
            "Scenario Results: {} passed, {} failed ({} ms)",
            passed, failed, duration_ms
        );

        SuiteResult {
            total: self.results.len(),
            passed,
            failed,
            duration_ms,
            results: self.results,
        }
    }
}
