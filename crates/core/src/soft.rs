//! Soft assertions - record failures without halting the scenario
//!
//! A [`SoftAssert`] accumulates independent check failures across one
//! scenario and raises a single aggregated error when drained. Each failure
//! is pushed to the injected [`ReportSink`] at check time, so a crash
//! mid-scenario still leaves a record of everything found so far.

use thiserror::Error;
use tracing::error;

/// Observability collaborator that persists failure messages and artifacts.
///
/// Implementations own where attachments land (a report directory, a CI
/// artifact store, ...). The core only pushes data through this trait.
pub trait ReportSink {
    /// Record one failure message the moment it is detected.
    fn report_failure(&self, message: &str);

    /// Attach a named text artifact to the run.
    fn attach_text(&self, name: &str, body: &str);

    /// Attach a named binary artifact (e.g. a screenshot) to the run.
    fn attach_bytes(&self, name: &str, bytes: &[u8]);
}

/// Sink that discards everything. Used in unit tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn report_failure(&self, _message: &str) {}
    fn attach_text(&self, _name: &str, _body: &str) {}
    fn attach_bytes(&self, _name: &str, _bytes: &[u8]) {}
}

/// Raised once per scenario when any soft check failed.
///
/// Carries the failure count and the full newline-joined report so the
/// runner's verdict enumerates every problem found.
#[derive(Debug, Error)]
#[error("soft assertions failed with {count} error(s):\n{report}")]
pub struct AggregatedAssertionError {
    pub count: usize,
    pub report: String,
}

/// Accumulates check failures for one scenario.
///
/// Lifecycle: created fresh at scenario start, drained exactly once with
/// [`SoftAssert::assert_all`] at scenario end, then discarded.
pub struct SoftAssert<'s> {
    errors: Vec<String>,
    sink: &'s dyn ReportSink,
}

impl<'s> SoftAssert<'s> {
    pub fn new(sink: &'s dyn ReportSink) -> Self {
        Self {
            errors: Vec::new(),
            sink,
        }
    }

    /// Verify a condition. On failure the message is formatted, appended to
    /// the failure log, logged, and reported to the sink immediately.
    pub fn check(&mut self, condition: bool, message: &str) {
        if !condition {
            let formatted = format!("[FAILURE] {message}");
            error!("{formatted}");
            self.sink.report_failure(&formatted);
            self.errors.push(formatted);
        }
    }

    /// Number of failures recorded so far.
    pub fn failure_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Drain the failure log. No-op when empty; otherwise attaches the full
    /// report to the sink and returns one aggregated error. Per-check
    /// reporting already happened at check time, so this only aggregates.
    pub fn assert_all(self) -> Result<(), AggregatedAssertionError> {
        if self.errors.is_empty() {
            return Ok(());
        }

        let count = self.errors.len();
        let report = self.errors.join("\n");
        self.sink.attach_text("failure-report", &report);

        Err(AggregatedAssertionError { count, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Sink that records everything pushed into it, for asserting on
    /// side-effect ordering.
    #[derive(Default)]
    struct RecordingSink {
        failures: RefCell<Vec<String>>,
        attachments: RefCell<Vec<(String, String)>>,
    }

    impl ReportSink for RecordingSink {
        fn report_failure(&self, message: &str) {
            self.failures.borrow_mut().push(message.to_string());
        }
        fn attach_text(&self, name: &str, body: &str) {
            self.attachments
                .borrow_mut()
                .push((name.to_string(), body.to_string()));
        }
        fn attach_bytes(&self, _name: &str, _bytes: &[u8]) {}
    }

    #[test]
    fn passing_checks_record_nothing() {
        let sink = RecordingSink::default();
        let mut soft = SoftAssert::new(&sink);
        soft.check(true, "all good");
        assert_eq!(soft.failure_count(), 0);
        assert!(soft.assert_all().is_ok());
        assert!(sink.failures.borrow().is_empty());
        assert!(sink.attachments.borrow().is_empty());
    }

    #[test]
    fn failures_are_reported_at_check_time() {
        let sink = RecordingSink::default();
        let mut soft = SoftAssert::new(&sink);
        soft.check(false, "first problem");
        // Sink already saw the failure before assert_all ran.
        assert_eq!(sink.failures.borrow().len(), 1);
        assert_eq!(sink.failures.borrow()[0], "[FAILURE] first problem");
    }

    #[test]
    fn assert_all_aggregates_in_order() {
        let sink = RecordingSink::default();
        let mut soft = SoftAssert::new(&sink);
        soft.check(false, "first problem");
        soft.check(true, "fine");
        soft.check(false, "second problem");

        let err = soft.assert_all().unwrap_err();
        assert_eq!(err.count, 2);
        assert_eq!(
            err.report,
            "[FAILURE] first problem\n[FAILURE] second problem"
        );
        // The error message surfaces the count and every original entry.
        let rendered = err.to_string();
        assert!(rendered.contains("2 error(s)"));
        assert!(rendered.contains("first problem"));
        assert!(rendered.contains("second problem"));
        // The aggregated report was attached, not re-reported per entry.
        assert_eq!(sink.failures.borrow().len(), 2);
        assert_eq!(sink.attachments.borrow().len(), 1);
        assert_eq!(sink.attachments.borrow()[0].0, "failure-report");
    }
}
