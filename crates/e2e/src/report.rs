//! Directory report sink
//!
//! Implements the core's `ReportSink` by writing every failure and
//! attachment into a per-run report directory the moment it arrives, so a
//! crashed run still leaves its evidence on disk.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{info, warn};

use boardsync_core::ReportSink;

use crate::error::HarnessResult;

/// Failure sink backed by a timestamped directory under a base path.
pub struct DirReporter {
    run_dir: PathBuf,
    failure_seq: AtomicUsize,
}

impl DirReporter {
    pub fn new(base_dir: impl AsRef<Path>) -> HarnessResult<Self> {
        let run_dir = base_dir
            .as_ref()
            .join(format!("run-{}", chrono::Local::now().format("%Y%m%d-%H%M%S")));
        std::fs::create_dir_all(&run_dir)?;
        info!("Report directory: {}", run_dir.display());

        Ok(Self {
            run_dir,
            failure_seq: AtomicUsize::new(0),
        })
    }

    /// Directory this run's artifacts land in.
    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    fn write(&self, filename: &str, bytes: &[u8]) {
        let path = self.run_dir.join(filename);
        // A failing disk write must not abort the scenario mid-check.
        if let Err(e) = std::fs::write(&path, bytes) {
            warn!("Could not write report artifact {}: {}", path.display(), e);
        }
    }
}

/// Keep attachment names filesystem-safe.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

impl ReportSink for DirReporter {
    fn report_failure(&self, message: &str) {
        let seq = self.failure_seq.fetch_add(1, Ordering::Relaxed) + 1;
        self.write(&format!("failure-{seq:03}.txt"), message.as_bytes());
    }

    fn attach_text(&self, name: &str, body: &str) {
        self.write(&format!("{}.txt", sanitize(name)), body.as_bytes());
    }

    fn attach_bytes(&self, name: &str, bytes: &[u8]) {
        self.write(&sanitize(name), bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardsync_core::SoftAssert;

    #[test]
    fn failures_land_on_disk_at_check_time() {
        let base = tempfile::tempdir().unwrap();
        let reporter = DirReporter::new(base.path()).unwrap();

        let mut soft = SoftAssert::new(&reporter);
        soft.check(false, "something broke");

        // Written before assert_all ran.
        let first = reporter.run_dir().join("failure-001.txt");
        let content = std::fs::read_to_string(first).unwrap();
        assert_eq!(content, "[FAILURE] something broke");

        let err = soft.assert_all().unwrap_err();
        assert_eq!(err.count, 1);
        let report = reporter.run_dir().join("failure-report.txt");
        assert!(report.exists());
    }

    #[test]
    fn failure_files_are_numbered_in_order() {
        let base = tempfile::tempdir().unwrap();
        let reporter = DirReporter::new(base.path()).unwrap();
        reporter.report_failure("first");
        reporter.report_failure("second");

        let first = std::fs::read_to_string(reporter.run_dir().join("failure-001.txt")).unwrap();
        let second = std::fs::read_to_string(reporter.run_dir().join("failure-002.txt")).unwrap();
        assert_eq!(first, "first");
        assert_eq!(second, "second");
    }

    #[test]
    fn attachment_names_are_sanitized() {
        let base = tempfile::tempdir().unwrap();
        let reporter = DirReporter::new(base.path()).unwrap();
        reporter.attach_text("weird name/with:stuff", "body");
        assert!(reporter
            .run_dir()
            .join("weird-name-with-stuff.txt")
            .exists());

        reporter.attach_bytes("login-failure.png", &[0x89, 0x50]);
        assert!(reporter.run_dir().join("login-failure.png").exists());
    }
}
