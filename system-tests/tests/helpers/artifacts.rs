// system-tests/tests/helpers/artifacts.rs
// ============================================================================
// Module: Test Artifacts
// Description: Per-test artifact directories and run summaries.
// Purpose: Leave a report, transcript, and summary behind for every test.
// Dependencies: system-tests, serde, serde_jcs
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use system_tests::config::SystemTestConfig;

fn unix_millis() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Directory holding one test's artifacts.
#[derive(Debug, Clone)]
pub struct TestArtifacts {
    root: PathBuf,
}

impl TestArtifacts {
    /// Creates `<run root>/<test name>`; the run root defaults to a
    /// timestamped directory under `target/foody-system-tests`.
    pub fn new(test_name: &str) -> io::Result<Self> {
        let run_root = SystemTestConfig::load().map_err(io::Error::other)?.run_root.unwrap_or_else(
            || PathBuf::from("target/foody-system-tests").join(format!("run_{}", unix_millis())),
        );
        let root = run_root.join(test_name);
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
        })
    }

    /// Returns the artifact directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes `value` as canonical (JCS) JSON.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> io::Result<PathBuf> {
        let bytes = serde_jcs::to_vec(value).map_err(|err| io::Error::other(err.to_string()))?;
        self.write_bytes(name, &bytes)
    }

    /// Writes UTF-8 text.
    pub fn write_text(&self, name: &str, value: &str) -> io::Result<PathBuf> {
        self.write_bytes(name, value.as_bytes())
    }

    fn write_bytes(&self, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

#[derive(Debug, Serialize)]
struct TestSummary<'a> {
    test_name: &'a str,
    status: &'a str,
    started_at_ms: u128,
    ended_at_ms: u128,
    duration_ms: u128,
    notes: &'a [String],
    artifacts: &'a [String],
}

impl TestSummary<'_> {
    fn to_markdown(&self) -> String {
        let mut out = format!(
            "# {} ({})\n\nFinished in {} ms.\n",
            self.test_name, self.status, self.duration_ms
        );
        for (heading, items) in [("Notes", self.notes), ("Artifacts", self.artifacts)] {
            let _ = write!(out, "\n## {heading}\n\n");
            if items.is_empty() {
                out.push_str("_none_\n");
            }
            for item in items {
                let _ = writeln!(out, "- {item}");
            }
        }
        out
    }
}

/// Records a test's outcome; a reporter dropped without [`Self::finish`]
/// still writes a summary, marked `panic` or `incomplete`.
pub struct TestReporter {
    artifacts: TestArtifacts,
    test_name: String,
    started_at_ms: u128,
    finished: bool,
}

impl TestReporter {
    /// Creates a reporter and its artifact directory.
    pub fn new(test_name: &str) -> io::Result<Self> {
        Ok(Self {
            artifacts: TestArtifacts::new(test_name)?,
            test_name: test_name.to_string(),
            started_at_ms: unix_millis(),
            finished: false,
        })
    }

    /// Returns the artifact directory of this test.
    pub fn artifacts(&self) -> &TestArtifacts {
        &self.artifacts
    }

    /// Writes `summary.json` and `summary.md`.
    pub fn finish(
        &mut self,
        status: &str,
        notes: Vec<String>,
        artifacts: Vec<String>,
    ) -> io::Result<()> {
        let ended_at_ms = unix_millis();
        let summary = TestSummary {
            test_name: &self.test_name,
            status,
            started_at_ms: self.started_at_ms,
            ended_at_ms,
            duration_ms: ended_at_ms.saturating_sub(self.started_at_ms),
            notes: &notes,
            artifacts: &artifacts,
        };
        self.artifacts.write_json("summary.json", &summary)?;
        self.artifacts.write_text("summary.md", &summary.to_markdown())?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        if !self.finished {
            let status = if std::thread::panicking() { "panic" } else { "incomplete" };
            let _ = self.finish(status, vec!["no summary was recorded".to_string()], Vec::new());
        }
    }
}
