//! Test runner - execute discovered tests as child processes

use crate::discovery::{TestCase, TestSuite};
use crate::report::Report;
use std::io;
use std::process::{Command, Output};
use std::time::Instant;

/// Exit status a test uses to report a deliberate skip
pub const SKIP_CODE: i32 = 77;
/// Exit status a test uses to report unexpected breakage
pub const HARD_ERROR_CODE: i32 = 99;

/// Outcome of a single test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Test exited 0
    Pass,
    /// Unexpected breakage: exit 99, signal termination, or spawn failure
    Error { detail: String },
    /// Assertion mismatch: any other nonzero exit
    Failure { detail: String },
    /// Deliberately bypassed, with a reason
    Skip { reason: String },
}

/// Accumulated results of a completed run.
///
/// Mutated only by the runner as outcomes arrive; reporting reads it
/// after the run.
#[derive(Debug, Default)]
pub struct RunResult {
    /// Total number of tests executed
    pub tests_run: usize,
    /// Tests that broke unexpectedly, with details, in run order
    pub errors: Vec<(TestCase, String)>,
    /// Tests whose assertions failed, with details, in run order
    pub failures: Vec<(TestCase, String)>,
    /// Tests that skipped themselves, with reasons, in run order
    pub skipped: Vec<(TestCase, String)>,
}

impl RunResult {
    /// True when no test errored or failed (vacuously true for zero tests)
    pub fn was_successful(&self) -> bool {
        self.errors.is_empty() && self.failures.is_empty()
    }
}

/// Sequential test runner
#[derive(Debug, Default)]
pub struct TestRunner;

impl TestRunner {
    /// Create a new test runner
    pub fn new() -> Self {
        Self
    }

    /// Run every test in the suite, driving the report hooks in order.
    ///
    /// Failing tests are recorded, never propagated; the only error this
    /// returns is a failed write to the report's sink.
    pub fn run(&self, suite: &TestSuite, report: &mut dyn Report) -> io::Result<RunResult> {
        let mut result = RunResult::default();

        report.start_run(suite.len())?;
        let start = Instant::now();

        for test in &suite.tests {
            report.start_test(test)?;
            result.tests_run += 1;

            match run_single(test) {
                Outcome::Pass => report.add_success(test)?,
                Outcome::Error { detail } => {
                    report.add_error(test, &detail)?;
                    result.errors.push((test.clone(), detail));
                }
                Outcome::Failure { detail } => {
                    report.add_failure(test, &detail)?;
                    result.failures.push((test.clone(), detail));
                }
                Outcome::Skip { reason } => {
                    report.add_skip(test, &reason)?;
                    result.skipped.push((test.clone(), reason));
                }
            }
        }

        report.finish_run(&result, start.elapsed())?;
        Ok(result)
    }
}

fn run_single(test: &TestCase) -> Outcome {
    match Command::new(&test.path).output() {
        Ok(output) => classify(&output),
        Err(e) => Outcome::Error {
            detail: format!("failed to spawn {}: {}", test.path.display(), e),
        },
    }
}

/// Map a child's exit status to an outcome
pub fn classify(output: &Output) -> Outcome {
    match output.status.code() {
        Some(0) => Outcome::Pass,
        Some(SKIP_CODE) => Outcome::Skip {
            reason: skip_reason(&output.stdout),
        },
        Some(HARD_ERROR_CODE) => Outcome::Error {
            detail: detail_from(output),
        },
        Some(_) => Outcome::Failure {
            detail: detail_from(output),
        },
        // No exit code means the child was killed by a signal
        None => Outcome::Error {
            detail: format!("terminated by signal: {}", output.status),
        },
    }
}

/// A skipping test names its reason on the last non-empty stdout line
fn skip_reason(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| "skipped".to_string())
}

fn detail_from(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        output.status.to_string()
    } else {
        stderr.to_string()
    }
}
