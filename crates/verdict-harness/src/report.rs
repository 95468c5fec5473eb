//! Test reporting - lifecycle hooks and colored console rendering

use crate::discovery::TestCase;
use crate::runner::RunResult;
use colored::*;
use std::io::{self, Write};
use std::time::Duration;

/// Width of the separator rules around the run
const RULE_WIDTH: usize = 50;

/// Lifecycle hooks the runner drives as a run progresses.
///
/// Implementations own the output sink; a hook failing (an unwritable
/// sink) propagates out of the run unhandled.
pub trait Report {
    /// Called once before any test runs
    fn start_run(&mut self, total: usize) -> io::Result<()>;
    /// Called immediately before a test executes
    fn start_test(&mut self, test: &TestCase) -> io::Result<()>;
    /// The test passed
    fn add_success(&mut self, test: &TestCase) -> io::Result<()>;
    /// The test broke unexpectedly (crash, signal, spawn failure)
    fn add_error(&mut self, test: &TestCase, detail: &str) -> io::Result<()>;
    /// The test reported an assertion mismatch
    fn add_failure(&mut self, test: &TestCase, detail: &str) -> io::Result<()>;
    /// The test deliberately bypassed itself
    fn add_skip(&mut self, test: &TestCase, reason: &str) -> io::Result<()>;
    /// Called once after every test has completed
    fn finish_run(&mut self, result: &RunResult, elapsed: Duration) -> io::Result<()>;
}

/// Console reporter: one colored progress line per test, then a summary.
///
/// Every styled segment carries its own reset sequence, so no terminal
/// state leaks past a write. `colored::control::set_override(false)`
/// disables styling globally when plain output is wanted.
pub struct ConsoleReport<W: Write> {
    out: W,
}

impl ConsoleReport<io::Stdout> {
    /// Reporter writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReport<W> {
    /// Create a reporter writing to an arbitrary sink
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the reporter, returning the sink
    pub fn into_inner(self) -> W {
        self.out
    }

    fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH).blue())
    }
}

impl<W: Write> Report for ConsoleReport<W> {
    fn start_run(&mut self, _total: usize) -> io::Result<()> {
        writeln!(self.out, "{}", "🚀 Starting test suite".magenta().on_white())?;
        self.rule()
    }

    fn start_test(&mut self, test: &TestCase) -> io::Result<()> {
        // Left unterminated; the outcome token completes the line
        write!(self.out, "{}", format!("Running: {}... ", test.name).cyan())?;
        self.out.flush()
    }

    fn add_success(&mut self, _test: &TestCase) -> io::Result<()> {
        writeln!(self.out, "{}", "✓ PASSED".green())
    }

    fn add_error(&mut self, _test: &TestCase, _detail: &str) -> io::Result<()> {
        writeln!(self.out, "{}", "✗ ERROR".red())
    }

    fn add_failure(&mut self, _test: &TestCase, _detail: &str) -> io::Result<()> {
        writeln!(self.out, "{}", "✗ FAILED".red())
    }

    fn add_skip(&mut self, _test: &TestCase, reason: &str) -> io::Result<()> {
        writeln!(self.out, "{}", format!("⚠ SKIPPED ({})", reason).yellow())
    }

    fn finish_run(&mut self, result: &RunResult, elapsed: Duration) -> io::Result<()> {
        self.rule()?;
        writeln!(self.out, "{}", "Test Summary:".magenta())?;
        writeln!(
            self.out,
            "Ran {} tests in {:.3}s",
            result.tests_run,
            elapsed.as_secs_f64()
        )?;

        if result.was_successful() {
            writeln!(self.out, "{}", "🎉 All tests passed!".green())?;
        } else {
            writeln!(self.out, "{}", "❌ Some tests failed.".red())?;
            if !result.errors.is_empty() {
                writeln!(self.out, "{}", format!("Errors: {}", result.errors.len()).red())?;
            }
            if !result.failures.is_empty() {
                writeln!(
                    self.out,
                    "{}",
                    format!("Failures: {}", result.failures.len()).red()
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn case(name: &str) -> TestCase {
        TestCase {
            name: name.to_string(),
            path: PathBuf::from(name),
        }
    }

    fn rendered<F>(drive: F) -> String
    where
        F: FnOnce(&mut ConsoleReport<Vec<u8>>) -> io::Result<()>,
    {
        colored::control::set_override(false);
        let mut report = ConsoleReport::new(Vec::new());
        drive(&mut report).unwrap();
        String::from_utf8(report.into_inner()).unwrap()
    }

    #[test]
    fn renders_mixed_run() {
        let a = case("test_a");
        let b = case("test_b");
        let c = case("test_c");

        let mut result = RunResult::default();
        result.tests_run = 3;
        result
            .errors
            .push((b.clone(), "terminated by signal".to_string()));
        result
            .skipped
            .push((c.clone(), "not supported on this platform".to_string()));

        let output = rendered(|r| {
            r.start_run(3)?;
            r.start_test(&a)?;
            r.add_success(&a)?;
            r.start_test(&b)?;
            r.add_error(&b, "terminated by signal")?;
            r.start_test(&c)?;
            r.add_skip(&c, "not supported on this platform")?;
            r.finish_run(&result, Duration::from_millis(2))
        });

        let expected = "\
🚀 Starting test suite
==================================================
Running: test_a... ✓ PASSED
Running: test_b... ✗ ERROR
Running: test_c... ⚠ SKIPPED (not supported on this platform)
==================================================
Test Summary:
Ran 3 tests in 0.002s
❌ Some tests failed.
Errors: 1
";
        assert_eq!(output, expected);
    }

    #[test]
    fn renders_failure_counts() {
        let t = case("test_math");

        let mut result = RunResult::default();
        result.tests_run = 1;
        result
            .failures
            .push((t.clone(), "assertion failed".to_string()));

        let output = rendered(|r| {
            r.start_run(1)?;
            r.start_test(&t)?;
            r.add_failure(&t, "assertion failed")?;
            r.finish_run(&result, Duration::from_millis(1))
        });

        assert!(output.contains("Running: test_math... ✗ FAILED\n"));
        assert!(output.contains("Ran 1 tests in 0.001s\n"));
        assert!(output.contains("❌ Some tests failed.\n"));
        assert!(output.contains("Failures: 1\n"));
        assert!(!output.contains("Errors:"));
    }

    #[test]
    fn renders_empty_run_as_success() {
        let output = rendered(|r| {
            r.start_run(0)?;
            r.finish_run(&RunResult::default(), Duration::ZERO)
        });

        assert!(output.contains("Ran 0 tests in 0.000s\n"));
        assert!(output.contains("🎉 All tests passed!\n"));
    }

    #[test]
    fn progress_line_stays_open_until_outcome() {
        let t = case("test_pending");

        let output = rendered(|r| {
            r.start_run(1)?;
            r.start_test(&t)
        });

        assert!(output.ends_with("Running: test_pending... "));
    }
}
