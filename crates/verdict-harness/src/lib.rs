//! Test harness infrastructure for verdict
//!
//! Provides test discovery, execution, and reporting for executable
//! test files, following the classic harness exit-code protocol
//! (0 pass, 77 skip, 99 hard error).

pub mod discovery;
pub mod report;
pub mod runner;

pub use discovery::{TestCase, TestSuite};
pub use report::{ConsoleReport, Report};
pub use runner::{RunResult, TestRunner};
