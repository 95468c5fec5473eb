use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use verdict_harness::{ConsoleReport, TestRunner, TestSuite};

/// Colored test harness for executable test files.
///
/// Discovers executable files whose name matches a pattern (default
/// `test_*`), runs each as a child process, and prints one colored
/// progress line per test plus a final summary. Children report their
/// outcome through the exit status: 0 passes, 77 skips (the last stdout
/// line is the reason), 99 or a signal is an error, anything else is a
/// failure.
///
/// EXAMPLES:
///     verdict                     Run all tests under the current directory
///     verdict boot                Only tests whose name contains "boot"
///     verdict --dir tests/smoke   Discover in a specific directory
///     verdict --list              Show what would run, without running
///
/// Exits 0 when every test passed, 1 otherwise.
#[derive(Parser)]
#[command(name = "verdict")]
#[command(version)]
struct Cli {
    /// Filter tests by name substring
    filter: Option<String>,

    /// Directory to discover tests in
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// File name pattern for discovery (`*` and `?` wildcards)
    #[arg(long, default_value = "test_*")]
    pattern: String,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    /// List discovered tests without running them
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut suite = TestSuite::discover(&cli.dir, &cli.pattern);
    if let Some(filter) = &cli.filter {
        suite = suite.filter(filter);
    }

    if cli.list {
        for test in &suite.tests {
            println!("{}", test.name);
        }
        return Ok(());
    }

    let mut report = ConsoleReport::stdout();
    let result = TestRunner::new().run(&suite, &mut report)?;

    if !result.was_successful() {
        std::process::exit(1);
    }

    Ok(())
}
