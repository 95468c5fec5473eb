//! Test discovery - find executable test files in a directory tree

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A discovered test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Display name of the test (file stem, e.g. "test_boot")
    pub name: String,
    /// Path to the executable test file
    pub path: PathBuf,
}

/// A suite of discovered tests
#[derive(Debug, Default)]
pub struct TestSuite {
    /// All discovered test cases
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    /// Discover all test files under `root` whose file name matches `pattern`.
    ///
    /// On Unix only files with an execute bit are collected; a data file
    /// that happens to match the pattern is not a test.
    pub fn discover(root: &Path, pattern: &str) -> Self {
        let mut suite = TestSuite::default();

        for entry in WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !matches_pattern(file_name, pattern) || !is_executable(path) {
                continue;
            }

            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(file_name)
                .to_string();

            suite.tests.push(TestCase {
                name,
                path: path.to_path_buf(),
            });
        }

        // Sort by path for deterministic run order
        suite.tests.sort_by(|a, b| a.path.cmp(&b.path));

        suite
    }

    /// Filter tests by name substring
    pub fn filter(&self, needle: &str) -> Self {
        TestSuite {
            tests: self
                .tests
                .iter()
                .filter(|t| t.name.contains(needle))
                .cloned()
                .collect(),
        }
    }

    /// Check if suite has any tests
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Get count of tests
    pub fn len(&self) -> usize {
        self.tests.len()
    }
}

/// Glob-lite file name matching: `*` matches any run of characters,
/// `?` matches exactly one, everything else is literal.
pub fn matches_pattern(name: &str, pattern: &str) -> bool {
    let name: Vec<char> = name.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    glob_match(&name, &pattern)
}

fn glob_match(name: &[char], pattern: &[char]) -> bool {
    match pattern.split_first() {
        None => name.is_empty(),
        Some((&'*', rest)) => (0..=name.len()).any(|i| glob_match(&name[i..], rest)),
        Some((&pc, rest)) => match name.split_first() {
            Some((&nc, name_rest)) => (pc == '?' || pc == nc) && glob_match(name_rest, rest),
            None => false,
        },
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}
