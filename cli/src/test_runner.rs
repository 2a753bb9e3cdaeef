use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use pseudo::parser::{ParseWarning, Parser};
use pseudo::render::{TextOptions, render_text};

/// Fixture files end with this suffix.
const FIXTURE_SUFFIX: &str = ".test.pseudo";

#[derive(Debug, Deserialize)]
pub struct ExpectedWarning {
    /// Substring that must appear in the warning message.
    pub contains: String,

    /// If set, the warning must be on this 1-based line of the fixture body.
    #[serde(default)]
    pub line: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TestConfig {
    /// Human-readable test description.
    #[serde(default)]
    pub description: Option<String>,

    /// Expected rendered text. Leading and trailing newlines are ignored;
    /// indentation is not.
    #[serde(default)]
    pub expect_output: Option<String>,

    /// Expected warnings. If present (even empty), warning count and content are checked.
    #[serde(default)]
    pub expect_warnings: Option<Vec<ExpectedWarning>>,

    #[serde(default)]
    pub indent: Option<usize>,

    #[serde(default)]
    pub guides: bool,

    #[serde(default)]
    pub trim: bool,
}

impl TestConfig {
    fn text_options(&self) -> TextOptions {
        let defaults = TextOptions::default();
        TextOptions {
            indent: self.indent.unwrap_or(defaults.indent),
            guides: self.guides,
            trim: self.trim,
        }
    }
}

/// Split a fixture file into its TOML config and pseudocode body.
fn parse_test_file(content: &str) -> Result<(TestConfig, &str), String> {
    let content = content.trim_start_matches('\u{feff}'); // strip BOM

    if !content.starts_with("---") {
        return Err("missing opening --- frontmatter delimiter".into());
    }

    let after_open = &content[3..];
    let after_open = after_open
        .strip_prefix('\n')
        .or_else(|| after_open.strip_prefix("\r\n"))
        .unwrap_or(after_open);

    let close_pos = after_open
        .find("\n---")
        .ok_or("missing closing --- frontmatter delimiter")?;

    let toml_str = after_open[..close_pos].trim_end_matches('\r');
    let rest_start = close_pos + 4; // skip \n---
    let source = after_open[rest_start..]
        .strip_prefix("\r\n")
        .or_else(|| after_open[rest_start..].strip_prefix('\n'))
        .unwrap_or(&after_open[rest_start..]);

    let config: TestConfig =
        toml::from_str(toml_str).map_err(|e| format!("TOML parse error: {}", e))?;

    Ok((config, source))
}

pub enum TestOutcome {
    Pass,
    Fail(String),
}

pub struct TestResult {
    pub path: PathBuf,
    pub description: Option<String>,
    pub outcome: TestOutcome,
}

fn run_single_test(path: &Path) -> TestResult {
    // 1. Read file
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            return TestResult {
                path: path.to_path_buf(),
                description: None,
                outcome: TestOutcome::Fail(format!("cannot read file: {}", e)),
            };
        }
    };

    // 2. Parse frontmatter
    let (config, source) = match parse_test_file(&content) {
        Ok(pair) => pair,
        Err(e) => {
            return TestResult {
                path: path.to_path_buf(),
                description: None,
                outcome: TestOutcome::Fail(format!("frontmatter error: {}", e)),
            };
        }
    };

    let description = config.description.clone();

    // 3. Parse and render the body
    let parsed = Parser::new(source.to_string(), 0).parse();
    let rendered = render_text(&parsed.forest.nodes, &config.text_options());
    log::debug!("{}: {} warning(s)", path.display(), parsed.warnings.len());

    // 4. Check output, then warnings
    let failure = config
        .expect_output
        .as_deref()
        .and_then(|expected| check_output(expected, &rendered))
        .or_else(|| {
            config
                .expect_warnings
                .as_deref()
                .and_then(|expected| check_warnings(&parsed.warnings, expected))
        });

    TestResult {
        path: path.to_path_buf(),
        description,
        outcome: match failure {
            Some(reason) => TestOutcome::Fail(reason),
            None => TestOutcome::Pass,
        },
    }
}

fn check_output(expected: &str, actual: &str) -> Option<String> {
    let expected = expected.trim_matches(['\n', '\r']);
    let actual = actual.trim_matches(['\n', '\r']);
    if expected == actual {
        return None;
    }
    Some(format!(
        "output mismatch\n  expected:\n{}\n  actual:\n{}",
        indent_lines(expected),
        indent_lines(actual)
    ))
}

fn indent_lines(text: &str) -> String {
    text.lines()
        .map(|l| format!("    | {}", l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check that actual warnings match expectations. Returns `Some(reason)` on mismatch.
fn check_warnings(actual: &[ParseWarning], expected: &[ExpectedWarning]) -> Option<String> {
    if actual.len() != expected.len() {
        let actual_msgs: Vec<String> = actual.iter().map(|w| format!("  - {}", w)).collect();
        return Some(format!(
            "expected {} warning(s), got {}\n  actual warnings:\n{}",
            expected.len(),
            actual.len(),
            if actual_msgs.is_empty() {
                "    (none)".to_string()
            } else {
                actual_msgs.join("\n")
            }
        ));
    }

    for (i, (actual, expected)) in actual.iter().zip(expected.iter()).enumerate() {
        if !actual.message.contains(&expected.contains) {
            return Some(format!(
                "warning[{}]: expected message containing \"{}\", got: {}",
                i, expected.contains, actual.message
            ));
        }

        if let Some(expected_line) = expected.line {
            if actual.line != expected_line {
                return Some(format!(
                    "warning[{}]: expected on line {}, but it is on line {}",
                    i, expected_line, actual.line
                ));
            }
        }
    }

    None
}

/// Discover fixture files grouped by category (subfolder relative to root).
/// Files directly in `root` get category "" (uncategorized).
fn discover_categorized(root: &Path) -> BTreeMap<String, Vec<PathBuf>> {
    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    collect_tests(root, root, &mut categories);
    for files in categories.values_mut() {
        files.sort();
    }
    categories
}

fn collect_tests(dir: &Path, root: &Path, out: &mut BTreeMap<String, Vec<PathBuf>>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_tests(&path, root, out);
        } else if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if name.ends_with(FIXTURE_SUFFIX) {
                let category = path
                    .parent()
                    .and_then(|p| p.strip_prefix(root).ok())
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
                    .unwrap_or_default();
                out.entry(category).or_default().push(path);
            }
        }
    }
}

/// List available categories for the given test path.
pub fn list_categories(path: &Path) {
    if path.is_file() {
        eprintln!("(single file, no categories)");
        return;
    }

    let categories = discover_categorized(path);
    if categories.is_empty() {
        eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
        return;
    }

    eprintln!("available categories:");
    for (cat, files) in &categories {
        let label = if cat.is_empty() { "(root)" } else { cat.as_str() };
        eprintln!("  {} ({} tests)", label, files.len());
    }
}

fn pass_label(no_color: bool) -> &'static str {
    if no_color { "PASS" } else { "\x1b[32mPASS\x1b[0m" }
}

fn fail_label(no_color: bool) -> &'static str {
    if no_color { "FAIL" } else { "\x1b[31mFAIL\x1b[0m" }
}

fn bold(s: &str, no_color: bool) -> String {
    if no_color {
        s.to_string()
    } else {
        format!("\x1b[1m{}\x1b[0m", s)
    }
}

fn test_label(result: &TestResult) -> &str {
    result.description.as_deref().unwrap_or_else(|| {
        result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .and_then(|s| s.strip_suffix(FIXTURE_SUFFIX))
            .unwrap_or("?")
    })
}

/// Select the categories to run. Unknown requests are reported and skipped.
fn filter_categories<'c>(
    all: &'c BTreeMap<String, Vec<PathBuf>>,
    requested: &[String],
) -> BTreeMap<&'c str, &'c Vec<PathBuf>> {
    if requested.is_empty() {
        return all.iter().map(|(k, v)| (k.as_str(), v)).collect();
    }

    let mut filtered = BTreeMap::new();
    for request in requested {
        let req = request.trim_matches('/');
        let mut found = false;
        for (cat, files) in all {
            if cat == req || cat.starts_with(&format!("{}/", req)) {
                filtered.insert(cat.as_str(), files);
                found = true;
            }
        }
        if !found {
            eprintln!(
                "warning: category '{}' not found (available: {})",
                req,
                all.keys()
                    .map(|k| if k.is_empty() { "(root)" } else { k.as_str() })
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }
    filtered
}

/// Run all fixture files under `path` (or a single file).
/// If `categories` is non-empty, only run tests in those categories.
/// Returns exit code: 0 = all pass, 1 = any failure.
pub fn run_tests(path: &Path, no_color: bool, categories: &[String]) -> i32 {
    let run_categories: BTreeMap<String, Vec<PathBuf>> = if path.is_file() {
        // Single file mode ignores categories
        BTreeMap::from([(String::new(), vec![path.to_path_buf()])])
    } else {
        let all_categories = discover_categorized(path);
        if all_categories.is_empty() {
            eprintln!("no {} files found in {}", FIXTURE_SUFFIX, path.display());
            return 1;
        }
        filter_categories(&all_categories, categories)
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    };

    if run_categories.is_empty() {
        eprintln!("no matching categories found");
        return 1;
    }

    let mut passed = 0usize;
    let mut failures: Vec<TestResult> = Vec::new();

    for (cat, files) in &run_categories {
        let header = if cat.is_empty() { "(root)" } else { cat.as_str() };
        eprintln!();
        eprintln!("{}", bold(header, no_color));

        for file in files {
            let result = run_single_test(file);
            match &result.outcome {
                TestOutcome::Pass => {
                    passed += 1;
                    eprintln!("  {}  {}", pass_label(no_color), test_label(&result));
                }
                TestOutcome::Fail(_) => {
                    eprintln!("  {}  {}", fail_label(no_color), test_label(&result));
                    failures.push(result);
                }
            }
        }
    }

    // Print failure details
    if !failures.is_empty() {
        eprintln!();
        eprintln!("failures:");
        for f in &failures {
            eprintln!();
            eprintln!("  --- {} ---", f.path.display());
            if let TestOutcome::Fail(reason) = &f.outcome {
                for line in reason.lines() {
                    eprintln!("  {}", line);
                }
            }
        }
    }

    // Summary
    let failed = failures.len();
    eprintln!();
    if failed == 0 {
        let ok = if no_color { "ok" } else { "\x1b[32mok\x1b[0m" };
        eprintln!("test result: {}. {} passed, 0 failed", ok, passed);
        0
    } else {
        let bad = if no_color { "FAILED" } else { "\x1b[31mFAILED\x1b[0m" };
        eprintln!(
            "test result: {}. {} passed, {} failed (of {})",
            bad,
            passed,
            failed,
            passed + failed
        );
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }

    #[test]
    fn frontmatter_splits_config_and_body() {
        let (config, body) =
            parse_test_file("---\ndescription = \"x\"\ntrim = true\n---\nif a\nend\n").unwrap();
        assert_eq!(config.description.as_deref(), Some("x"));
        assert!(config.trim);
        assert_eq!(body, "if a\nend\n");
    }

    #[test]
    fn frontmatter_is_required() {
        assert!(parse_test_file("if a\nend").is_err());
        assert!(parse_test_file("---\ntrim = true\n").is_err());
    }

    #[test]
    fn bundled_fixtures_pass() {
        let categories = discover_categorized(&fixtures());
        assert!(categories.contains_key("basics"));
        assert!(categories.contains_key("recovery"));
        for file in categories.values().flatten() {
            let result = run_single_test(file);
            if let TestOutcome::Fail(reason) = result.outcome {
                panic!("{}: {}", file.display(), reason);
            }
        }
        assert_eq!(run_tests(&fixtures(), true, &[]), 0);
    }

    #[test]
    fn category_filter_selects_subfolders() {
        let all = discover_categorized(&fixtures());
        let selected = filter_categories(&all, &["recovery/".to_string()]);
        assert_eq!(selected.keys().copied().collect::<Vec<_>>(), vec!["recovery"]);
    }

    #[test]
    fn mismatched_output_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrong.test.pseudo");
        std::fs::write(&path, "---\nexpect_output = \"if a\"\n---\nif a\n  b\nend\n").unwrap();
        let result = run_single_test(&path);
        let TestOutcome::Fail(reason) = result.outcome else {
            panic!("expected failure");
        };
        assert!(reason.starts_with("output mismatch"));
        assert_eq!(run_tests(&path, true, &[]), 1);
    }

    #[test]
    fn warning_lines_are_checked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.test.pseudo");
        std::fs::write(
            &path,
            "---\nexpect_warnings = [{ contains = \"unbalanced\", line = 1 }]\n---\nx\nend\n",
        )
        .unwrap();
        let TestOutcome::Fail(reason) = run_single_test(&path).outcome else {
            panic!("expected failure");
        };
        assert!(reason.contains("expected on line 1, but it is on line 2"), "{reason}");
    }
}
