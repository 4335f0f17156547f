//! End-to-end tests for the `stx` binary.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Run stx with given args, returning (stdout, stderr, exit code)
fn run_stx(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_stx"))
        .args(args)
        .arg("--color=never")
        .output()
        .expect("Failed to run stx");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

fn path_arg(path: &Path) -> String {
    path.to_str().expect("fixture path is UTF-8").to_string()
}

#[test]
fn test_find_prints_line_and_column() {
    let file = path_arg(&fixture("lines.txt"));
    let (stdout, _, code) = run_stx(&["find", "banana.len", "-p", &file, "--heading"]);

    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], file);
    assert_eq!(lines[1], "5:13:    let y = banana.len();");
}

#[test]
fn test_find_without_heading_prefixes_path() {
    let file = path_arg(&fixture("lines.txt"));
    let (stdout, _, code) = run_stx(&["find", "println", "-p", &file]);

    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], format!("{}:2:5:    println!(\"Hello, world!\");", file));
    assert!(lines[1].starts_with(&format!("{}:10:5:", file)));
}

#[test]
fn test_no_match_exits_one() {
    let file = path_arg(&fixture("lines.txt"));
    let (stdout, _, code) = run_stx(&["find", "not-in-the-file", "-p", &file]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
}

#[test]
fn test_count() {
    let file = path_arg(&fixture("lines.txt"));
    let (stdout, _, code) = run_stx(&["find", "banana", "-c", "-p", &file]);
    assert_eq!(code, 0);
    // `let banana`, `"banana"`, `banana.len`
    assert_eq!(stdout.trim(), "3");
}

#[test]
fn test_count_many_patterns() {
    let file = path_arg(&fixture("lines.txt"));
    let (stdout, _, code) = run_stx(&["find", "fn ", "let", "-c", "-p", &file]);
    assert_eq!(code, 0);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["fn :2", "let:2"]);
}

#[test]
fn test_ignore_case() {
    let file = path_arg(&fixture("lines.txt"));
    let (stdout, _, _) = run_stx(&["find", "HELLO", "-c", "-p", &file]);
    assert_eq!(stdout.trim(), "0");

    let (stdout, _, code) = run_stx(&["find", "HELLO", "-i", "-c", "-p", &file]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1");
}

#[test]
fn test_json_output() {
    let file = path_arg(&fixture("lines.txt"));
    let (stdout, _, code) = run_stx(&["find", "Helper", "--json", "-p", &file]);
    assert_eq!(code, 0);

    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let matches = &value[0]["matches"];
    assert_eq!(value[0]["pattern"], "Helper");
    assert_eq!(matches.as_array().map(|m| m.len()), Some(1));
    assert_eq!(matches[0]["line_number"], 10);
    assert_eq!(matches[0]["column"], 15);
}

#[test]
fn test_shorthand_query() {
    let file = path_arg(&fixture("lines.txt"));
    let (stdout, _, code) = run_stx(&["-p", &file, "-c", "helper"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1");
}

#[test]
fn test_stdin_input() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_stx"))
        .args(["find", "ana", "-c", "-q"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn stx");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"banana")
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait on stx");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "2");
}

#[test]
fn test_stats_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"banana").unwrap();
    let path = path_arg(file.path());

    let (stdout, _, code) = run_stx(&["stats", "--json", "-p", &path]);
    assert_eq!(code, 0);

    let meta: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(meta["text_size"], 6);
    assert_eq!(meta["leaf_count"], 7);
    assert_eq!(meta["internal_count"], 3);
    assert_eq!(meta["node_count"], 11);
    assert_eq!(meta["config"]["case_insensitive"], false);
    assert_eq!(meta["config"]["max_text_size"], 64 * 1024 * 1024);
}

#[test]
fn test_stats_positional_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"banana").unwrap();
    let path = path_arg(file.path());

    let (stdout, stderr, code) = run_stx(&["stats", &path, "--json", "-i"]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let meta: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(meta["source"], path.as_str());
    assert_eq!(meta["text_size"], 6);
    assert_eq!(meta["config"]["case_insensitive"], true);
}

#[test]
fn test_tree_dump() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"aab").unwrap();
    let path = path_arg(file.path());

    let (stdout, _, code) = run_stx(&["tree", "-p", &path]);
    assert_eq!(code, 0);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["(root)", "  \"a\"", "    \"ab$\" @0", "    \"b$\" @1", "  \"b$\" @2", "  \"$\" @3"]
    );
}

#[test]
fn test_tree_positional_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"ab").unwrap();
    let path = path_arg(file.path());

    let (stdout, stderr, code) = run_stx(&["tree", &path]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["(root)", "  \"ab$\" @0", "  \"b$\" @1", "  \"$\" @2"]
    );
}

#[test]
fn test_missing_file_is_an_error() {
    let (_, stderr, code) = run_stx(&["find", "x", "-p", "/nonexistent/stx/input.txt"]);
    assert_eq!(code, 2);
    assert!(stderr.starts_with("stx: Failed to open"));
}

#[test]
fn test_size_limit() {
    let file = path_arg(&fixture("lines.txt"));
    let (_, stderr, code) = run_stx(&["find", "fn", "--max-size", "10", "-p", &file]);
    assert_eq!(code, 2);
    assert!(stderr.contains("limit"));
}

#[test]
fn test_binary_rejected_unless_allowed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"ab\x00ab\x00").unwrap();
    let path = path_arg(file.path());

    let (_, stderr, code) = run_stx(&["find", "ab", "-c", "-p", &path]);
    assert_eq!(code, 2);
    assert!(stderr.contains("binary"));

    let (stdout, _, code) = run_stx(&["find", "ab", "-c", "--binary", "-p", &path]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "2");
}
