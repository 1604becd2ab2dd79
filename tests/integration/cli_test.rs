use std::path::PathBuf;
use std::process::Command;

fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_bfff"))
}

#[test]
fn test_search_finds_sum() {
    let output = Command::new(get_binary_path())
        .args(["search", "--case", "1,2=3", "--case", "2,3=5", "--depth", "2"])
        .output()
        .expect("Failed to execute bfff");

    assert!(
        output.status.success(),
        "Command failed with status: {:?}\nstderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(a, b) -> a + b"), "stdout: {}", stdout);
    assert!(stdout.contains("Search Statistics"));
    assert!(stdout.contains("Candidates pulled: 708"), "stdout: {}", stdout);
    assert!(stdout.contains("Passes: "));
    assert!(stdout.contains("exhausted"));
}

#[test]
fn test_search_accepts_negative_inputs() {
    let output = Command::new(get_binary_path())
        .args(["search", "--case", "-4=4", "--case", "3=3", "--depth", "2"])
        .output()
        .expect("Failed to execute bfff");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("(a) -> abs(a)"), "stdout: {}", stdout);
}

#[test]
fn test_search_rejects_mixed_arity() {
    let output = Command::new(get_binary_path())
        .args(["search", "--case", "1,2=3", "--case", "1=2"])
        .output()
        .expect("Failed to execute bfff");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error during search"), "stderr: {}", stderr);
}

#[test]
fn test_search_without_cases_fails() {
    let output = Command::new(get_binary_path())
        .args(["search", "--depth", "1"])
        .output()
        .expect("Failed to execute bfff");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No cases provided"));
}

#[test]
fn test_count() {
    let output = Command::new(get_binary_path())
        .args(["count", "--arity", "1", "--depth", "2"])
        .output()
        .expect("Failed to execute bfff");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Candidates up to depth 2: 515"), "stdout: {}", stdout);
}
