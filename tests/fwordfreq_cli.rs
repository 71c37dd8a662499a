use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn fwordfreq_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fwordfreq"));
    cmd.env_remove("FWORDFREQ_LOG");
    cmd
}

fn write_input(dir: &Path, content: &[u8]) -> PathBuf {
    let path = dir.join("input.txt");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_binary_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), b"The cat sat. The CAT sat!");
    let output = dir.path().join("out.txt");

    let result = fwordfreq_cmd().arg(&input).arg(&output).output().unwrap();
    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert!(result.stdout.is_empty());
    assert!(result.stderr.is_empty());
    assert_eq!(fs::read_to_string(&output).unwrap(), "cat 2\nsat 2\nthe 2\n");
}

#[test]
fn test_binary_empty_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), b"");
    let output = dir.path().join("out.txt");

    let result = fwordfreq_cmd().arg(&input).arg(&output).output().unwrap();
    assert_eq!(result.status.code(), Some(0));
    assert_eq!(fs::read(&output).unwrap(), b"");
}

#[test]
fn test_binary_one_argument_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), b"hello");

    let result = fwordfreq_cmd().arg(&input).output().unwrap();
    assert_eq!(result.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Usage"), "stderr: {}", stderr);
    assert!(result.stdout.is_empty());
}

#[test]
fn test_binary_no_arguments_is_usage_error() {
    let result = fwordfreq_cmd().output().unwrap();
    assert_eq!(result.status.code(), Some(2));
    assert!(!result.stderr.is_empty());
}

#[test]
fn test_binary_three_arguments_is_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), b"hello");
    let output = dir.path().join("out.txt");

    let result = fwordfreq_cmd()
        .arg(&input)
        .arg(&output)
        .arg("extra")
        .output()
        .unwrap();
    assert_eq!(result.status.code(), Some(2));
    assert!(!output.exists());
}

#[test]
fn test_binary_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("does_not_exist.txt");
    let output = dir.path().join("out.txt");

    let result = fwordfreq_cmd().arg(&input).arg(&output).output().unwrap();
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.starts_with("fwordfreq: cannot open"), "stderr: {}", stderr);
    assert!(stderr.contains("No such file or directory"), "stderr: {}", stderr);
    assert!(!output.exists());
}

#[test]
fn test_binary_unwritable_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), b"hello");
    let output = dir.path().join("missing_dir").join("out.txt");

    let result = fwordfreq_cmd().arg(&input).arg(&output).output().unwrap();
    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("cannot create"), "stderr: {}", stderr);
}

#[test]
fn test_binary_chunk_size_flag() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), b"wordword word");
    let output = dir.path().join("out.txt");

    let result = fwordfreq_cmd()
        .args(["--chunk-size", "4", "--flush-threshold", "0"])
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();
    assert!(result.status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "word 1\nwordword 1\n");
}

#[test]
fn test_binary_zero_chunk_size_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), b"hello");
    let output = dir.path().join("out.txt");

    let result = fwordfreq_cmd()
        .args(["--chunk-size", "0"])
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();
    assert_eq!(result.status.code(), Some(2));
    assert!(!output.exists());
}

#[test]
fn test_binary_invalid_utf8_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), b"ab\xffcd \xc3\xa9t\xc3\xa9 ok");
    let output = dir.path().join("out.txt");

    let result = fwordfreq_cmd().arg(&input).arg(&output).output().unwrap();
    assert!(result.status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "abcd 1\nok 1\nt 1\n");
}

#[test]
fn test_binary_huge_chunk_size_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), b"hello");
    let output = dir.path().join("out.txt");

    for size in ["18446744073709551615", "67108865", "1G"] {
        let result = fwordfreq_cmd()
            .args(["--chunk-size", size])
            .arg(&input)
            .arg(&output)
            .output()
            .unwrap();
        assert_eq!(result.status.code(), Some(2), "size {}", size);
        let stderr = String::from_utf8_lossy(&result.stderr);
        assert!(stderr.contains("chunk size must be at most"), "stderr: {}", stderr);
        assert!(!output.exists());
    }
}

#[test]
fn test_binary_max_chunk_size_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), b"big chunk big");
    let output = dir.path().join("out.txt");

    let result = fwordfreq_cmd()
        .args(["--chunk-size", "64M"])
        .arg(&input)
        .arg(&output)
        .output()
        .unwrap();
    assert!(result.status.success());
    assert_eq!(fs::read_to_string(&output).unwrap(), "big 2\nchunk 1\n");
}

#[test]
fn test_binary_hyphen_input_after_double_dash() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("-notes.txt");
    fs::write(&input, b"dash dash").unwrap();
    let output = dir.path().join("out.txt");

    let result = fwordfreq_cmd()
        .current_dir(dir.path())
        .args(["--", "-notes.txt", "out.txt"])
        .output()
        .unwrap();
    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert_eq!(fs::read_to_string(&output).unwrap(), "dash 2\n");
}

#[test]
fn test_binary_help_mentions_double_dash() {
    let result = fwordfreq_cmd().arg("--help").output().unwrap();
    assert_eq!(result.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("'--'"), "stdout: {}", stdout);
}
