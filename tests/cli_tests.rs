//! CLI interface tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// `qmk` with an empty home so no user config file leaks into the test
fn qmk(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("qmk").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("qmk"));
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello"))
        .stdout(predicate::str::contains("goodbye"));
}

#[test]
fn test_hello() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .arg("hello")
        .assert()
        .success()
        .stdout("Hello, World!\n")
        .stderr("");
}

#[test]
fn test_goodbye() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .arg("goodbye")
        .assert()
        .success()
        .stdout("Goodbye, World!\n")
        .stderr("");
}

#[test]
fn test_no_arguments_logs_error() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("I don't do anything."));
}

#[test]
fn test_no_arguments_plain_output() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .arg("--no-color")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr("☒ I don't do anything.\n");
}

#[test]
fn test_unknown_subcommand_same_as_no_arguments() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .args(["--no-color", "frobnicate"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr("☒ I don't do anything.\n");
}

#[test]
fn test_subcommands_are_case_sensitive() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .args(["--no-color", "Hello"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr("☒ I don't do anything.\n");
}

#[test]
fn test_verbose_reports_unrecognized_subcommand() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .args(["--no-color", "-v", "frobnicate"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("☐ Unrecognized subcommand"))
        .stderr(predicate::str::contains("frobnicate"))
        .stderr(predicate::str::contains("☒ I don't do anything."));
}

#[test]
fn test_no_color_has_no_escapes() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .args(["--no-color", "-v"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\x1b").not());
}

#[test]
fn test_hello_rejects_arguments() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .args(["hello", "--name", "Bob"])
        .assert()
        .failure()
        .code(2)
        .stdout("");
}

#[test]
fn test_log_file_receives_records() {
    let home = TempDir::new().unwrap();
    let log_path = home.path().join("qmk.log");

    qmk(&home)
        .arg("--log-file")
        .arg(&log_path)
        .assert()
        .failure()
        .code(1);

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.starts_with("[ERROR] ["));
    assert!(log.contains("[file:"));
    assert!(log.trim_end().ends_with("I don't do anything."));
    assert!(!log.contains('\x1b'));
}

#[test]
fn test_log_file_is_appended() {
    let home = TempDir::new().unwrap();
    let log_path = home.path().join("qmk.log");
    fs::write(&log_path, "previous run\n").unwrap();

    qmk(&home)
        .arg("--log-file")
        .arg(&log_path)
        .arg("hello")
        .assert()
        .success();
    qmk(&home)
        .arg("--log-file")
        .arg(&log_path)
        .assert()
        .failure();

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.starts_with("previous run\n"));
    assert_eq!(log.matches("I don't do anything.").count(), 1);
}

#[test]
fn test_unusable_log_file() {
    let home = TempDir::new().unwrap();
    let log_path = home.path().join("missing").join("qmk.log");

    qmk(&home)
        .args(["--no-color", "--log-file"])
        .arg(&log_path)
        .arg("hello")
        .assert()
        .failure()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("Failed to open log file"));
}

#[test]
fn test_help_word_is_not_a_subcommand() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .args(["--no-color", "help"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr("☒ I don't do anything.\n");
}

#[test]
fn test_color_flag_forces_escapes() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .arg("--color")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("\x1b[31m☒\x1b[0m"))
        .stderr(predicate::str::contains("I don't do anything."));
}

#[test]
fn test_plain_when_stderr_is_not_a_terminal() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .assert()
        .failure()
        .stderr("☒ I don't do anything.\n");
}

#[test]
fn test_custom_log_fmt() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .args(["--no-color", "--log-fmt", "{message} ({level})"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr("I don't do anything. (☒)\n");
}

#[test]
fn test_log_fmt_color_tokens_removed_without_color() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .args(["--no-color", "--log-fmt", "{fg_red}{message}{style_reset_all}"])
        .assert()
        .failure()
        .stderr("I don't do anything.\n");
}

#[test]
fn test_log_fmt_color_tokens_expanded_with_color() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .args(["--color", "--log-fmt", "{bg_green}{message}"])
        .assert()
        .failure()
        .stderr("\x1b[42mI don't do anything.\x1b[0m\n");
}

#[test]
fn test_custom_log_file_fmt_and_datetime() {
    let home = TempDir::new().unwrap();
    let log_path = home.path().join("qmk.log");

    qmk(&home)
        .args(["--log-file-fmt", "{time} {level}: {message}", "--datetime-fmt", "%Y"])
        .arg("--log-file")
        .arg(&log_path)
        .assert()
        .failure()
        .code(1);

    let log = fs::read_to_string(&log_path).unwrap();
    let (year, rest) = log.split_once(' ').unwrap();
    assert_eq!(year.len(), 4);
    assert!(year.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(rest, "ERROR: I don't do anything.\n");
}

#[test]
fn test_invalid_datetime_fmt() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .args(["--no-color", "--datetime-fmt", "%Y-%", "hello"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Invalid datetime format '%Y-%'"));
}

#[test]
fn test_rust_log_debug_without_verbose() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .env("RUST_LOG", "debug")
        .args(["--no-color", "frobnicate"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("☐ Unrecognized subcommand"))
        .stderr(predicate::str::contains("☒ I don't do anything."));
}

#[test]
fn test_rust_log_off_silences_console() {
    let home = TempDir::new().unwrap();
    qmk(&home)
        .env("RUST_LOG", "off")
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr("");
}
