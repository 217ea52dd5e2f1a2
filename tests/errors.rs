use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bfvm").unwrap();
    cmd.env("BFVM_CONFIG", "/nonexistent/bfvm.toml")
        .env_remove("BFVM_EOF")
        .env_remove("BFVM_VERBOSE");
    cmd
}

#[test]
fn unbalanced_brackets_exit_with_three() {
    cargo_bin()
        .args(["run", "+[.+"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("Parse error")
                .and(predicate::str::contains("unbalanced brackets (1 '[' against 0 ']')")),
        );
}

#[test]
fn unbalanced_source_never_runs() {
    // The leading `.` would print a NUL byte if execution started.
    cargo_bin()
        .args(["run", ".]"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_file_exits_with_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("missing.bf");
    cargo_bin()
        .arg("run").arg("--file").arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn missing_source_is_usage_error() {
    cargo_bin()
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no source given").and(predicate::str::contains("Usage:")));
}

#[test]
fn file_and_code_together_is_usage_error() {
    cargo_bin()
        .args(["run", "--file", "x.bf", "+"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot use positional code together with --file"));
}

#[test]
fn unknown_eof_policy_is_rejected() {
    cargo_bin()
        .args(["run", "--eof", "minus-one", "+"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown EOF policy"));
}
