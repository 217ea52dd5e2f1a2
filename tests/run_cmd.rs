use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::PathBuf;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bfvm").unwrap();
    // Keep the user's config file and environment out of the picture.
    cmd.env("BFVM_CONFIG", "/nonexistent/bfvm.toml")
        .env_remove("BFVM_EOF")
        .env_remove("BFVM_VERBOSE");
    cmd
}

fn hello_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/programs/hello.bf")
}

fn read_to_tempfile(content: &[u8]) -> tempfile::NamedTempFile {
    let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
    tf.write_all(content).unwrap();
    tf
}

#[test]
fn hello_world_file_prints_exact_bytes() {
    cargo_bin()
        .arg("run").arg("--file").arg(hello_path())
        .assert()
        .success()
        .stdout("Hello World!\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn positional_parts_are_concatenated() {
    // 8 * 8 + 1 = 65 = 'A'
    cargo_bin()
        .timeout(std::time::Duration::from_secs(5))
        .args(["run", "++++++++[>++++++++<", "-]>+."])
        .assert()
        .success()
        .stdout("A");
}

#[test]
fn no_trailing_newline_is_added() {
    cargo_bin()
        .args(["run", "+++."])
        .assert()
        .success()
        .stdout("\u{3}");
}

#[test]
fn comments_in_source_are_ignored() {
    let tf = read_to_tempfile(b"add three: +++ then print it: .\n");
    cargo_bin()
        .arg("run").arg("-f").arg(tf.path())
        .assert()
        .success()
        .stdout("\u{3}");
}

#[test]
fn echo_copies_stdin_in_order() {
    cargo_bin()
        .args(["run", ",[.,]"])
        .write_stdin("stream of bytes\n")
        .assert()
        .success()
        .stdout("stream of bytes\n");
}

#[test]
fn reads_one_byte_per_comma() {
    cargo_bin()
        .args(["run", ",>,<.>."])
        .write_stdin("ZY and more")
        .assert()
        .success()
        .stdout("ZY");
}

#[test]
fn tape_grows_to_the_left() {
    // Prepending cells must keep the first cell's value reachable.
    cargo_bin()
        .timeout(std::time::Duration::from_secs(5))
        .args(["run", "++++++++[>++++++++<", "-]>+<<<<>>>>."])
        .assert()
        .success()
        .stdout("A");
}

#[test]
fn mis_nested_brackets_run_and_terminate() {
    cargo_bin()
        .timeout(std::time::Duration::from_secs(5))
        .args(["run", "+]+.["])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn verbose_prints_summaries_to_stderr_only() {
    cargo_bin()
        .args(["run", "--verbose", "+++."])
        .assert()
        .success()
        .stdout("\u{3}")
        .stderr(
            predicate::str::contains("4 instructions, 0 loops")
                .and(predicate::str::contains("halted after 4 steps")),
        );
}

#[test]
fn verbose_from_environment() {
    cargo_bin()
        .env("BFVM_VERBOSE", "1")
        .args(["run", "+."])
        .assert()
        .success()
        .stderr(predicate::str::contains("note"));
}

#[test]
fn help_prints_usage_and_exits_zero() {
    cargo_bin()
        .args(["run", "--help"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Usage:").and(predicate::str::contains("--eof")));
}

#[test]
fn top_level_without_command_is_usage_error() {
    cargo_bin()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn code_may_start_with_a_hyphen() {
    cargo_bin()
        .args(["run", "-."])
        .assert()
        .success()
        .stdout(vec![0xffu8]);
}

#[test]
fn option_after_code_is_not_read_as_code() {
    // If `--eof` leaked into the program its `-`s would run and `.` would print a byte.
    cargo_bin()
        .args(["run", ",.", "--eof", "halt"])
        .write_stdin("")
        .assert()
        .stdout(predicate::str::is_empty());
}

#[test]
fn misplaced_option_is_a_usage_error() {
    cargo_bin()
        .args(["run", "-[.-]", "-v"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("option '-v' found after the code"));
}
