use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn ls8() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ls8"))
}

fn image(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn halt_exits_successfully() {
    ls8()
        .arg(concat!(env!("CARGO_MANIFEST_DIR"), "/programs/mult.ls8"))
        .assert()
        .success()
        .stdout("72\n");
}

#[test]
fn unknown_opcode_exits_with_failure() {
    let file = image("10000010\n00000000\n00000001\n11111111\n");

    ls8()
        .arg(file.path())
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("unknown command: 255"));
}

#[test]
fn missing_program_exits_with_failure() {
    ls8()
        .arg(concat!(env!("CARGO_MANIFEST_DIR"), "/programs/missing.ls8"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("program not found"));
}

#[test]
fn stdout_only_holds_printed_values() {
    let file = image("10000010 # LDI R0,8\n00000000\n00001000\ngarbage\n01000111\n00000000\n00000001\n");

    ls8()
        .arg(file.path())
        .assert()
        .success()
        .stdout("8\n")
        .stderr(predicate::str::contains("Skipping malformed line"));
}
