//! End-to-end CLI scenarios, exercised as real `plusc` invocations
//! against temp source files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn plusc() -> Command {
    Command::cargo_bin("plusc").expect("plusc binary builds")
}

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{contents}").expect("write temp source");
    file
}

#[test]
fn scenario_1_simple_write() {
    let file = source_file("number x; x := 7; write x;");
    plusc()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("7"));
}

#[test]
fn scenario_2_increment_and_newline() {
    let file = source_file("number x; x := 5; x += 3; write x and newline;");
    plusc()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("8\n"));
}

#[test]
fn scenario_3_loop_with_string_and_newline() {
    let file = source_file(r#"number n; n := 3; repeat n times { write "hi" and newline; };"#);
    plusc()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("hi\nhi\nhi\n"));
}

#[test]
fn scenario_4_negative_decrement() {
    let file = source_file("number a; a := -2; a -= 3; write a;");
    plusc()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq("-5"));
}

#[test]
fn scenario_5_wide_decimal_round_trips() {
    let eighty_nines = "8".repeat(80);
    let source = format!("number big; big := {eighty_nines}; write big;");
    let file = source_file(&source);
    plusc()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::eq(eighty_nines));
}

#[test]
fn scenario_6_undeclared_identifier_halts_with_location() {
    let file = source_file("write x;");
    plusc()
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("UndeclaredIdentifier"))
        .stderr(predicate::str::contains(":1:"));
}

#[test]
fn missing_file_reports_io_error_and_exits_nonzero() {
    plusc()
        .arg("/nonexistent/path/does-not-exist.plus")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn lexical_error_reports_location_and_kind() {
    let file = source_file("number x; x := 1 :");
    plusc()
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn dump_ast_prints_program_before_evaluating() {
    let file = source_file("number x; x := 1; write x;");
    plusc()
        .arg(file.path())
        .arg("--dump-ast")
        .assert()
        .success()
        .stdout(predicate::str::contains("Program"));
}

#[test]
fn dump_tables_prints_action_and_goto_maps() {
    let file = source_file("number x; x := 1; write x;");
    plusc()
        .arg(file.path())
        .arg("--dump-tables")
        .assert()
        .success();
}

#[test]
fn help_flag_succeeds() {
    plusc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plusc"));
}
