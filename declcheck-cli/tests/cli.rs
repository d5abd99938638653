use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn check_file(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempdir().expect("tempdir");
    let input_path = dir.path().join("input.java");
    fs::write(&input_path, contents).expect("write input");
    (dir, input_path)
}

#[test]
fn passes_valid_declarations() {
    let (_dir, input_path) = check_file("int x = 10;\nString name;\n");

    Command::cargo_bin("declcheck-cli")
        .expect("binary exists")
        .arg("check")
        .arg("--input")
        .arg(&input_path)
        .assert()
        .success()
        .stdout(
            "LEXICAL ANALYSIS PASSED\nSYNTAX ANALYSIS PASSED\nSEMANTIC ANALYSIS PASSED\n",
        );
}

#[test]
fn reports_type_mismatch() {
    let (_dir, input_path) = check_file("double y = 5;\n");

    Command::cargo_bin("declcheck-cli")
        .expect("binary exists")
        .arg("check")
        .arg("--input")
        .arg(&input_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("SEMANTIC ANALYSIS FAILED"))
        .stdout(predicate::str::contains("5 is not valid for type double"));
}

#[test]
fn reports_invalid_token() {
    Command::cargo_bin("declcheck-cli")
        .expect("binary exists")
        .arg("check")
        .write_stdin("boolean flag = 2x;\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("LEXICAL ANALYSIS FAILED"))
        .stdout(predicate::str::contains("Invalid token found: \"2x\""))
        .stdout(predicate::str::contains("SYNTAX").not());
}

#[test]
fn stops_at_requested_stage() {
    Command::cargo_bin("declcheck-cli")
        .expect("binary exists")
        .args(["check", "--stage", "lexical", "--tokens"])
        .write_stdin("int = 5;")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "line 1: data_type:int assignment_operator:= integer:5 delimiter:;",
        ))
        .stdout(predicate::str::contains("SYNTAX").not());
}

#[test]
fn writes_json_report_to_file() {
    let (dir, input_path) = check_file("int = 5;\n");
    let output_path = dir.path().join("reports").join("out.json");

    Command::cargo_bin("declcheck-cli")
        .expect("binary exists")
        .arg("check")
        .arg("--input")
        .arg(&input_path)
        .arg("--output")
        .arg(&output_path)
        .args(["--format", "json"])
        .assert()
        .failure();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).expect("read report"))
            .expect("valid json");
    assert_eq!(json["passed"], serde_json::json!(["lexical"]));
    assert_eq!(json["failure"]["stage"], "syntax");
    assert_eq!(json["failure"]["line_number"], 1);
}

#[test]
fn reports_missing_input_file() {
    let dir = tempdir().expect("tempdir");

    Command::cargo_bin("declcheck-cli")
        .expect("binary exists")
        .arg("check")
        .arg("--input")
        .arg(dir.path().join("missing.java"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read input file"));
}

#[test]
fn session_reads_script_from_stdin() {
    Command::cargo_bin("declcheck-cli")
        .expect("binary exists")
        .arg("session")
        .write_stdin("source int x = 10;\nsyntax\nlexical\nsyntax\nsemantic\n")
        .assert()
        .success()
        .stdout(
            "syntax error: Please complete lexical analysis first\n\
             LEXICAL ANALYSIS PASSED\nSYNTAX ANALYSIS PASSED\nSEMANTIC ANALYSIS PASSED\n",
        );
}

#[test]
fn unknown_value_word_fails_syntax() {
    Command::cargo_bin("declcheck-cli")
        .expect("binary exists")
        .arg("check")
        .write_stdin("boolean flag = maybe;\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("LEXICAL ANALYSIS PASSED"))
        .stdout(predicate::str::contains("SYNTAX ANALYSIS FAILED"))
        .stdout(predicate::str::contains("syntax error on line 1"));
}

#[test]
fn reports_unreadable_stdin() {
    Command::cargo_bin("declcheck-cli")
        .expect("binary exists")
        .arg("check")
        .write_stdin(vec![0xff, 0xfe, 0xfd])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read stdin"));
}

#[test]
fn session_reads_script_file() {
    let dir = tempdir().expect("tempdir");
    let input_path = dir.path().join("decl.java");
    fs::write(&input_path, "double y = 5;\n").expect("write input");
    let script_path = dir.path().join("steps.txt");
    fs::write(
        &script_path,
        format!("load {}\nlexical\nsyntax\nsemantic\nstatus\n", input_path.display()),
    )
    .expect("write script");

    Command::cargo_bin("declcheck-cli")
        .expect("binary exists")
        .arg("session")
        .arg("--script")
        .arg(&script_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("SEMANTIC ANALYSIS FAILED"))
        .stdout(predicate::str::ends_with("phase: semantic failed, next: none\n"));
}
