//! Command-line tests for the `litrev` binary.
#![cfg(feature = "cli")]

use std::fs;

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

const EXPORT: &str = "\
Document Title,Authors,Abstract,Author Keywords,IEEE Terms,Article Citation Count,Publication Year,DOI
Paper A,Smith J,Abstract,AI;ml,ML,3,2020,10.1/a
Paper B,Doe J,Abstract,,AI,1,2020,10.1/b
Paper C,Roe R,Abstract,covid-19;ai,,10,2021,10.1/c
";

fn litrev() -> Command {
    Command::cargo_bin("litrev").unwrap()
}

fn write_export(dir: &assert_fs::TempDir, content: &str) -> std::path::PathBuf {
    let file = dir.child("export.csv");
    file.write_str(content).unwrap();
    file.path().to_path_buf()
}

#[test]
fn cli_writes_csv_tables() {
    let dir = assert_fs::TempDir::new().unwrap();
    let input = write_export(&dir, EXPORT);
    let out = dir.child("out");

    litrev()
        .arg(&input)
        .args(["--year-start", "2020", "--year-end", "2021", "--output-dir"])
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 records, 5 term rows"));

    let counts = fs::read_to_string(out.child("counts.csv").path()).unwrap();
    assert_eq!(
        counts,
        "Year,Term,Count,Citations\n\
         2020,ai,2,4\n\
         2020,ml,1,3\n\
         2021,covid-19,1,10\n\
         2021,ai,1,10\n"
    );

    let top = fs::read_to_string(out.child("top_counts.csv").path()).unwrap();
    assert!(top.starts_with("Term,Count,Citations\nai,3,14\n"));
    out.child("most_cited.csv").assert(predicate::path::exists());
}

#[test]
fn cli_drop_values_and_json() {
    let dir = assert_fs::TempDir::new().unwrap();
    let input = write_export(&dir, EXPORT);
    let out = dir.child("out");

    litrev()
        .arg(&input)
        .args([
            "--year-start",
            "2020",
            "--year-end",
            "2021",
            "--drop",
            "covid",
            "--format",
            "json",
            "--output-dir",
        ])
        .arg(out.path())
        .assert()
        .success();

    let counts = fs::read_to_string(out.child("counts.json").path()).unwrap();
    assert!(!counts.contains("covid"));
    assert!(counts.contains(r#"{"Year":2021,"Term":"ai","Count":1,"Citations":10}"#));
}

#[test]
fn cli_missing_column_fails() {
    let dir = assert_fs::TempDir::new().unwrap();
    let input = write_export(&dir, "Document Title,Authors\nPaper,Smith\n");

    litrev()
        .arg(&input)
        .args(["--year-start", "2020", "--output-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required column: Abstract"));
}

#[test]
fn cli_empty_range_warns() {
    let dir = assert_fs::TempDir::new().unwrap();
    let input = write_export(&dir, EXPORT);

    litrev()
        .arg(&input)
        .args(["--year-start", "1990", "--year-end", "1991", "--output-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "no term counts for publication years 1990 to 1991",
        ));
}
