//! Integration tests for the mdb-query binary.
//!
//! The mdbtools suite is replaced by shell scripts in a temporary `bin`
//! directory, so these tests only run on Unix.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn write_script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Temporary database file plus stub mdbtools binaries.
fn create_test_env() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let bin = temp_dir.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    let db = temp_dir.path().join("school.mdb");
    fs::write(&db, b"stub").unwrap();

    write_script(&bin, "mdb-ver", "echo JET3");
    write_script(&bin, "mdb-tables", r"printf 'Students\nGrade_Lookup\nTeachers\n'");
    // The banner line echoes the statement back.
    write_script(
        &bin,
        "mdb-sql",
        r#"read -r statement
echo "$statement"
printf 'id::notes::name\n1::line one\nline two::Summer\n2::quiet::Seth\n'"#,
    );

    (temp_dir, bin, db)
}

fn mdb_query(bin: &Path, db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mdb-query"))
        .arg("--bin-dir")
        .arg(bin)
        .arg(db)
        .args(args)
        .output()
        .expect("Failed to run mdb-query")
}

#[test]
fn test_cli_end_to_end() {
    let (_temp_dir, bin, db) = create_test_env();

    let output = mdb_query(&bin, &db, &["version"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "JET3");

    let output = mdb_query(&bin, &db, &["tables", "--exclude", "_Lookup"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Students\nTeachers\n");

    let output = mdb_query(&bin, &db, &["select", "Students", "--where", "name=Sum"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let records: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["notes"], "line one line two");
    assert_eq!(records[1]["name"], "Seth");

    let output = mdb_query(&bin, &db, &["count", "Students"]);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "2");

    // Missing database file fails with a non-zero exit status.
    let output = mdb_query(&bin, &db.with_file_name("missing.mdb"), &["version"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("File not found"));
}
