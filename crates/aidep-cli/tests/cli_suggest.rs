use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn aidep_cmd() -> Command {
    Command::cargo_bin("aidep").unwrap()
}

#[test]
fn test_suggest_known_package_lists_buckets() {
    let tmp = TempDir::new().unwrap();

    aidep_cmd()
        .current_dir(tmp.path())
        .env("HOME", tmp.path())
        .args(["suggest", "langchain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("langchain 0.1.0+"))
        .stdout(predicate::str::contains("Installation examples"));
}

#[test]
fn test_suggest_marks_project_match() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("requirements.txt"), "langchain==0.1.5\n").unwrap();

    aidep_cmd()
        .current_dir(tmp.path())
        .env("HOME", tmp.path())
        .args(["suggest", "langchain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0+  (matches your project)"));
}

#[test]
fn test_suggest_unknown_package_lists_supported() {
    let tmp = TempDir::new().unwrap();

    aidep_cmd()
        .current_dir(tmp.path())
        .env("HOME", tmp.path())
        .args(["suggest", "left-pad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Packages with compatibility data"))
        .stdout(predicate::str::contains("llama-index"));
}

#[test]
fn test_list_names_all_rules() {
    let tmp = TempDir::new().unwrap();

    aidep_cmd()
        .current_dir(tmp.path())
        .env("HOME", tmp.path())
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Known AI framework conflicts"))
        .stdout(predicate::str::contains("langchain, llama-index"))
        .stdout(predicate::str::contains("[critical]"));
}
