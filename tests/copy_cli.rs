use std::fs;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn copy_writes_branch_name_to_clipboard() {
    let td = TempDir::new().unwrap();
    let page = common::write_page(td.path(), "page.yaml", common::TICKET_PAGE);
    let out = td.path().join("clipboard.txt");

    Command::new(assert_cmd::cargo::cargo_bin!("bng"))
        .env("BNG_CLIPBOARD_FILE", &out)
        .args(["copy", page.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Branch:   core_feature_add_login"))
        .stdout(contains("Copied!"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "core_feature_add_login");
}

#[test]
fn copy_shows_the_page_success_message() {
    let td = TempDir::new().unwrap();
    let out = td.path().join("clipboard.txt");

    Command::new(assert_cmd::cargo::cargo_bin!("bng"))
        .env("BNG_CLIPBOARD_FILE", &out)
        .args(["copy", "--set", "project=core"])
        .assert()
        .success()
        .stdout(contains("Copied to clipboard!"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "core_XXX_feature_xxx");
}

#[test]
fn rejected_copy_is_not_fatal() {
    let td = TempDir::new().unwrap();
    let page = common::write_page(td.path(), "page.yaml", common::TICKET_PAGE);
    let unwritable = td.path().join("missing-dir").join("clipboard.txt");

    Command::new(assert_cmd::cargo::cargo_bin!("bng"))
        .env("BNG_CLIPBOARD_FILE", &unwritable)
        .args(["copy", page.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Branch:   core_feature_add_login"))
        .stdout(contains("Copied!").not())
        .stderr(contains("not copied"));

    assert!(!unwritable.exists());
}
