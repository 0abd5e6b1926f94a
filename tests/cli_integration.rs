use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn docfolio(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docfolio").unwrap();
    cmd.env("DOCFOLIO_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("DOCFOLIO_LOG");
    cmd
}

fn logged_in() -> TempDir {
    let home = tempfile::tempdir().unwrap();
    docfolio(home.path())
        .args(["login", "admin", "--password", "admin123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, Administrador"));
    home
}

#[test]
fn document_commands_need_a_session() {
    let home = tempfile::tempdir().unwrap();
    docfolio(home.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn wrong_password_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    docfolio(home.path())
        .args(["login", "admin", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid credentials"));
}

#[test]
fn password_can_come_from_stdin() {
    let home = tempfile::tempdir().unwrap();
    docfolio(home.path())
        .args(["login", "admin"])
        .write_stdin("admin123\n")
        .assert()
        .success();
    docfolio(home.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("admin <admin@gestordocumental.com>"));
}

#[test]
fn add_list_view_edit_delete() {
    let home = logged_in();
    let src = home.path().join("report.pdf");
    std::fs::write(&src, b"%PDF-1.4\n\n").unwrap();

    docfolio(home.path())
        .arg("add")
        .arg(&src)
        .args(["--name", "Q1 Report", "--category", "Trabajo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Document added: Q1 Report"));

    docfolio(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. "))
        .stdout(predicate::str::contains("Q1 Report"))
        .stdout(predicate::str::contains("Trabajo"));

    docfolio(home.path())
        .args(["view", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Type:     PDF"))
        .stdout(predicate::str::contains("10 B"));

    let exported = home.path().join("out.pdf");
    docfolio(home.path())
        .args(["view", "1", "--export"])
        .arg(&exported)
        .assert()
        .success();
    assert_eq!(std::fs::read(&exported).unwrap(), b"%PDF-1.4\n\n");

    docfolio(home.path())
        .args(["edit", "1", "--name", "Q2 Report"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Q2 Report"));

    docfolio(home.path())
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Document deleted (1): Q2 Report"));

    docfolio(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No documents found."));
}

#[test]
fn add_rejects_unknown_category() {
    let home = logged_in();
    let src = home.path().join("scan.png");
    std::fs::write(&src, b"\x89PNG").unwrap();

    docfolio(home.path())
        .arg("add")
        .arg(&src)
        .args(["--category", "Viajes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category: Viajes"));
}

#[test]
fn removed_files_disappear_from_the_list() {
    let home = logged_in();
    let src = home.path().join("lease.pdf");
    std::fs::write(&src, b"%PDF-1.4").unwrap();
    docfolio(home.path()).arg("add").arg(&src).assert().success();

    let documents = home.path().join("documents");
    for entry in std::fs::read_dir(&documents).unwrap() {
        std::fs::remove_file(entry.unwrap().path()).unwrap();
    }

    docfolio(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No documents found."));
    docfolio(home.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 document(s) indexed"));
}

#[test]
fn category_in_use_needs_force() {
    let home = logged_in();
    let src = home.path().join("contract.pdf");
    std::fs::write(&src, b"%PDF-1.4").unwrap();
    docfolio(home.path())
        .arg("add")
        .arg(&src)
        .args(["--category", "Trabajo"])
        .assert()
        .success();

    docfolio(home.path())
        .args(["categories", "remove", "Trabajo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("in use by 1 document(s)"));

    docfolio(home.path())
        .args(["categories", "remove", "Trabajo", "--force"])
        .assert()
        .success();

    docfolio(home.path())
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trabajo").not());
}

#[test]
fn config_round_trip() {
    let home = tempfile::tempdir().unwrap();
    docfolio(home.path())
        .args(["config", "copy-timeout", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("copy-timeout set to 30"));

    docfolio(home.path())
        .args(["config", "copy-timeout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("30"));

    docfolio(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("password = ********"));
}

#[test]
fn logout_ends_the_session() {
    let home = logged_in();
    docfolio(home.path()).arg("logout").assert().success();
    docfolio(home.path()).arg("list").assert().failure();
}

#[test]
fn help_works_without_a_session() {
    let home = tempfile::tempdir().unwrap();
    docfolio(home.path())
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Documents:"));
}

#[test]
fn huge_range_fails_cleanly() {
    let home = logged_in();
    let src = home.path().join("a.pdf");
    std::fs::write(&src, b"%PDF-1.4").unwrap();
    docfolio(home.path()).arg("add").arg(&src).assert().success();

    let range = format!("1-{}", usize::MAX / 4);
    docfolio(home.path())
        .args(["delete", &range])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Document not found: 2"));

    docfolio(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. "));
}
