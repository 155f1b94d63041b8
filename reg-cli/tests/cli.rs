//! End-to-end tests for the regsync binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn write_student(dir: &Path) -> std::path::PathBuf {
    let file = dir.join("student.json");
    std::fs::write(
        &file,
        r#"{
            "first_name": "Ada",
            "last_name": "Okafor",
            "date_of_birth": "2013-01-09",
            "class_applied": "JSS1",
            "guardian": { "name": "Chioma Okafor", "phone": "+2348011111111" }
        }"#,
    )
    .unwrap();
    file
}

fn regsync(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("regsync").unwrap();
    cmd.current_dir(dir)
        .arg("--database")
        .arg(dir.join("queue.db"));
    cmd
}

#[test]
fn enqueue_then_status_shows_pending() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_student(dir.path());

    regsync(dir.path())
        .arg("enqueue")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Queued registration"));

    regsync(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 registration(s) waiting to sync"))
        .stdout(predicate::str::contains("Ada Okafor"));
}

#[test]
fn status_on_fresh_queue_reports_synced() {
    let dir = tempfile::tempdir().unwrap();

    regsync(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Everything is synced."));
}

#[test]
fn enqueue_rejects_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.json");
    std::fs::write(&file, "{").unwrap();

    regsync(dir.path()).arg("enqueue").arg(&file).assert().failure();
}

#[test]
fn sync_against_unreachable_server_keeps_entry_queued() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_student(dir.path());

    // Port 1 refuses connections, so the pass reports a network failure
    std::fs::write(
        dir.path().join("regsync.toml"),
        "[endpoint]\nbase_url = \"http://127.0.0.1:1\"\nrequest_timeout_secs = 2\n",
    )
    .unwrap();

    regsync(dir.path()).arg("enqueue").arg(&file).assert().success();

    regsync(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 network"));

    regsync(dir.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("waiting to sync"));
}

#[test]
fn prune_on_fresh_queue_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();

    regsync(dir.path())
        .arg("prune")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to prune."));
}
