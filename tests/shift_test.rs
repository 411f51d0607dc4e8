//! End-to-end tests for `kara shift`.

use assert_cmd::Command;
use predicates::prelude::*;

fn kara() -> Command {
    Command::cargo_bin("kara").unwrap()
}

#[test]
fn shift_writes_adjusted_file_with_default_name() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("song.lrc");
    std::fs::write(
        &input,
        "[ar:Coldplay]\n[00:10.00]Look at the stars\n[00:12.50]Look how they shine\n",
    )
    .unwrap();

    kara()
        .arg("shift")
        .arg(&input)
        .arg("2.0")
        .assert()
        .success()
        .stdout(predicate::str::contains("Adjusted 2 timestamp(s)"));

    let output = dir.path().join("song_adjusted.lrc");
    let content = std::fs::read_to_string(output).unwrap();
    assert!(content.contains("[00:12.00]Look at the stars"));
    assert!(content.contains("[00:14.50]Look how they shine"));
    // ID tags pass through untouched.
    assert!(content.contains("[ar:Coldplay]"));
}

#[test]
fn shift_negative_offset_clamps_at_zero() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("early.lrc");
    std::fs::write(&input, "[00:01.00]x\n[00:30.00]y\n").unwrap();

    let output = dir.path().join("out.lrc");
    kara()
        .arg("shift")
        .arg(&input)
        .arg("-3.0")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let content = std::fs::read_to_string(output).unwrap();
    assert!(content.contains("[00:00.00]x"));
    assert!(content.contains("[00:27.00]y"));
}

#[test]
fn shift_without_timestamps_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.lrc");
    std::fs::write(&input, "just some text\nno tags here\n").unwrap();

    kara()
        .arg("shift")
        .arg(&input)
        .arg("1.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no timestamped lyric lines"));
}

#[test]
fn shift_missing_input_fails() {
    kara()
        .arg("shift")
        .arg("/nonexistent/kara.lrc")
        .arg("1.0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
