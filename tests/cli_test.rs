//! CLI surface tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn kara() -> Command {
    Command::cargo_bin("kara").unwrap()
}

#[test]
fn help_lists_subcommands() {
    kara()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("shift"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn version_prints_crate_version() {
    kara()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_prints_toml_location() {
    kara()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// Config redirection via XDG_CONFIG_HOME only applies on Linux.
#[cfg(target_os = "linux")]
#[test]
fn list_scans_configured_folders() {
    let config_home = tempfile::tempdir().unwrap();
    let music = tempfile::tempdir().unwrap();
    std::fs::write(music.path().join("Coldplay - Yellow.mp3"), b"").unwrap();
    std::fs::write(music.path().join("Coldplay - Yellow.lrc"), b"[00:01.00]x\n").unwrap();

    let kara_dir = config_home.path().join("kara");
    std::fs::create_dir_all(&kara_dir).unwrap();
    std::fs::write(
        kara_dir.join("config.toml"),
        format!("[library]\nsongs_dir = \"{}\"\n", music.path().display()),
    )
    .unwrap();

    kara()
        .env("XDG_CONFIG_HOME", config_home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Yellow"))
        .stdout(predicate::str::contains("1 song(s), 1 with lyrics"));
}

#[cfg(target_os = "linux")]
#[test]
fn list_reports_missing_songs_folder() {
    let config_home = tempfile::tempdir().unwrap();
    let kara_dir = config_home.path().join("kara");
    std::fs::create_dir_all(&kara_dir).unwrap();
    std::fs::write(
        kara_dir.join("config.toml"),
        "[library]\nsongs_dir = \"/nonexistent/kara-music\"\n",
    )
    .unwrap();

    kara()
        .env("XDG_CONFIG_HOME", config_home.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("songs folder"));
}
