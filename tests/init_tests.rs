//! Integration tests for init and config commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::newsdesk_cmd;

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();

    newsdesk_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Data file: jornal.json"));

    let config_path = temp.path().join(".newsdesk/config.toml");
    assert!(config_path.exists());

    let content = fs::read_to_string(config_path).unwrap();
    assert!(content.contains("data_file = \"jornal.json\""));
    assert!(content.contains("enabled = true"));
}

#[test]
fn test_init_with_options() {
    let temp = TempDir::new().unwrap();

    newsdesk_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--data-file")
        .arg("noticias.json")
        .arg("--no-publish")
        .assert()
        .success();

    let content = fs::read_to_string(temp.path().join(".newsdesk/config.toml")).unwrap();
    assert!(content.contains("data_file = \"noticias.json\""));
    assert!(content.contains("enabled = false"));
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = TempDir::new().unwrap();

    newsdesk_cmd().arg("init").arg(temp.path()).assert().success();
    newsdesk_cmd()
        .arg("init")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_command_outside_workspace_fails() {
    let temp = TempDir::new().unwrap();

    newsdesk_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("newsdesk init"));
}

#[test]
fn test_workspace_found_from_subdirectory() {
    let temp = TempDir::new().unwrap();
    common::init_workspace(temp.path());
    let sub = temp.path().join("a").join("b");
    fs::create_dir_all(&sub).unwrap();

    newsdesk_cmd()
        .current_dir(&sub)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No news records found"));
}

#[test]
fn test_workspace_from_env() {
    let temp = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    common::init_workspace(temp.path());

    newsdesk_cmd()
        .current_dir(elsewhere.path())
        .env("NEWSDESK_ROOT", temp.path())
        .arg("list")
        .assert()
        .success();
}

#[test]
fn test_config_get_and_set() {
    let temp = TempDir::new().unwrap();
    newsdesk_cmd().arg("init").arg(temp.path()).assert().success();

    newsdesk_cmd()
        .current_dir(temp.path())
        .arg("config")
        .arg("publish.remote")
        .assert()
        .success()
        .stdout(predicate::str::contains("origin"));

    newsdesk_cmd()
        .current_dir(temp.path())
        .arg("config")
        .arg("publish.enabled")
        .arg("false")
        .assert()
        .success()
        .stdout(predicate::str::contains("Set publish.enabled = false"));

    newsdesk_cmd()
        .current_dir(temp.path())
        .arg("config")
        .arg("publish.enabled")
        .assert()
        .success()
        .stdout(predicate::str::contains("false"));
}

#[test]
fn test_config_list() {
    let temp = TempDir::new().unwrap();
    newsdesk_cmd().arg("init").arg(temp.path()).assert().success();

    newsdesk_cmd()
        .current_dir(temp.path())
        .arg("config")
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("data_file = jornal.json"))
        .stdout(predicate::str::contains("assets_dir = ../images/noticias"))
        .stdout(predicate::str::contains("publish.remote = origin"));
}

#[test]
fn test_config_unknown_key_fails() {
    let temp = TempDir::new().unwrap();
    newsdesk_cmd().arg("init").arg(temp.path()).assert().success();

    newsdesk_cmd()
        .current_dir(temp.path())
        .arg("config")
        .arg("editor")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: 'editor'"));
}
