#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

pub fn newsdesk_cmd() -> Command {
    let mut cmd = Command::cargo_bin("newsdesk").unwrap();
    cmd.env_remove("NEWSDESK_ROOT");
    cmd.env_remove("NEWSDESK_LOG");
    cmd
}

/// Initialize a workspace with publishing disabled
pub fn init_workspace(path: &Path) {
    newsdesk_cmd()
        .arg("init")
        .arg(path)
        .arg("--no-publish")
        .assert()
        .success();
}

/// Run `add` in `path` and return the new record id
pub fn add_record(path: &Path, args: &[&str]) -> String {
    let output = newsdesk_cmd()
        .current_dir(path)
        .arg("add")
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .split_whitespace()
        .find(|word| word.starts_with("noticia-"))
        .unwrap()
        .to_string()
}

pub fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
