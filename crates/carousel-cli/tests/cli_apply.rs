mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use serde_json::{json, Value};

use common::{fixture, temp_json};

#[test]
fn apply_prints_saved_data() {
    let mut cmd = cargo_bin_cmd!("carousel");
    cmd.args([
        "apply",
        fixture("carousel.json").to_str().unwrap(),
        fixture("edits.valid.json").to_str().unwrap(),
        "--min",
    ]);

    let out = cmd.assert().success().get_output().stdout.clone();
    let saved: Value = serde_json::from_slice(&out).unwrap();
    let urls: Vec<&str> = saved
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["url"].as_str().unwrap())
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://cdn.example.com/carousel/harbour.jpg",
            "https://cdn.example.com/carousel/bridge.jpg",
            "https://cdn.example.com/carousel/pier.jpg"
        ]
    );
    assert_eq!(saved[1]["caption"], json!("Bridge"));
}

#[test]
fn apply_report_counts_stale_and_notifications() {
    let mut cmd = cargo_bin_cmd!("carousel");
    cmd.args([
        "apply",
        fixture("carousel.json").to_str().unwrap(),
        fixture("edits.valid.json").to_str().unwrap(),
        "--report",
    ]);

    let out = cmd.assert().success().get_output().stdout.clone();
    let report: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["ops"], json!(8));
    assert_eq!(report["stale"], json!(1));
    assert_eq!(report["pending"], json!(1));
    assert_eq!(report["notifications"][0]["notification"]["key"], json!("upload_failed"));
    assert_eq!(report["notifications"][0]["reason"], json!("413 Payload Too Large"));
}

#[test]
fn invalid_script_exits_2_with_stable_message() {
    let mut cmd = cargo_bin_cmd!("carousel");
    cmd.args([
        "apply",
        fixture("carousel.json").to_str().unwrap(),
        fixture("edits.invalid.json").to_str().unwrap(),
    ]);
    cmd.assert()
        .code(2)
        .stderr("ops[1] (complete) references unknown label 'upload9'\n");
}

#[test]
fn fail_on_stale_exits_2() {
    let mut cmd = cargo_bin_cmd!("carousel");
    cmd.args([
        "apply",
        fixture("carousel.json").to_str().unwrap(),
        fixture("edits.valid.json").to_str().unwrap(),
        "--fail-on-stale",
    ]);
    cmd.assert()
        .code(2)
        .stderr(contains("ops[7] (remove) targets an entry that was already removed"));
}

#[test]
fn request_describes_file_upload() {
    let cfg = temp_json(
        "config",
        r#"{"endpoints":{"byFile":"https://cdn.test/upload"},"field":"photo","additionalRequestHeaders":{"x-token":"t"}}"#,
    );

    let mut cmd = cargo_bin_cmd!("carousel");
    cmd.args([
        "request",
        "--config",
        cfg.to_str().unwrap(),
        "--file",
        "a.png",
        "--mime",
        "image/png",
    ]);
    let out = cmd.assert().success().get_output().stdout.clone();
    let req: Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(req["endpoint"], json!("https://cdn.test/upload"));
    assert_eq!(req["field"], json!("photo"));
    assert_eq!(req["source"], json!({"kind": "file", "name": "a.png", "mime": "image/png"}));
    assert_eq!(req["headers"]["x-token"], json!("t"));

    let mut cmd = cargo_bin_cmd!("carousel");
    cmd.args([
        "request",
        "--config",
        cfg.to_str().unwrap(),
        "--file",
        "clip.mp4",
        "--mime",
        "video/mp4",
    ]);
    cmd.assert().code(2).stderr(contains("accepted types are 'image/*'"));

    let _ = std::fs::remove_file(&cfg);
}
