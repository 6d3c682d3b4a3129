use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const AMBIENT_VARS: &[&str] = &[
    "PUSHNOTE_WEBHOOK_URL",
    "PUSHNOTE_TIMEOUT_SECS",
    "PUSHNOTE_LOG",
    "GITHUB_EVENT_PATH",
    "GITHUB_REPOSITORY",
    "GITHUB_SHA",
    "GITHUB_SERVER_URL",
    "GITHUB_WORKSPACE",
];

fn pushnote() -> Command {
    let mut cmd = Command::cargo_bin("pushnote").unwrap();
    for var in AMBIENT_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn write_event(dir: &Path) -> std::path::PathBuf {
    let event = dir.join("event.json");
    fs::write(
        &event,
        r#"{
            "after": "0ff1ce",
            "head_commit": {
                "message": "Say \"hi\"\nbye",
                "url": "https://github.com/octo/widgets/commit/0ff1ce",
                "committer": { "name": "Dana" }
            },
            "commits": [
                { "added": ["kept.txt"], "modified": [], "removed": ["gone.txt"] }
            ]
        }"#,
    )
    .unwrap();
    event
}

#[test]
fn notify_without_webhook_fails() {
    let dir = tempfile::tempdir().unwrap();
    let event = write_event(dir.path());

    pushnote()
        .arg("notify")
        .arg("--event")
        .arg(&event)
        .arg("--workspace")
        .arg(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("webhook URL not configured"));
}

#[test]
fn dry_run_prints_body() {
    let dir = tempfile::tempdir().unwrap();
    let event = write_event(dir.path());
    fs::write(dir.path().join("kept.txt"), "hello").unwrap();

    let output = pushnote()
        .args(["notify", "--dry-run", "--repository", "octo/widgets"])
        .arg("--event")
        .arg(&event)
        .arg("--workspace")
        .arg(dir.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["commit_message"], "Say \"hi\"\nbye");
    assert_eq!(body["commit_author"], "Dana");
    assert_eq!(
        body["files_changed"],
        serde_json::json!([
            {
                "name": "kept.txt",
                "size": 5,
                "url": "https://github.com/octo/widgets/blob/0ff1ce/kept.txt"
            },
            {
                "name": "gone.txt",
                "size": 0,
                "url": "https://github.com/octo/widgets/blob/0ff1ce/gone.txt"
            }
        ])
    );
}

#[test]
fn malformed_event_fails() {
    let dir = tempfile::tempdir().unwrap();
    let event = dir.path().join("event.json");
    fs::write(&event, "{ nope").unwrap();

    pushnote()
        .args(["notify", "--dry-run"])
        .arg("--event")
        .arg(&event)
        .assert()
        .failure()
        .stderr(predicate::str::contains("event payload error"));
}

#[test]
fn missing_webhook_wins_over_malformed_event() {
    let dir = tempfile::tempdir().unwrap();
    let event = dir.path().join("event.json");
    fs::write(&event, "{ nope").unwrap();

    pushnote()
        .arg("notify")
        .arg("--event")
        .arg(&event)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("configuration error"))
        .stderr(predicate::str::contains("event payload error").not());
}

async fn run_notify(server: &MockServer, dir: &Path) -> std::process::Output {
    let event = write_event(dir);
    let mut cmd = pushnote();
    cmd.args(["notify", "--repository", "octo/widgets"])
        .arg("--event")
        .arg(&event)
        .arg("--workspace")
        .arg(dir)
        .env("PUSHNOTE_WEBHOOK_URL", format!("{}/hooks/push", server.uri()));

    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn notify_posts_once_to_webhook() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hooks/push"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let output = run_notify(&server, dir.path()).await;

    assert!(output.status.success());
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["commit_author"], "Dana");
    assert_eq!(body["files_changed"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn notify_exits_non_zero_when_webhook_rejects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hooks/push"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let output = run_notify(&server, dir.path()).await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("delivery error"));
    assert!(!stderr.contains("/hooks/push"));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[test]
fn config_show_masks_webhook() {
    pushnote()
        .args(["config", "show"])
        .env("PUSHNOTE_WEBHOOK_URL", "https://hooks.example.com/very-secret-token")
        .assert()
        .success()
        .stdout(predicate::str::contains("Webhook URL: htt***ken"))
        .stdout(predicate::str::contains("very-secret").not());
}
