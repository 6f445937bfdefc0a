use assert_cmd::prelude::*;
use mockito::Matcher;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const USER_BODY: &str = r#"{"id": 7, "username": "alice", "first_name": "Alice", "last_name": "Liddell", "email": "alice@example.com"}"#;

fn write_config(dir: &Path, username: Option<&str>) -> PathBuf {
    let path = dir.join("config.yaml");
    let mut contents = String::from("base_url: http://localhost:8000/api/\n");
    if let Some(u) = username {
        contents.push_str(&format!("username: {u}\n"));
    }
    fs::write(&path, contents).expect("failed to write config");
    path
}

fn write_tokens(dir: &Path, access: &str, refresh: &str) {
    fs::write(
        dir.join("tokens.yaml"),
        format!("access: {access}\nrefresh: {refresh}\n"),
    )
    .expect("failed to write tokens");
}

fn taskctl(config_path: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("taskctl"));
    cmd.arg("--config")
        .arg(config_path)
        .env_remove("TASKCTL_CONFIG")
        .env_remove("TASKCTL_BASE_URL")
        .env_remove("TASKCTL_FORMAT")
        .env_remove("TASKCTL_USERNAME")
        .env_remove("TASKCTL_PASSWORD")
        .env_remove("TASKCTL_DEBUG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn version_prints_package_version() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("taskctl"))
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn status_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), Some("alice"));

    let assert = taskctl(&config_path).arg("status").assert().success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));
    assert!(stdout.contains("alice"));
    assert!(stdout.contains("Access token not stored"));
    assert!(stdout.contains("taskctl login"));

    Ok(())
}

#[test]
fn status_json_reports_stored_tokens() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);
    write_tokens(temp.path(), "opaque-access", "opaque-refresh");

    let assert = taskctl(&config_path)
        .arg("status")
        .arg("--format")
        .arg("json")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(value["data"]["access"]["stored"], true);
    assert_eq!(value["data"]["refresh"]["stored"], true);
    assert_eq!(value["data"]["base_url"], "http://localhost:8000/api/");

    Ok(())
}

#[test]
fn task_list_without_login_asks_to_sign_in() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);

    taskctl(&config_path)
        .arg("task")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("taskctl login"));

    Ok(())
}

#[test]
fn task_list_uses_stored_token() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let base_url = format!("{}/", server.url());

    let me = server
        .mock("GET", "/me/")
        .match_header("authorization", "Bearer a1")
        .with_status(200)
        .with_body(USER_BODY)
        .create();
    let tasks = server
        .mock("GET", "/tasks/")
        .match_header("authorization", "Bearer a1")
        .with_status(200)
        .with_body(
            r#"[
                {"id": 1, "title": "Write report", "status": "pending", "created_at": "2024-05-01T09:00:00Z", "owner": 7},
                {"id": 2, "title": "File taxes", "status": "completed", "created_at": "2024-05-01T09:00:00Z", "owner": 7}
            ]"#,
        )
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);
    write_tokens(temp.path(), "a1", "r1");

    let assert = taskctl(&config_path)
        .arg("task")
        .arg("list")
        .arg("--status")
        .arg("pending")
        .arg("--base-url")
        .arg(&base_url)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Write report"));
    assert!(!stdout.contains("File taxes"));

    me.assert();
    tasks.assert();
    Ok(())
}

#[test]
fn expired_access_token_is_refreshed_and_saved() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let base_url = format!("{}/", server.url());

    let _stale = server
        .mock("GET", "/me/")
        .match_header("authorization", "Bearer old")
        .with_status(401)
        .create();
    let refresh = server
        .mock("POST", "/token/refresh/")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(serde_json::json!({"refresh": "r1"})))
        .with_status(200)
        .with_body(r#"{"access": "fresh"}"#)
        .expect(1)
        .create();
    let _me = server
        .mock("GET", "/me/")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(USER_BODY)
        .create();
    let _tasks = server
        .mock("GET", "/tasks/")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body("[]")
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);
    write_tokens(temp.path(), "old", "r1");

    taskctl(&config_path)
        .arg("task")
        .arg("list")
        .arg("--base-url")
        .arg(&base_url)
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));

    refresh.assert();
    let saved = fs::read_to_string(temp.path().join("tokens.yaml"))?;
    assert!(saved.contains("fresh"));
    Ok(())
}

#[test]
fn login_stores_tokens_and_username() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let base_url = format!("{}/", server.url());

    let login = server
        .mock("POST", "/login/")
        .match_body(Matcher::Json(
            serde_json::json!({"username": "alice", "password": "secret"}),
        ))
        .with_status(200)
        .with_body(format!(
            r#"{{"access": "a1", "refresh": "r1", "user": {USER_BODY}}}"#
        ))
        .create();
    let _me = server
        .mock("GET", "/me/")
        .match_header("authorization", "Bearer a1")
        .with_status(200)
        .with_body(USER_BODY)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);

    taskctl(&config_path)
        .arg("login")
        .arg("--username")
        .arg("Alice")
        .arg("--password")
        .arg("secret")
        .arg("--base-url")
        .arg(&base_url)
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as alice"));

    login.assert();
    let tokens = fs::read_to_string(temp.path().join("tokens.yaml"))?;
    assert!(tokens.contains("access: a1"));
    assert!(tokens.contains("refresh: r1"));
    let config = fs::read_to_string(&config_path)?;
    assert!(config.contains("username: alice"));
    Ok(())
}

#[test]
fn login_with_bad_credentials_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let base_url = format!("{}/", server.url());

    let _login = server.mock("POST", "/login/").with_status(401).create();
    let refresh = server
        .mock("POST", "/token/refresh/")
        .expect(0)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);

    taskctl(&config_path)
        .arg("login")
        .arg("--username")
        .arg("alice")
        .arg("--password")
        .arg("wrong")
        .arg("--base-url")
        .arg(&base_url)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Login failed"));

    refresh.assert();
    assert!(!temp.path().join("tokens.yaml").exists());
    Ok(())
}

#[test]
fn logout_without_tokens_is_a_no_op() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);

    taskctl(&config_path)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
    Ok(())
}

#[test]
fn completion_generates_script() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("taskctl"))
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("taskctl"));
    Ok(())
}

#[test]
fn refresh_exchanges_stored_refresh_token() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let base_url = format!("{}/", server.url());

    let refresh = server
        .mock("POST", "/token/refresh/")
        .match_body(Matcher::Json(serde_json::json!({"refresh": "r1"})))
        .with_status(200)
        .with_body(r#"{"access": "a2"}"#)
        .expect(1)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);
    write_tokens(temp.path(), "a1", "r1");

    taskctl(&config_path)
        .arg("refresh")
        .arg("--base-url")
        .arg(&base_url)
        .assert()
        .success()
        .stdout(predicate::str::contains("Access token refreshed"));

    refresh.assert();
    let saved = fs::read_to_string(temp.path().join("tokens.yaml"))?;
    assert!(saved.contains("access: a2"));
    assert!(saved.contains("refresh: r1"));
    Ok(())
}

#[test]
fn refresh_without_tokens_asks_to_sign_in() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), None);

    taskctl(&config_path)
        .arg("refresh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("taskctl login"));
    Ok(())
}
