#![deny(clippy::all, clippy::pedantic)]

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::str::contains;
use std::io::Write;
use tempfile::NamedTempFile;

fn cookie_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write cookie");
    file
}

fn blogfront() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("blogfront"));
    cmd.env_remove("BLOGFRONT_COOKIE")
        .env_remove("BLOGFRONT_COOKIE_FILE")
        .env_remove("BLOGFRONT_CONFIG_FILE")
        .env_remove("BLOGFRONT__API__BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn list_prints_data_envelope() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/posts")
            .query_param("search", "rust");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"data":[{"id":1,"title":"First"}],"pagination":{"total":1}}"#);
    });

    let assert = blogfront()
        .env("BLOGFRONT__API__BASE_URL", server.base_url())
        .args(["posts", "list", "--search", "rust"])
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("\"title\": \"First\""));
    assert!(output.contains("\"error\": null"));
    mock.assert();
}

#[test]
fn get_failure_prints_error_envelope_and_exits_one() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/posts/9");
        then.status(404).body("not here");
    });

    blogfront()
        .arg("--api-base-url")
        .arg(server.base_url())
        .args(["posts", "get", "9"])
        .assert()
        .code(1)
        .stdout(contains("\"data\": null"))
        .stdout(contains("Not found data"));
}

#[test]
fn create_forwards_cookie_file() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST")
            .path("/posts")
            .header("cookie", "session=from-file");
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"id":3,"title":"Hello"}"#);
    });

    let cookies = cookie_file("session=from-file\n");
    let assert = blogfront()
        .env("BLOGFRONT_COOKIE", "session=from-env")
        .args(["posts", "create", "--title", "Hello", "--content", "World"])
        .arg("--cookie-file")
        .arg(cookies.path())
        .arg("--api-base-url")
        .arg(server.base_url())
        .assert()
        .success();

    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("\"id\": 3"));
    mock.assert();
}

#[test]
fn rejected_create_exits_one() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/posts");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"error":"duplicate"}"#);
    });

    blogfront()
        .env("BLOGFRONT_COOKIE", "session=abc")
        .env("BLOGFRONT__API__BASE_URL", server.base_url())
        .args(["posts", "create", "--title", "Hello", "--content", "World"])
        .assert()
        .code(1)
        .stdout(contains("Error: Post not created."));
}

#[test]
fn missing_base_url_fails_fast() {
    blogfront()
        .args(["posts", "list"])
        .assert()
        .failure()
        .stdout(predicates::str::is_empty())
        .stderr(contains("api.base_url"));
}

#[test]
fn config_file_supplies_base_url() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET").path("/posts/1");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"id":1,"title":"First"}"#);
    });

    let mut config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tmp config");
    writeln!(config, "[api]\nbase_url = \"{}\"", server.base_url()).expect("write config");

    blogfront()
        .arg("--config-file")
        .arg(config.path())
        .args(["posts", "get", "1"])
        .assert()
        .success()
        .stdout(contains("\"title\": \"First\""));
    mock.assert();
}
