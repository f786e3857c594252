//! E2E tests for the revlookup CLI

#![allow(deprecated)] // cargo_bin deprecation - will update when assert_cmd stabilizes replacement

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn revlookup() -> Command {
    let mut cmd = Command::cargo_bin("revlookup").unwrap();
    cmd.env_remove("REVLOOKUP_URL")
        .env_remove("REVLOOKUP_RULES")
        .env_remove("REVLOOKUP_USER_AGENT")
        .env_remove("RUST_LOG");
    cmd
}

const SAVED_PAGE: &str = r#"<html>
    <script>var id = "distil_RID=R-77";</script>
    <span class="subtitle">
      Acme &amp; Sons
    </span>
    <li><span>Full Number:</span>(555) 010-0000</li>
    <span class="address-primary">1 Elm St</span>
    <span class="address-location">Shelbyville</span>
</html>"#;

#[test]
fn test_help() {
    revlookup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("lookup"))
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("rules"));
}

#[test]
fn test_version() {
    revlookup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("revlookup"));
}

#[test]
fn test_lookup_help() {
    revlookup()
        .args(["lookup", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--parallel"))
        .stdout(predicate::str::contains("--max-redirects"))
        .stdout(predicate::str::contains("--lookup-url"))
        .stdout(predicate::str::contains("--rules"));
}

#[test]
fn test_lookup_no_args() {
    revlookup().arg("lookup").assert().failure();
}

#[test]
fn test_parallel_validation() {
    revlookup()
        .args(["lookup", "--parallel", "0", "5550100"])
        .assert()
        .failure();

    revlookup()
        .args(["lookup", "--parallel", "17", "5550100"])
        .assert()
        .failure();
}

#[test]
fn test_rules_prints_defaults() {
    revlookup()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("cookie:"))
        .stdout(predicate::str::contains("distil_RID"))
        .stdout(predicate::str::contains("address_location:"));
}

#[test]
fn test_rules_invalid_file() {
    let dir = tempdir().unwrap();
    let rules_path = dir.path().join("rules.yaml");
    fs::write(&rules_path, "formatted_number: '([0-9'\n").unwrap();

    revlookup()
        .args(["rules", "--rules", rules_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid extraction rules"));
}

#[test]
fn test_parse_saved_page() {
    let dir = tempdir().unwrap();
    let page_path = dir.path().join("page.html");
    fs::write(&page_path, SAVED_PAGE).unwrap();

    revlookup()
        .args(["parse", page_path.to_str().unwrap(), "--number", "5550100000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"session_cookie\": \"R-77\""))
        .stdout(predicate::str::contains("\"name\": \"Acme & Sons\""))
        .stdout(predicate::str::contains("\"address\": \"1 Elm St, Shelbyville\""))
        .stdout(predicate::str::contains("\"formatted_number\": \"(555) 010-0000\""));
}

#[test]
fn test_parse_with_rules_override() {
    let dir = tempdir().unwrap();
    let page_path = dir.path().join("page.html");
    let rules_path = dir.path().join("rules.yaml");
    fs::write(&page_path, "<div class=\"phone\">555.010.0000</div>").unwrap();
    fs::write(
        &rules_path,
        "formatted_number: '<div class=\"phone\">([0-9.]+)</div>'\n",
    )
    .unwrap();

    revlookup()
        .args([
            "parse",
            page_path.to_str().unwrap(),
            "--number",
            "5550100000",
            "--rules",
            rules_path.to_str().unwrap(),
            "--format",
            "yaml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("formatted_number:"))
        .stdout(predicate::str::contains("555.010.0000"));
}

#[test]
fn test_parse_file_not_found() {
    revlookup()
        .args(["parse", "nonexistent.html", "--number", "5550100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[tokio::test]
async fn test_lookup_against_mock_site() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/ReversePhone"))
        .and(header("cookie", "D_UID=R-77"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAVED_PAGE))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search/ReversePhone"))
        .respond_with(ResponseTemplate::new(200).set_body_string("distil_RID=R-77"))
        .mount(&server)
        .await;

    let url = format!("{}/search/ReversePhone?full_phone=", server.uri());
    revlookup()
        .args(["lookup", "5550100000", "--lookup-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ok\": true"))
        .stdout(predicate::str::contains("\"address\": \"1 Elm St, Shelbyville\""))
        .stderr(predicate::str::contains("Done: 1/1 OK"));
}

#[tokio::test]
async fn test_lookup_failure_exits_nonzero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>blocked</html>"))
        .mount(&server)
        .await;

    let url = format!("{}/search?full_phone=", server.uri());
    revlookup()
        .args(["lookup", "5550100000", "5550100001", "--lookup-url", &url])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"failed\": 2"))
        .stdout(predicate::str::contains("does not contain cookie value"));
}
