//! Integration tests for the `jman` CLI binary.
//!
//! Argument parsing, help output and completions run without a backend;
//! data commands run against a wiremock dashboard API.
#![allow(clippy::unwrap_used)]

use std::path::Path;
use std::process::Output;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `jman` binary with env isolation.
///
/// Clears all `JMAN_*` env vars and points home/config/data directories at
/// `home` so tests never touch the user's real configuration or cache.
fn jman_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("jman");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("JMAN_BASE_URL")
        .env_remove("JMAN_ORIGIN")
        .env_remove("JMAN_CACHE_DIR")
        .env_remove("JMAN_OUTPUT")
        .env_remove("JMAN_INSECURE")
        .env_remove("JMAN_TIMEOUT")
        .env_remove("JMAN_API__BASE_URL")
        .env_remove("JMAN_API__ORIGIN");
    cmd
}

/// `jman` pointed at a mock backend with a private cache directory.
fn data_cmd(home: &TempDir, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = jman_cmd(home.path());
    cmd.arg("--base-url")
        .arg(format!("{}/api", server.uri()))
        .arg("--cache-dir")
        .arg(home.path().join("cache"));
    cmd
}

/// Run a command off the async runtime so the mock server keeps serving.
async fn run(mut cmd: assert_cmd::Command, args: &[&str]) -> Output {
    cmd.args(args);
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn mount_dashboard(server: &MockServer, hits: u64) {
    let bodies = [
        (
            "servers",
            json!([
                { "id": 1, "name": "web-1", "ip_address": "10.0.0.1", "reboot_required": true },
                { "id": 2, "name": "web-2", "ip_address": "10.0.0.2" }
            ]),
        ),
        (
            "sites",
            json!([
                { "id": 10, "server_id": 1, "domain": "alpha.com", "php_version": "8.2" },
                { "id": 11, "server_id": 2, "domain": "beta.com" },
                { "id": 12, "server_id": 1, "domain": "gamma.com", "wp_core_update": true }
            ]),
        ),
        (
            "plugins",
            json!([
                { "site_id": 10, "name": "akismet", "version": "5.0", "update": "5.1" },
                { "site_id": 10, "name": "yoast", "version": "22.0" },
                { "site_id": 11, "name": "jetpack", "version": "13.1" }
            ]),
        ),
    ];
    for (endpoint, body) in bodies {
        Mock::given(method("GET"))
            .and(path(format!("/api/{endpoint}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(hits)
            .mount(server)
            .await;
    }
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = jman_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    jman_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("servers")
            .and(predicate::str::contains("sites"))
            .and(predicate::str::contains("plugins"))
            .and(predicate::str::contains("refresh")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    jman_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jman"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    jman_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    let home = TempDir::new().unwrap();
    jman_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_points_at_toml() {
    let home = TempDir::new().unwrap();
    jman_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_no_config() {
    // Defaults are rendered when no config file exists.
    let home = TempDir::new().unwrap();
    jman_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("base_url = \"/api\"")
                .and(predicate::str::contains("http://localhost:8080")),
        );
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();
    jman_cmd(home.path())
        .args(["config", "init"])
        .assert()
        .success();

    let output = jman_cmd(home.path())
        .args(["config", "init"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("already exists"));

    jman_cmd(home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    let output = jman_cmd(home.path()).arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let home = TempDir::new().unwrap();
    let output = jman_cmd(home.path())
        .args(["--output", "invalid", "servers"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about invalid output format:\n{text}"
    );
}

#[test]
fn test_unreachable_api_fails() {
    let home = TempDir::new().unwrap();
    jman_cmd(home.path())
        .args(["--base-url", "http://127.0.0.1:1/api", "--no-cache", "servers"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cannot reach dashboard API"));
}

// ── Data commands ───────────────────────────────────────────────────

#[tokio::test]
async fn test_servers_table() {
    let server = MockServer::start().await;
    mount_dashboard(&server, 1).await;
    let home = TempDir::new().unwrap();

    let output = run(data_cmd(&home, &server), &["servers"]).await;
    output
        .assert()
        .success()
        .stdout(predicate::str::contains("web-1").and(predicate::str::contains("10.0.0.2")));
}

#[tokio::test]
async fn test_sites_filtered_by_server_plain() {
    let server = MockServer::start().await;
    mount_dashboard(&server, 1).await;
    let home = TempDir::new().unwrap();

    let output = run(
        data_cmd(&home, &server),
        &["-o", "plain", "sites", "--server", "1"],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "10\n12");
}

#[tokio::test]
async fn test_plugins_json_filtered_by_site() {
    let server = MockServer::start().await;
    mount_dashboard(&server, 1).await;
    let home = TempDir::new().unwrap();

    let output = run(
        data_cmd(&home, &server),
        &["-o", "json", "plugins", "--site", "10"],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let plugins: Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = plugins
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["akismet", "yoast"]);
}

#[tokio::test]
async fn test_plugins_with_updates_only() {
    let server = MockServer::start().await;
    mount_dashboard(&server, 1).await;
    let home = TempDir::new().unwrap();

    let output = run(
        data_cmd(&home, &server),
        &["-o", "plain", "plugins", "--updates"],
    )
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "10\takismet");
}

#[tokio::test]
async fn test_site_detail_json_joins_server_and_plugins() {
    let server = MockServer::start().await;
    mount_dashboard(&server, 1).await;
    let home = TempDir::new().unwrap();

    let output = run(data_cmd(&home, &server), &["-o", "json", "site", "10"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let detail: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(detail["site"]["domain"], "alpha.com");
    assert_eq!(detail["server"]["name"], "web-1");
    assert_eq!(detail["plugins"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_site_not_found_exit_code() {
    let server = MockServer::start().await;
    mount_dashboard(&server, 1).await;
    let home = TempDir::new().unwrap();

    let output = run(data_cmd(&home, &server), &["site", "999"]).await;
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("not found"));
}

#[tokio::test]
async fn test_home_summary() {
    let server = MockServer::start().await;
    mount_dashboard(&server, 1).await;
    let home = TempDir::new().unwrap();

    let output = run(data_cmd(&home, &server), &["home"]).await;
    output.assert().success().stdout(
        predicate::str::contains("2 servers, 3 sites, 3 plugins")
            .and(predicate::str::contains("gamma.com")),
    );
}

#[tokio::test]
async fn test_second_run_uses_cache() {
    let server = MockServer::start().await;
    // One fetch cycle in total across both runs.
    mount_dashboard(&server, 1).await;
    let home = TempDir::new().unwrap();

    run(data_cmd(&home, &server), &["servers"])
        .await
        .assert()
        .success();
    assert!(home.path().join("cache").join("jman_sites.json").exists());

    run(data_cmd(&home, &server), &["-o", "plain", "sites"])
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("11"));
}

#[tokio::test]
async fn test_no_cache_leaves_disk_untouched() {
    let server = MockServer::start().await;
    mount_dashboard(&server, 1).await;
    let home = TempDir::new().unwrap();

    let mut cmd = data_cmd(&home, &server);
    cmd.arg("--no-cache");
    run(cmd, &["servers"]).await.assert().success();
    assert!(!home.path().join("cache").exists());
}

#[tokio::test]
async fn test_failed_fetch_reports_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let home = TempDir::new().unwrap();

    let output = run(data_cmd(&home, &server), &["servers"]).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(
        combined_output(&output).contains("Failed to fetch data from API endpoints"),
        "unexpected output:\n{}",
        combined_output(&output)
    );
}

#[tokio::test]
async fn test_refresh_prints_counts_and_fails_loudly() {
    let server = MockServer::start().await;
    mount_dashboard(&server, 1).await;
    let home = TempDir::new().unwrap();

    run(data_cmd(&home, &server), &["refresh"])
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("Refreshed: 2 servers, 3 sites, 3 plugins"));

    server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    // A cache exists now, but an explicit refresh still reports the failure.
    let output = run(data_cmd(&home, &server), &["refresh"]).await;
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("HTTP 503"));

    // Read commands fall back to the cache.
    run(data_cmd(&home, &server), &["-o", "plain", "servers"])
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("1\n2"));
}
