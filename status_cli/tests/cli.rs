use assert_cmd::Command;
use predicates::prelude::*;
use status_service::{router, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;

const UNREACHABLE: &str = "http://127.0.0.1:1";

fn status_page() -> Command {
    let mut cmd = Command::cargo_bin("status-page").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("NEXT_PUBLIC_API_BASE_URL");
    cmd
}

fn write_config(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("status-page-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Serve the healthcheck on an ephemeral port from a background runtime.
fn spawn_service(name: &str) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let app = router(AppState::new(name));

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://{}", addr)
}

#[test]
fn test_help_lists_commands() {
    status_page()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_validate_accepts_yaml_config() {
    let path = write_config(
        "view.yaml",
        "base_url: \"http://localhost:8000\"\ntitle: \"Savour Herbs\"\n",
    );

    status_page()
        .arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"))
        .stdout(predicate::str::contains("GET http://localhost:8000/api/v1/healthcheck"))
        .stdout(predicate::str::contains("Loading..."));
}

#[test]
fn test_validate_rejects_unknown_extension() {
    let path = write_config("view.ini", "title = x\n");

    status_page()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Config is invalid"));
}

#[test]
fn test_check_unreachable_renders_error() {
    status_page()
        .args(["check", "--base-url", UNREACHABLE, "--title", "Demo"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Demo"))
        .stdout(predicate::str::contains("Status:").not());
}

#[test]
fn test_check_json_reports_transport_failure() {
    status_page()
        .args(["check", "--json"])
        .env("NEXT_PUBLIC_API_BASE_URL", UNREACHABLE)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"state\": \"error\""))
        .stdout(predicate::str::contains("\"status_code\": null"))
        .stdout(predicate::str::contains("TEMPLATE_PROJECT_NAME"));
}

#[test]
fn test_check_relative_url_without_origin_fails() {
    status_page()
        .args(["check", "--json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"state\": \"error\""));
}

#[test]
fn test_check_healthy_service_exits_zero() {
    let base_url = spawn_service("Savour Herbs");

    status_page()
        .args(["check", "--base-url", base_url.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("TEMPLATE_PROJECT_NAME"))
        .stdout(predicate::str::contains("Savour Herbs API is healthy!"))
        .stdout(predicate::str::contains("Live since 0 days"));
}

#[test]
fn test_check_json_reports_ok_state() {
    let base_url = spawn_service("Savour Herbs");

    status_page()
        .args(["check", "--json", "--base-url", base_url.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"state\": \"ok\""))
        .stdout(predicate::str::contains("\"checked_at\""))
        .stdout(predicate::str::contains("Savour Herbs API is healthy!"));
}

#[test]
fn test_base_url_precedence() {
    let base_url = spawn_service("Savour Herbs");
    let config = write_config(
        "precedence.yaml",
        &format!("base_url: \"{}\"\ntitle: \"From File\"\n", UNREACHABLE),
    );

    // The config file alone points at a dead port.
    status_page()
        .args(["check", "--config"])
        .arg(&config)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("From File"));

    // The environment overrides the config file.
    status_page()
        .args(["check", "--config"])
        .arg(&config)
        .env("NEXT_PUBLIC_API_BASE_URL", &base_url)
        .assert()
        .success()
        .stdout(predicate::str::contains("Savour Herbs API is healthy!"));

    // The flag overrides the environment.
    status_page()
        .args(["check", "--base-url", base_url.as_str(), "--config"])
        .arg(&config)
        .env("NEXT_PUBLIC_API_BASE_URL", UNREACHABLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Live since 0 days"));
}
