//! CLI Integration Tests
//!
//! These tests run the `weatherdash` binary against a throwaway HTTP server
//! on 127.0.0.1 and a config file in a temp directory.
//!
//! ```
//! cargo test --package weatherdash-cli --test cli_integration
//! ```

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Output};
use std::thread;

const READINGS: &str = r#"[
  {"time":"2024-05-01T10:00:00Z","temperature":19.5,"humidity":61,"aqi":18,"wifiStrength":-64,"hi":19.2,"raining":"No"},
  {"time":"2024-05-01T10:05:00Z","temperature":20.25,"humidity":58,"aqi":22,"wifiStrength":-61,"hi":20.1,"raining":"Yes"}
]"#;

/// Run weatherdash with an isolated config file and no ambient station URL.
fn run_weatherdash(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_weatherdash"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("WEATHERDASH_URL")
        .env_remove("WEATHERDASH_STYLE")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to run weatherdash binary")
}

/// Serve `body` as JSON to `requests` connections, then stop.
fn serve(body: &'static str, requests: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming().take(requests) {
            let mut stream = stream.unwrap();
            let mut buf = [0u8; 2048];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        }
    });
    format!("http://{}", addr)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn test_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_weatherdash(&dir.path().join("config.toml"), &["--help"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("latest"));
    assert!(text.contains("series"));
    assert!(text.contains("config"));
    assert!(text.contains("--url"));
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_weatherdash(&dir.path().join("config.toml"), &["--version"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("weatherdash"));
}

#[test]
fn test_series_help_lists_fields() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_weatherdash(&dir.path().join("config.toml"), &["series", "--help"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("wifiStrength"));
}

// =============================================================================
// Argument validation
// =============================================================================

#[test]
fn test_unknown_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_weatherdash(
        &dir.path().join("config.toml"),
        &["--url", "http://127.0.0.1:1", "series", "--field", "pressure"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("pressure"));
}

#[test]
fn test_unknown_range_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_weatherdash(
        &dir.path().join("config.toml"),
        &[
            "--url",
            "http://127.0.0.1:1",
            "series",
            "--field",
            "aqi",
            "--range",
            "fortnight",
        ],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("fortnight"));
}

#[test]
fn test_missing_url_explains_how_to_set_it() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_weatherdash(&dir.path().join("config.toml"), &["latest"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("No station URL configured"));
}

#[test]
fn test_invalid_url_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_weatherdash(
        &dir.path().join("config.toml"),
        &["--url", "station.local", "latest"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("station.local"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_weatherdash(
        &dir.path().join("config.toml"),
        &["--url", "http://127.0.0.1:1", "--timeout", "0", "latest"],
    );

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("--timeout"), "{}", err);
    assert!(!err.contains("Failed to load readings"));
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_path_uses_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    let output = run_weatherdash(&path, &["config", "path"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("custom.toml"));
}

#[test]
fn test_config_set_get_unset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let output = run_weatherdash(&path, &["config", "set", "range", "last24Hours"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let output = run_weatherdash(&path, &["config", "get", "range"]);
    assert_eq!(stdout(&output).trim(), "last24Hours");

    let output = run_weatherdash(&path, &["config", "unset", "range"]);
    assert!(output.status.success());

    let output = run_weatherdash(&path, &["config", "get", "range"]);
    assert_eq!(stdout(&output).trim(), "(not set)");
}

#[test]
fn test_config_set_rejects_bad_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let output = run_weatherdash(&path, &["config", "set", "timeout", "soon"]);
    assert!(!output.status.success());
    assert!(!path.exists());
}

#[test]
fn test_config_init_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let output = run_weatherdash(&path, &["config", "init"]);
    assert!(output.status.success());

    let output = run_weatherdash(&path, &["config", "show"]);
    let text = stdout(&output);
    assert!(text.contains("range = \"lastHour\""));
    assert!(text.contains("timeout = 10"));

    let output = run_weatherdash(&path, &["config", "init"]);
    assert!(!output.status.success());
}

// =============================================================================
// Fetching
// =============================================================================

#[test]
fn test_unreachable_station_fails() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let url = format!("http://{}", addr);
    let output = run_weatherdash(
        &dir.path().join("config.toml"),
        &["--url", &url, "--timeout", "2", "latest"],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load readings"));
}

#[test]
fn test_latest_json() {
    let url = serve(READINGS, 1);
    let dir = tempfile::tempdir().unwrap();
    let output = run_weatherdash(
        &dir.path().join("config.toml"),
        &["--url", &url, "-q", "latest", "--format", "json"],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["temperature"], 20.25);
    assert_eq!(json["raining"], "Yes");
    assert_eq!(json["tiles"].as_array().map(Vec::len), Some(7));
}

#[test]
fn test_latest_csv_fahrenheit() {
    let url = serve(READINGS, 1);
    let dir = tempfile::tempdir().unwrap();
    let output = run_weatherdash(
        &dir.path().join("config.toml"),
        &["--url", &url, "-q", "latest", "--format", "csv", "--fahrenheit"],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("time,temperature_f,humidity,aqi,wifi_strength,heat_index_f,raining")
    );
    assert!(lines.next().is_some_and(|l| l.contains(",68.450,")));
}

#[test]
fn test_latest_empty_history_fails() {
    let url = serve("[]", 1);
    let dir = tempfile::tempdir().unwrap();
    let output = run_weatherdash(&dir.path().join("config.toml"), &["--url", &url, "latest"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("no readings"));
}

#[test]
fn test_series_raining_csv() {
    let url = serve(READINGS, 1);
    let dir = tempfile::tempdir().unwrap();
    let output = run_weatherdash(
        &dir.path().join("config.toml"),
        &[
            "--url", &url, "-q", "series", "--field", "raining", "--range", "allTime", "--format",
            "csv",
        ],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "time,label,raining");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with(",0"));
    assert!(lines[2].ends_with(",1"));
}

#[test]
fn test_series_json_to_file() {
    let url = serve(READINGS, 1);
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("series.json");
    let out = out_path.to_string_lossy().to_string();
    let output = run_weatherdash(
        &dir.path().join("config.toml"),
        &[
            "--url", &url, "-q", "-o", &out, "series", "--field", "humidity", "--range",
            "allTime", "--format", "json",
        ],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(json["field"], "humidity");
    assert_eq!(json["range"], "allTime");
    assert_eq!(json["count"], 2);
    assert_eq!(json["points"][0]["value"], 61.0);
}

#[test]
fn test_series_old_readings_fall_outside_last_hour() {
    let url = serve(READINGS, 1);
    let dir = tempfile::tempdir().unwrap();
    let output = run_weatherdash(
        &dir.path().join("config.toml"),
        &["--url", &url, "-q", "series", "--field", "aqi", "--range", "lastHour"],
    );

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("No readings in range: Last Hour"));
}
