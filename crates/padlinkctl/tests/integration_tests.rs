//! Integration tests for padlinkctl
//!
//! Each test runs the real binary and checks stdout, stderr and exit codes.

use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn padlinkctl() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("padlinkctl")?;
    cmd.env_remove("PADLINK_HOST").env_remove("PADLINK_CONFIG");
    Ok(cmd)
}

fn json_stdout(cmd: &mut Command) -> Result<Value, Box<dyn std::error::Error>> {
    let output = cmd.output()?;
    if !output.status.success() {
        return Err(format!(
            "command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        )
        .into());
    }
    Ok(serde_json::from_slice(&output.stdout)?)
}

fn approx(value: &Value, expected: f64) -> bool {
    value
        .as_f64()
        .is_some_and(|actual| (actual - expected).abs() < 1e-6)
}

#[test]
fn test_help_lists_commands() -> TestResult {
    padlinkctl()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stream"))
        .stdout(predicate::str::contains("decode"))
        .stdout(predicate::str::contains("feedback"));
    Ok(())
}

#[test]
fn test_encode_idle_telemetry() -> TestResult {
    padlinkctl()?
        .args(["encode", "telemetry"])
        .assert()
        .success()
        .stdout("AAAAAAAAAAA=\n");
    Ok(())
}

#[test]
fn test_encode_then_decode_telemetry() -> TestResult {
    let encoded = json_stdout(padlinkctl()?.args([
        "encode",
        "telemetry",
        "--json",
        "--frame",
        r#"{"trigger":"pressed","left_controller":true,"battery_percent":0.5}"#,
    ]))?;
    let wire = encoded["wire"].as_str().ok_or("missing wire")?.to_owned();

    let decoded = json_stdout(padlinkctl()?.args(["decode", "telemetry", "--json", &wire]))?;
    assert_eq!(decoded["success"], Value::Bool(true));
    assert_eq!(decoded["telemetry"]["trigger"], "pressed");
    assert_eq!(decoded["telemetry"]["left_controller"], Value::Bool(true));
    assert!(approx(&decoded["telemetry"]["battery_percent"], 0.5));
    Ok(())
}

#[test]
fn test_encode_telemetry_from_file() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("frame.json");
    fs::write(&path, r#"{"grip":"touched"}"#)?;

    let encoded = json_stdout(padlinkctl()?.args([
        "encode",
        "telemetry",
        "--json",
        "--file",
        path.to_str().ok_or("non-utf8 temp path")?,
    ]))?;
    assert_eq!(encoded["kind"], "telemetry");
    Ok(())
}

#[test]
fn test_decode_haptic_json() -> TestResult {
    let decoded = json_stdout(padlinkctl()?.args(["decode", "haptic", "AegH6AfQDw==", "--json"]))?;
    let haptic = &decoded["haptic"];
    assert_eq!(haptic["left_controller"], Value::Bool(true));
    assert!(approx(&haptic["amplitude"], 0.5));
    assert!(approx(&haptic["frequency"], 5.0));
    assert!(approx(&haptic["duration_seconds"], 1.0));
    Ok(())
}

#[test]
fn test_encode_haptic() -> TestResult {
    padlinkctl()?
        .args([
            "encode",
            "haptic",
            "--left",
            "--amplitude",
            "0.5",
            "--frequency",
            "5",
            "--duration",
            "1",
        ])
        .assert()
        .success()
        .stdout("AegH6AfQDw==\n");
    Ok(())
}

#[test]
fn test_decode_rejects_garbage() -> TestResult {
    padlinkctl()?
        .args(["decode", "telemetry", "not base64!"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Error:"));
    Ok(())
}

#[test]
fn test_decode_short_haptic_json_error() -> TestResult {
    let output = padlinkctl()?
        .args(["decode", "haptic", "AQ==", "--json"])
        .output()?;
    assert_eq!(output.status.code(), Some(4));
    let body: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["error"]["type"], "Decode");
    Ok(())
}

#[test]
fn test_synth_pulsed_waveform() -> TestResult {
    let body = json_stdout(padlinkctl()?.args([
        "synth",
        "--amplitude",
        "1",
        "--frequency",
        "5",
        "--duration",
        "1",
        "--json",
    ]))?;
    assert_eq!(body["total_duration_ms"], 2000);
    let timings = body["timings"].as_array().ok_or("missing timings")?;
    assert_eq!(timings.len(), 20);
    Ok(())
}

#[test]
fn test_synth_constant_human() -> TestResult {
    padlinkctl()?
        .args(["synth", "--amplitude", "0.5", "--duration", "0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("one-shot"))
        .stdout(predicate::str::contains("200 ms"));
    Ok(())
}

#[test]
fn test_feedback_double() -> TestResult {
    let body = json_stdout(padlinkctl()?.args(["feedback", "double", "--json"]))?;
    assert_eq!(body["source"], "double");
    assert_eq!(body["timings"], serde_json::json!([0, 35, 0, 55]));
    Ok(())
}

#[test]
fn test_config_write_and_show() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("nested").join("padlink.json");
    let path_str = path.to_str().ok_or("non-utf8 temp path")?;

    padlinkctl()?
        .args(["config", "write", path_str])
        .assert()
        .success();
    assert!(path.exists());

    padlinkctl()?
        .args(["config", "write", path_str])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("--force"));

    let mut config: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    config["host"] = Value::String("10.1.2.3".to_owned());
    fs::write(&path, serde_json::to_string_pretty(&config)?)?;

    let shown = json_stdout(padlinkctl()?.args(["--config", path_str, "config", "show", "--json"]))?;
    assert_eq!(shown["config"]["host"], "10.1.2.3");
    assert_eq!(shown["config"]["port"], 9775);
    Ok(())
}

#[test]
fn test_invalid_config_file_exit_code() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"port": 0}"#)?;

    padlinkctl()?
        .args(["--config", path.to_str().ok_or("non-utf8 temp path")?, "config", "show"])
        .assert()
        .code(3);
    Ok(())
}

#[test]
fn test_stream_requires_host() -> TestResult {
    padlinkctl()?
        .args(["stream", "--duration", "1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No host"));
    Ok(())
}

#[test]
fn test_stream_connection_refused() -> TestResult {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };

    padlinkctl()?
        .args([
            "stream",
            "--host",
            "127.0.0.1",
            "--port",
            &port.to_string(),
            "--duration",
            "5",
        ])
        .assert()
        .code(5);
    Ok(())
}

#[test]
fn test_stream_against_loopback_host() -> TestResult {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();

    let host = thread::spawn(move || -> std::io::Result<Vec<String>> {
        let (stream, _) = listener.accept()?;
        stream.set_read_timeout(Some(Duration::from_secs(10)))?;
        let mut writer = stream.try_clone()?;
        let mut reader = BufReader::new(stream);

        let mut lines = Vec::new();
        let mut line = String::new();
        reader.read_line(&mut line)?;
        lines.push(line.trim_end().to_owned());

        writer.write_all(b"AegH6AfQDw==\nAOgH6AfQDw==\n")?;
        writer.flush()?;

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            lines.push(line.trim_end().to_owned());
        }
        Ok(lines)
    });

    let body = json_stdout(padlinkctl()?.args([
        "stream",
        "--host",
        "127.0.0.1",
        "--port",
        &port.to_string(),
        "--duration",
        "2",
        "--json",
    ]))?;

    let lines = host
        .join()
        .map_err(|e| format!("host thread panicked: {e:?}"))??;
    assert_eq!(lines.first().map(String::as_str), Some("s2uk_connection_init"));
    assert_eq!(lines.last().map(String::as_str), Some("s2uk_connection_closed"));
    assert!(lines.len() > 3, "expected telemetry frames, got {lines:?}");

    let stream = &body["stream"];
    assert_eq!(stream["end"], "stopped");
    assert!(stream["frames_sent"].as_u64().is_some_and(|n| n > 0));
    assert_eq!(stream["haptics_played"], 1);
    Ok(())
}
