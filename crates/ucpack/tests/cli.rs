#![cfg(all(unix, feature = "cli"))]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use ucpack::frame::{PacketCodec, TRACK};

fn ucpack() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ucpack"));
    cmd.env_remove("UCPACK_START_MARKER")
        .env_remove("UCPACK_END_MARKER")
        .env_remove("UCPACK_CAPACITY")
        .arg("--log-level")
        .arg("error");
    cmd
}

fn run(args: &[&str]) -> Output {
    ucpack().args(args).output().expect("ucpack should run")
}

fn run_with_stdin(args: &[&str], input: &[u8]) -> Output {
    let mut child = ucpack()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("ucpack should start");
    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(input)
        .expect("stdin write should succeed");
    child.wait_with_output().expect("ucpack should finish")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("stdout should be UTF-8")
}

fn temp_file(tag: &str, bytes: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "ucpack-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::write(&path, bytes).expect("temp file should be writable");
    path
}

#[test]
fn pack_prints_known_frame() {
    let output = run(&["--format", "pretty", "pack", "C1B", "-c", "5", "200"]);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);
    assert_eq!(stdout(&output).trim(), "41 02 05 c8 23 f7");
}

#[test]
fn pack_json_and_raw_agree() {
    let output = run(&["--format", "json", "pack", "c3f", "-c", "16", "1.5", "-2", "0"]);
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(stdout(&output).trim()).expect("pack json should parse");
    assert_eq!(json["shape"], "C3F");
    assert_eq!(json["length"], 13);

    let raw = run(&["--format", "raw", "pack", "C3F", "-c", "16", "1.5", "-2", "0"]);
    assert!(raw.status.success());
    let mut codec = PacketCodec::new(256).expect("codec");
    assert_eq!(raw.stdout, codec.pack_c3f(TRACK, 1.5, -2.0, 0.0));
}

#[test]
fn crc_matches_check_value() {
    let output = run(&["--format", "pretty", "crc", "313233343536373839"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "0xA1");
}

#[test]
fn shapes_lists_every_builtin() {
    let output = run(&["--format", "json", "shapes"]);
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(stdout(&output).trim()).expect("shapes json should parse");
    let shapes = json["shapes"].as_array().expect("shapes array");
    assert_eq!(shapes.len(), 15);

    let c3i = shapes
        .iter()
        .find(|s| s["name"] == "C3I")
        .expect("C3I listed");
    assert_eq!(c3i["payload_length"], 7);
    assert_eq!(c3i["frame_length"], 11);
}

#[test]
fn decode_hex_from_stdin_skips_noise() {
    let output = run_with_stdin(
        &["--format", "json", "decode", "--hex"],
        b"00 13 41 02 05 c8 23 f7 ee\n",
    );
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1);
    let json: serde_json::Value = serde_json::from_str(lines[0]).expect("packet json");
    assert_eq!(json["code"], 5);
    assert_eq!(json["data"], "c8");
}

#[test]
fn decode_raw_file_with_builtin_shape() {
    let mut codec = PacketCodec::new(256).expect("codec");
    let mut bytes = codec.pack_c3f(TRACK, 1.5, 0.25, 1.0).to_vec();
    bytes.extend_from_slice(codec.pack_c1b(0x30, 1));
    let path = temp_file("decode", &bytes);

    let output = run(&["--format", "json", "decode", path.to_str().expect("utf-8 path")]);
    let _ = std::fs::remove_file(&path);
    assert!(output.status.success(), "stderr: {:?}", output.stderr);

    let text = stdout(&output);
    let packets: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("packet json"))
        .collect();
    assert_eq!(packets.len(), 2);
    assert_eq!(packets[0]["command"], "TRACK");
    assert_eq!(packets[0]["values"], serde_json::json!([1.5, 0.25, 1.0]));
    assert_eq!(packets[1]["code"], 0x30);
    assert!(packets[1].get("values").is_none());
}

#[test]
fn decode_with_wrong_shape_exits_data_invalid() {
    let output = run_with_stdin(
        &["--format", "json", "decode", "--hex", "--shape", "C1F"],
        b"410205c823f7",
    );
    assert_eq!(output.status.code(), Some(60));
    assert!(stdout(&output).contains("\"error\""));
}

#[test]
fn decode_without_packets_exits_data_invalid() {
    let output = run_with_stdin(&["decode", "--hex"], b"410205c823f8");
    assert_eq!(output.status.code(), Some(60));
    assert!(output.stdout.is_empty());
}

#[test]
fn usage_errors_exit_64() {
    let output = run(&["pack", "C9Q", "-c", "1", "2"]);
    assert_eq!(output.status.code(), Some(64));

    let output = run(&["pack", "C2B", "-c", "1", "2"]);
    assert_eq!(output.status.code(), Some(64));

    let output = run(&["--start-marker", "#", "pack", "C1B", "-c", "1", "2"]);
    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("marker"), "stderr: {stderr}");
}

#[test]
fn custom_markers_roundtrip_through_decode() {
    let packed = run(&[
        "--start-marker",
        "<",
        "--end-marker",
        ">",
        "--format",
        "raw",
        "pack",
        "C1I",
        "-c",
        "9",
        "-300",
    ]);
    assert!(packed.status.success());
    assert_eq!(packed.stdout.first(), Some(&b'<'));

    let output = run_with_stdin(
        &[
            "--start-marker",
            "<",
            "--end-marker",
            ">",
            "--format",
            "json",
            "decode",
            "--shape",
            "C1I",
        ],
        &packed.stdout,
    );
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(stdout(&output).trim()).expect("packet json");
    assert_eq!(json["values"], serde_json::json!([-300]));
}

#[test]
fn version_prints_name() {
    let output = run(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("ucpack "));
}
