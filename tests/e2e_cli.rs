//! CLI end-to-end tests
//!
//! Tests for the hushcut command-line interface. None of these need ffmpeg:
//! they cover argument handling, validation and commands that fail before
//! any tool runs.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the hushcut binary
#[allow(deprecated)]
fn hushcut_cmd() -> Command {
    Command::cargo_bin("hushcut").unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = hushcut_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = hushcut_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("hushcut"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = hushcut_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "hushcut {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_cli_denoise_help() {
    let mut cmd = hushcut_cmd();
    cmd.args(["denoise", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--atten-lim"))
        .stdout(predicate::str::contains("--model-dir"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_cli_check_tools_lists_pipeline_tools() {
    let mut cmd = hushcut_cmd();
    // Exit status depends on whether ffmpeg is installed
    cmd.arg("check-tools").assert().stdout(
        predicate::str::contains("ffmpeg").and(predicate::str::contains("ffprobe")),
    );
}

#[test]
fn test_cli_denoise_missing_input() {
    let dir = tempdir().unwrap();
    let mut cmd = hushcut_cmd();
    cmd.arg("denoise")
        .arg(dir.path().join("missing.mp4"))
        .arg(dir.path().join("out.mp4"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file does not exist"));
}

#[test]
fn test_cli_denoise_missing_output_dir() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("clip.mp4");
    fs::write(&input, b"video").unwrap();

    let mut cmd = hushcut_cmd();
    cmd.arg("denoise")
        .arg(&input)
        .arg(dir.path().join("nope/out.mp4"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Output directory does not exist"));
}

#[test]
fn test_cli_denoise_refuses_to_overwrite_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("clip.mp4");
    fs::write(&input, b"video").unwrap();

    let mut cmd = hushcut_cmd();
    cmd.arg("denoise")
        .arg(&input)
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Output must differ from input"));
}

#[test]
fn test_cli_denoise_rejects_out_of_range_attenuation() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("clip.mp4");
    fs::write(&input, b"video").unwrap();

    let mut cmd = hushcut_cmd();
    cmd.arg("denoise")
        .arg(&input)
        .arg(dir.path().join("out.mp4"))
        .args(["--atten-lim", "90"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("90"));
}

#[test]
fn test_cli_denoise_dry_run_prints_plan() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("clip.mp4");
    fs::write(&input, b"video").unwrap();
    // Any existing file will do; dry runs never execute it.
    let ffmpeg = dir.path().join("ffmpeg");
    fs::write(&ffmpeg, b"").unwrap();
    let config = dir.path().join("hushcut.toml");
    fs::write(
        &config,
        format!(
            "[tools]\nffmpeg_path = {:?}\n\n[output]\naudio_bitrate = \"256k\"\n",
            ffmpeg.display().to_string()
        ),
    )
    .unwrap();

    let mut cmd = hushcut_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("denoise")
        .arg(&input)
        .arg(dir.path().join("out.mp4"))
        .args(["--atten-lim", "45", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN]"))
        .stdout(predicate::str::contains("-ignore_editlist 1"))
        .stdout(predicate::str::contains("pcm_s16le"))
        .stdout(predicate::str::contains("-b:a 256k"))
        .stdout(predicate::str::contains("-shortest"))
        .stdout(predicate::str::contains("Attenuation limit: 45 dB"));
}

#[test]
fn test_cli_probe_nonexistent_file() {
    let mut cmd = hushcut_cmd();
    cmd.args(["probe", "/nonexistent/file.mkv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_validate_valid_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("hushcut.toml");
    fs::write(
        &config,
        r#"
[model]
attenuation_limit_db = 30

[workspace]
cleanup_grace_ms = 0
"#,
    )
    .unwrap();

    let mut cmd = hushcut_cmd();
    cmd.arg("validate")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("Attenuation limit: 30 dB"))
        .stdout(predicate::str::contains("aac @ 320k"));
}

#[test]
fn test_cli_validate_invalid_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("hushcut.toml");
    fs::write(&config, "[model]\nattenuation_limit_db = 0\n").unwrap();

    let mut cmd = hushcut_cmd();
    cmd.arg("validate")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("attenuation_limit_db"));
}

#[test]
fn test_cli_validate_malformed_toml() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("hushcut.toml");
    fs::write(&config, "[model\nattenuation_limit_db = ").unwrap();

    let mut cmd = hushcut_cmd();
    cmd.arg("validate")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

/// Ctrl-C from a terminal signals the whole foreground process group. The
/// running ffmpeg must survive it so the job stops cleanly at the next stage
/// boundary.
#[cfg(unix)]
#[test]
fn test_cli_denoise_interrupt_cancels_after_current_stage() {
    use std::os::unix::fs::PermissionsExt;
    use std::os::unix::process::CommandExt;
    use std::process::Stdio;
    use std::time::Duration;

    let dir = tempdir().unwrap();
    let input = dir.path().join("clip.mp4");
    fs::write(&input, b"video").unwrap();
    let scratch = dir.path().join("scratch");
    fs::create_dir(&scratch).unwrap();
    let marker = dir.path().join("ffmpeg_finished");

    // Slow ffmpeg that writes its last argument once it is done.
    let ffmpeg = dir.path().join("ffmpeg");
    fs::write(
        &ffmpeg,
        format!(
            "#!/bin/sh\nfor last; do :; done\nsleep 3\necho sanitized > \"$last\"\ntouch {:?}\n",
            marker.display().to_string()
        ),
    )
    .unwrap();
    fs::set_permissions(&ffmpeg, fs::Permissions::from_mode(0o755)).unwrap();

    let config = dir.path().join("hushcut.toml");
    fs::write(
        &config,
        format!(
            "[tools]\nffmpeg_path = {:?}\nffprobe_path = {:?}\n\n[workspace]\nroot = {:?}\ncleanup_grace_ms = 0\n",
            ffmpeg.display().to_string(),
            ffmpeg.display().to_string(),
            scratch.display().to_string()
        ),
    )
    .unwrap();

    let mut cmd = hushcut_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("denoise")
        .arg(&input)
        .arg(dir.path().join("out.mp4"))
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .process_group(0);
    let child = cmd.spawn().unwrap();
    let group = child.id();

    // Let the job reach the sanitize stage, then interrupt the whole group
    // the way a terminal would.
    std::thread::sleep(Duration::from_millis(1000));
    let status = Command::new("kill")
        .args(["-INT", "--", &format!("-{}", group)])
        .status()
        .unwrap();
    assert!(status.success());

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(130), "stdout: {}\nstderr: {}", stdout, stderr);
    assert!(stdout.contains("cancelled"), "stdout: {}", stdout);
    assert!(!stderr.contains("External tool failed"), "stderr: {}", stderr);
    assert!(marker.exists());
    assert!(fs::read_dir(&scratch).unwrap().next().is_none());
}
