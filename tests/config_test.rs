//! Configuration loading and validation.

use hushcut::config::{load_config, load_config_or_default, validate_config, Config};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hushcut.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn full_config_maps_onto_pipeline_settings() {
    let (dir, path) = write_config(
        r#"
[tools]
ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
ffprobe_path = "/opt/ffmpeg/bin/ffprobe"

[model]
dir = "/srv/models/rnnoise"
attenuation_limit_db = 24

[workspace]
cleanup_grace_ms = 0

[output]
audio_codec = "libopus"
audio_bitrate = "160k"
"#,
    );
    // Point the workspace at a directory that exists.
    let root = dir.path().to_path_buf();
    let mut config = load_config(&path).unwrap();
    config.workspace.root = Some(root.clone());

    assert_eq!(
        config.tools.ffmpeg_path.as_deref(),
        Some(std::path::Path::new("/opt/ffmpeg/bin/ffmpeg"))
    );
    assert_eq!(config.attenuation_limit().map(|l| l.db()), Some(24));
    assert_eq!(
        config.model_loader().model_dir(),
        Some(std::path::Path::new("/srv/models/rnnoise"))
    );

    let options = config.workspace_options();
    assert_eq!(options.root, Some(root));
    assert_eq!(options.cleanup_grace, Duration::ZERO);

    let encoding = config.audio_encoding();
    assert_eq!(encoding.codec, "libopus");
    assert_eq!(encoding.bitrate, "160k");
}

#[test]
fn empty_file_gives_defaults() {
    let (_dir, path) = write_config("");
    let config = load_config(&path).unwrap();
    assert!(config.tools.ffmpeg_path.is_none());
    assert!(config.model.dir.is_none());
    assert!(config.attenuation_limit().is_none());
    assert_eq!(config.workspace.cleanup_grace_ms, 500);
    assert_eq!(config.output.audio_codec, "aac");
    assert_eq!(config.output.audio_bitrate, "320k");
}

#[test]
fn explicit_path_wins() {
    let (_dir, path) = write_config("[output]\naudio_bitrate = \"96k\"\n");
    let config = load_config_or_default(Some(&path)).unwrap();
    assert_eq!(config.output.audio_bitrate, "96k");
}

#[test]
fn missing_explicit_path_is_an_error() {
    let err = load_config_or_default(Some(std::path::Path::new("/nonexistent/hushcut.toml")))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn attenuation_limit_out_of_range_is_rejected() {
    for bad in ["0", "61", "120"] {
        let (_dir, path) = write_config(&format!("[model]\nattenuation_limit_db = {}\n", bad));
        let err = load_config(&path).unwrap_err();
        assert!(
            err.to_string().contains("attenuation_limit_db"),
            "{} accepted",
            bad
        );
    }
}

#[test]
fn empty_codec_or_bitrate_is_rejected() {
    let mut config = Config::default();
    config.output.audio_codec = "  ".to_string();
    assert!(validate_config(&config).is_err());

    let mut config = Config::default();
    config.output.audio_bitrate = String::new();
    assert!(validate_config(&config).is_err());
}

#[test]
fn missing_workspace_root_only_warns() {
    let mut config = Config::default();
    config.workspace.root = Some(PathBuf::from("/nonexistent/scratch"));
    assert!(validate_config(&config).is_ok());
}

#[test]
fn unknown_types_fail_to_parse() {
    let (_dir, path) = write_config("[workspace]\ncleanup_grace_ms = \"soon\"\n");
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
