//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use xr_room::config::AppConfig;

fn temp_config_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("xr_room_config_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("XR_ROOM_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("XR_ROOM_WINDOW__TITLE");
    assert_eq!(config.window.title, "Test From Env");
}

#[test]
#[serial]
fn test_env_override_nested_number() {
    std::env::set_var("XR_ROOM_SCENE__BALL_COUNT", "12");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("XR_ROOM_SCENE__BALL_COUNT");
    assert_eq!(config.scene.ball_count, 12);
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    let config = AppConfig::load().unwrap();
    assert_eq!(config.camera.fov, 50.0);
    assert_eq!(config.camera.position, [0.0, 1.6, 3.0]);
    assert_eq!(config.scene.ball_count, 200);
    assert_eq!(config.scene.room_size, [6.0, 6.0, 6.0]);
    assert_eq!(config.scene.room_segments, [10, 10, 10]);
    assert_eq!(config.scene.background, 0x505050);
    assert_eq!(config.rendering.hemisphere_sky, 0x606060);
    assert!(config.rendering.antialias);
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = temp_config_dir("user");
    fs::write(dir.join("default.toml"), "[window]\ntitle = \"default\"\nwidth = 640\n").unwrap();
    fs::write(dir.join("user.toml"), "[window]\ntitle = \"user\"\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    fs::remove_dir_all(&dir).ok();

    assert_eq!(config.window.title, "user");
    assert_eq!(config.window.width, 640);
    assert_eq!(config.window.height, 720);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let dir = std::env::temp_dir().join("xr_room_config_missing_dir");
    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.title, "xr_room");
    assert_eq!(config.stats.history, 74);
}

#[test]
#[serial]
fn test_invalid_value_is_an_error() {
    let dir = temp_config_dir("invalid");
    fs::write(dir.join("default.toml"), "[window]\nwidth = \"wide\"\n").unwrap();

    let result = AppConfig::load_from(&dir);
    fs::remove_dir_all(&dir).ok();

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
