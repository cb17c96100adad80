// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fundclip::config::Settings;
use tempfile::tempdir;

#[test]
fn settings_file_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{"api_url": "https://funds.example.com", "log_level": "debug"}"#,
    )
    .unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.api_url, "https://funds.example.com");
    assert_eq!(settings.log_level, "debug");
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{}").unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.api_url, "http://localhost:8080");
    assert_eq!(settings.log_level, "warn");
}

#[test]
fn malformed_settings_are_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{api_url: nope").unwrap();
    assert!(Settings::load_from(&path).is_err());
}
