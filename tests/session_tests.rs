// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fundclip::session::{Session, SessionStore};
use tempfile::tempdir;

fn sample() -> Session {
    Session {
        user_id: "66f1c2a9".into(),
        name: "Asha".into(),
        login_id: "asha".into(),
    }
}

#[test]
fn save_then_load_round_trips_the_user() {
    let dir = tempdir().unwrap();
    let store = SessionStore::at(dir.path().join("session.json"));

    store.save(&sample()).unwrap();
    let loaded = store.load().unwrap().expect("session should exist");
    assert_eq!(loaded.user_id, "66f1c2a9");
    assert_eq!(loaded.name, "Asha");
    assert_eq!(loaded.login_id, "asha");

    let current = store.current().unwrap();
    assert_eq!(current.user_id, "66f1c2a9");
}

#[test]
fn missing_session_reports_not_logged_in() {
    let dir = tempdir().unwrap();
    let store = SessionStore::at(dir.path().join("session.json"));

    assert!(store.load().unwrap().is_none());
    let err = store.current().unwrap_err();
    assert!(err.to_string().contains("Not logged in"));
}

#[test]
fn clear_removes_the_file_once() {
    let dir = tempdir().unwrap();
    let store = SessionStore::at(dir.path().join("session.json"));

    store.save(&sample()).unwrap();
    assert!(store.path().exists());
    assert!(store.clear().unwrap());
    assert!(!store.path().exists());
    assert!(!store.clear().unwrap());
}

#[test]
fn corrupt_session_is_an_error_not_a_panic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();
    let store = SessionStore::at(path);
    assert!(store.load().is_err());
}
