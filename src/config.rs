// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::api::DEFAULT_API_URL;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Fundclip", "fundclip"));

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")
}

pub fn data_dir() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let dir = proj.data_dir();
    fs::create_dir_all(dir).context("Failed to create data dir")?;
    Ok(dir.to_path_buf())
}

pub fn config_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir).context("Failed to create config dir")?;
    Ok(dir.join("settings.json"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: default_api_url(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Reads `settings.json` from the platform config dir; a missing file
    /// yields the defaults. `FUNDCLIP_API_URL` and `FUNDCLIP_LOG` override
    /// either source.
    pub fn load() -> Result<Settings> {
        let settings = match config_path() {
            Ok(path) if path.exists() => Settings::load_from(&path)?,
            _ => Settings::default(),
        };
        Ok(settings.with_env_overrides())
    }

    pub fn load_from(path: &std::path::Path) -> Result<Settings> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Read settings at {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Parse settings at {}", path.display()))
    }

    fn with_env_overrides(mut self) -> Settings {
        if let Ok(url) = std::env::var("FUNDCLIP_API_URL") {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
        if let Ok(level) = std::env::var("FUNDCLIP_LOG") {
            if !level.trim().is_empty() {
                self.log_level = level;
            }
        }
        self
    }
}
