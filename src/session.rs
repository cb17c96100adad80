// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Explicit session store: who is logged in, kept as a small JSON file in
//! the platform data dir. Written on login, removed on logout; every
//! authenticated command loads it up front.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub login_id: String,
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn open() -> Result<SessionStore> {
        Ok(SessionStore {
            path: config::data_dir()?.join("session.json"),
        })
    }

    pub fn at(path: PathBuf) -> SessionStore {
        SessionStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let contents = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Write session at {}", self.path.display()))?;
        Ok(())
    }

    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Read session at {}", self.path.display()))?;
        let session = serde_json::from_str(&contents)
            .with_context(|| format!("Parse session at {}", self.path.display()))?;
        Ok(Some(session))
    }

    /// The session for commands that require a logged-in user.
    pub fn current(&self) -> Result<Session> {
        match self.load()? {
            Some(session) => Ok(session),
            None => bail!("Not logged in. Run 'fundclip login' first"),
        }
    }

    /// Removes the session file; returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Remove session at {}", self.path.display()))?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
