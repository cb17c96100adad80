// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::models::User;
use crate::session::{Session, SessionStore};
use crate::utils::{validate_login_id, validate_name, validate_password};
use anyhow::{Context, Result};

pub fn signup(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let login_id = sub
        .get_one::<String>("login-id")
        .unwrap()
        .trim()
        .to_string();
    let password = sub.get_one::<String>("password").unwrap().to_string();

    // All field checks run before any request goes out.
    validate_name(&name)?;
    validate_login_id(&login_id)?;
    validate_password(&password)?;

    let created = api.create_user(&User {
        id: None,
        name,
        login_id,
        password: Some(password),
    })?;
    println!(
        "Account created for '{}' (login id: {}). You can now log in.",
        created.name, created.login_id
    );
    Ok(())
}

pub fn login(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let login_id = sub.get_one::<String>("login-id").unwrap().trim();
    let password = sub.get_one::<String>("password").unwrap();

    let user = api.login(login_id, password)?;
    let session = Session {
        user_id: user.id.context("Login response is missing the user id")?,
        name: user.name,
        login_id: user.login_id,
    };
    store.save(&session)?;
    println!("Logged in as {} ({})", session.name, session.login_id);
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    if store.clear()? {
        println!("Logged out");
    } else {
        println!("No active session");
    }
    Ok(())
}

pub fn whoami(store: &SessionStore) -> Result<()> {
    let session = store.current()?;
    println!(
        "{} (login id: {}, user id: {})",
        session.name, session.login_id, session.user_id
    );
    Ok(())
}
