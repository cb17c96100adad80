// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::session::SessionStore;
use crate::utils::{maybe_print_json, pretty_table, validate_name, validate_password};
use anyhow::{Result, bail};

pub fn handle(api: &ApiClient, store: &SessionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(api, sub)?,
        Some(("show", sub)) => show(api, store, sub)?,
        Some(("update", sub)) => update(api, store, sub)?,
        Some(("rm", sub)) => rm(api, store, sub)?,
        _ => {}
    }
    Ok(())
}

fn list(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let users = api.users()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &users)? {
        let rows = users
            .iter()
            .map(|u| {
                vec![
                    u.name.clone(),
                    u.login_id.clone(),
                    u.id.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Name", "Login ID", "ID"], rows));
    }
    Ok(())
}

fn show(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = match sub.get_one::<String>("id") {
        Some(id) => id.clone(),
        None => store.current()?.user_id,
    };
    let user = api.user(&id)?;
    println!(
        "{} (login id: {}, user id: {})",
        user.name,
        user.login_id,
        user.id.unwrap_or_default()
    );
    Ok(())
}

fn update(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let name = sub.get_one::<String>("name").map(|s| s.trim().to_string());
    let password = sub.get_one::<String>("password").map(|s| s.to_string());
    if name.is_none() && password.is_none() {
        bail!("Nothing to update (pass --name and/or --password)");
    }

    // The backend takes a whole UserDTO, so start from the stored profile
    // and overlay the changed fields.
    let mut user = api.user(&session.user_id)?;
    if let Some(name) = name {
        validate_name(&name)?;
        user.name = name;
    }
    if let Some(password) = password {
        validate_password(&password)?;
        user.password = Some(password);
    }
    let updated = api.update_user(&session.user_id, &user)?;

    store.save(&crate::session::Session {
        user_id: session.user_id,
        name: updated.name.clone(),
        login_id: updated.login_id,
    })?;
    println!("Profile updated for '{}'", updated.name);
    Ok(())
}

fn rm(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.load()?;
    let id = match sub.get_one::<String>("id") {
        Some(id) => id.clone(),
        None => match &session {
            Some(s) => s.user_id.clone(),
            None => bail!("Not logged in; pass --id to delete a specific user"),
        },
    };
    api.delete_user(&id)?;
    // Deleting the logged-in account invalidates the session too.
    if session.as_ref().is_some_and(|s| s.user_id == id) {
        store.clear()?;
    }
    println!("Removed user {} (funds, transactions, and SIPs cascade)", id);
    Ok(())
}
