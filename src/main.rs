// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use fundclip::{api, cli, commands, config, session};

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let settings = config::Settings::load()?;
    init_tracing(&settings.log_level);

    let api = api::ApiClient::new(&settings.api_url)?;
    let store = session::SessionStore::open()?;

    match matches.subcommand() {
        Some(("signup", sub)) => commands::auth::signup(&api, sub)?,
        Some(("login", sub)) => commands::auth::login(&api, &store, sub)?,
        Some(("logout", _)) => commands::auth::logout(&store)?,
        Some(("whoami", _)) => commands::auth::whoami(&store)?,
        Some(("user", sub)) => commands::users::handle(&api, &store, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&api, &store, sub)?,
        Some(("fund", sub)) => commands::funds::handle(&api, &store, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&api, &store, sub)?,
        Some(("sip", sub)) => commands::sips::handle(&api, &store, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&api, &store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
