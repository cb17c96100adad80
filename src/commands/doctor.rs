// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::session::SessionStore;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle(api: &ApiClient, store: &SessionStore) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Backend reachability (quotes is the cheapest unauthenticated call)
    if let Err(e) = api.quotes() {
        rows.push(vec![
            "backend_unreachable".into(),
            format!("{} ({})", api.base_url(), e),
        ]);
    }

    // 2) Session sanity: the stored user must still exist server-side
    match store.load()? {
        None => {
            rows.push(vec![
                "no_session".into(),
                "run 'fundclip login' to record transactions".into(),
            ]);
        }
        Some(session) => {
            if let Err(e) = api.user(&session.user_id) {
                rows.push(vec![
                    "stale_session".into(),
                    format!("user {} not resolvable: {}", session.user_id, e),
                ]);
            }
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
