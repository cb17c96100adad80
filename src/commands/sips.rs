// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::models::{Sip, TransactionDraft, TransactionType};
use crate::session::SessionStore;
use crate::utils::{fmt_amount, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use chrono::Local;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub fn handle(api: &ApiClient, store: &SessionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(api, store, sub)?,
        Some(("list", sub)) => list(api, store, sub)?,
        Some(("update", sub)) => update(api, store, sub)?,
        Some(("rm", sub)) => rm(api, sub)?,
        Some(("execute", sub)) => execute(api, store, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_amount(raw: &str) -> Result<f64> {
    let amount = parse_decimal(raw.trim())?;
    if amount <= Decimal::ZERO {
        bail!("Amount must be a positive number");
    }
    Ok(amount.to_f64().unwrap_or_default())
}

fn add(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let fund_id = *sub.get_one::<i64>("fund").unwrap();
    let fund_name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    if fund_name.is_empty() {
        bail!("Fund name cannot be empty");
    }

    let sip = Sip {
        id: None,
        fund_name,
        fund_id,
        user_id: session.user_id.clone(),
        amount,
    };
    api.register_sip(&sip)?;
    println!(
        "Registered SIP of {} in '{}'",
        fmt_amount(Some(sip.amount)),
        sip.fund_name
    );
    Ok(())
}

fn list(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let sips = api.sips(&session.user_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &sips)? {
        return Ok(());
    }
    if sips.is_empty() {
        println!("No registered SIPs");
        return Ok(());
    }
    let rows = sips
        .iter()
        .map(|s| {
            vec![
                s.fund_name.clone(),
                s.fund_id.to_string(),
                fmt_amount(Some(s.amount)),
                s.id.clone().unwrap_or_default(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Fund", "Fund ID", "Amount", "SIP ID"], rows)
    );
    Ok(())
}

fn update(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let id = sub.get_one::<String>("id").unwrap().trim().to_string();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;

    // The PUT takes a whole SIPDTO, so fetch the record and change only the
    // amount.
    let sips = api.sips(&session.user_id)?;
    let mut sip = sips
        .into_iter()
        .find(|s| s.id.as_deref() == Some(id.as_str()))
        .ok_or_else(|| anyhow::anyhow!("No SIP with id {}", id))?;
    sip.amount = amount;
    api.update_sip(&id, &sip)?;
    println!(
        "SIP for '{}' updated to {}",
        sip.fund_name,
        fmt_amount(Some(sip.amount))
    );
    Ok(())
}

fn rm(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    api.delete_sip(id)?;
    println!("Deleted SIP {}", id);
    Ok(())
}

/// Builds one BUY per registered SIP for the given date and submits them as
/// a single bulk batch, mirroring the manual "register SIP transactions"
/// flow. There is no scheduler; this is the whole execution story.
fn execute(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let today = Local::now().date_naive();

    let sips = api.sips(&session.user_id)?;
    if sips.is_empty() {
        println!("No registered SIPs");
        return Ok(());
    }

    let mut batch = Vec::with_capacity(sips.len());
    for sip in &sips {
        let draft = TransactionDraft {
            fund_id: sip.fund_id,
            fund_name: sip.fund_name.clone(),
            date,
            transaction_type: TransactionType::Buy,
            amount: Decimal::from_f64_retain(sip.amount),
            units: None,
        };
        batch.push(draft.into_payload(&session.user_id, today)?);
    }

    let rows = batch
        .iter()
        .map(|tx| {
            vec![
                tx.fund_name.clone(),
                tx.date.clone(),
                fmt_amount(Some(tx.amount)),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Fund", "Date", "Amount"], rows));

    if sub.get_flag("dry-run") {
        println!("Dry run: {} transactions not submitted", batch.len());
        return Ok(());
    }
    api.add_bulk_transactions(&batch)?;
    println!("Submitted {} SIP transactions", batch.len());
    Ok(())
}
