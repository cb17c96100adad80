// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiClient, ApiError};
use crate::models::{TransactionDraft, TransactionPayload, TransactionType};
use crate::session::SessionStore;
use crate::utils::{parse_date, parse_decimal};
use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use csv::ReaderBuilder;
use serde_json::json;

pub fn handle(api: &ApiClient, store: &SessionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(api, store, sub)?,
        Some(("rm", sub)) => rm(api, store, sub)?,
        Some(("import", sub)) => import(api, store, sub)?,
        Some(("export", sub)) => export(api, store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let fund_id = *sub.get_one::<i64>("fund").unwrap();
    let fund_name = sub.get_one::<String>("name").unwrap().trim().to_string();
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let transaction_type: TransactionType = sub.get_one::<String>("type").unwrap().parse()?;
    let amount = sub
        .get_one::<String>("amount")
        .map(|s| parse_decimal(s.trim()))
        .transpose()?;
    let units = sub
        .get_one::<String>("units")
        .map(|s| parse_decimal(s.trim()))
        .transpose()?;

    let draft = TransactionDraft {
        fund_id,
        fund_name,
        date,
        transaction_type,
        amount,
        units,
    };
    let payload = draft.into_payload(&session.user_id, Local::now().date_naive())?;
    api.add_transaction(&payload)?;
    println!(
        "Recorded {} in '{}' on {} (amount {}, units {})",
        payload.transaction_type, payload.fund_name, payload.date, payload.amount, payload.units
    );
    Ok(())
}

fn rm(api: &ApiClient, _store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    match api.delete_transaction(id) {
        Ok(_) => {
            println!("Deleted transaction {}", id);
            Ok(())
        }
        // A redeemed buy is a known business rejection with its own hint,
        // not a generic failure.
        Err(ApiError::Api(message)) if message.contains("Redeemed") => {
            bail!(
                "{}\nHint: delete the sell that consumed this buy first, then retry",
                message
            )
        }
        Err(e) => Err(e.into()),
    }
}

/// Reads a CSV of `date,type,fund_id,fund_name,amount,units` rows into wire
/// payloads. Every row is validated before anything is submitted; one bad
/// row aborts the whole batch.
pub fn read_batch(path: &str, user_id: &str, today: NaiveDate) -> Result<Vec<TransactionPayload>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))?;

    let mut batch = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 2; // 1-based, after the header
        let rec = result?;
        let date_raw = rec.get(0).context("date missing")?.trim().to_string();
        let type_raw = rec.get(1).context("transaction type missing")?.trim();
        let fund_id_raw = rec.get(2).context("fund id missing")?.trim();
        let fund_name = rec.get(3).context("fund name missing")?.trim().to_string();
        let amount_raw = rec.get(4).unwrap_or("").trim();
        let units_raw = rec.get(5).unwrap_or("").trim();

        let date = parse_date(&date_raw).with_context(|| format!("Row {}", row))?;
        let transaction_type: TransactionType =
            type_raw.parse().with_context(|| format!("Row {}", row))?;
        let fund_id: i64 = fund_id_raw
            .parse()
            .with_context(|| format!("Row {}: invalid fund id '{}'", row, fund_id_raw))?;
        let amount = if amount_raw.is_empty() {
            None
        } else {
            Some(parse_decimal(amount_raw).with_context(|| format!("Row {}", row))?)
        };
        let units = if units_raw.is_empty() {
            None
        } else {
            Some(parse_decimal(units_raw).with_context(|| format!("Row {}", row))?)
        };

        let draft = TransactionDraft {
            fund_id,
            fund_name,
            date,
            transaction_type,
            amount,
            units,
        };
        let payload = draft
            .into_payload(user_id, today)
            .with_context(|| format!("Row {}", row))?;
        batch.push(payload);
    }
    Ok(batch)
}

fn import(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let path = sub.get_one::<String>("path").unwrap().trim();
    let batch = read_batch(path, &session.user_id, Local::now().date_naive())?;
    if batch.is_empty() {
        println!("Nothing to import from {}", path);
        return Ok(());
    }
    // One bulk call: the batch lands together or not at all.
    api.add_bulk_transactions(&batch)?;
    println!("Submitted {} transactions from {}", batch.len(), path);
    Ok(())
}

fn export(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let fund_id = *sub.get_one::<i64>("fund").unwrap();
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let details = api.user_fund_details(&session.user_id, fund_id)?;
    let lots = details.units;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date",
                "type",
                "amount",
                "units",
                "profitLoss",
                "profitLossPercent",
                "isSold",
                "sellDate",
                "transactionId",
            ])?;
            for lot in &lots {
                wtr.write_record([
                    lot.date.clone().unwrap_or_default(),
                    lot.transaction_type.clone().unwrap_or_default(),
                    lot.amount.map(|v| v.to_string()).unwrap_or_default(),
                    lot.units.map(|v| v.to_string()).unwrap_or_default(),
                    lot.profit_loss.map(|v| v.to_string()).unwrap_or_default(),
                    lot.profit_loss_percent
                        .map(|v| v.to_string())
                        .unwrap_or_default(),
                    lot.is_sold.map(|v| v.to_string()).unwrap_or_default(),
                    lot.sell_date.clone().unwrap_or_default(),
                    lot.transaction_id.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<serde_json::Value> = lots
                .iter()
                .map(|lot| {
                    json!({
                        "date": lot.date,
                        "type": lot.transaction_type,
                        "amount": lot.amount,
                        "units": lot.units,
                        "profitLoss": lot.profit_loss,
                        "profitLossPercent": lot.profit_loss_percent,
                        "isSold": lot.is_sold,
                        "sellDate": lot.sell_date,
                        "transactionId": lot.transaction_id,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} unit lots to {}", lots.len(), out);
    Ok(())
}
