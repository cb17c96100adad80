// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::models::UserFund;
use crate::session::SessionStore;
use crate::timeseries::{
    FieldMap, Window, extract_series, point_value, series_stats, series_values, sparkline,
    value_at, window_series,
};
use crate::utils::{fmt_amount, fmt_percent, fmt_units, maybe_print_json, pretty_table};
use anyhow::{Context, Result, bail};
use chrono::Local;
use serde_json::Value;

pub fn handle(api: &ApiClient, store: &SessionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("search", sub)) => search(api, sub)?,
        Some(("show", sub)) => show(api, store, sub)?,
        Some(("nav", sub)) => nav(api, store, sub)?,
        Some(("chart", sub)) => chart(api, store, sub)?,
        Some(("set-tag", sub)) => set_tag(api, store, sub)?,
        Some(("set-emergency", sub)) => set_emergency(api, store, sub)?,
        Some(("set-benchmark", sub)) => set_benchmark(api, store, sub)?,
        Some(("benchmarks", _)) => benchmarks(api)?,
        Some(("rm", sub)) => rm(api, store, sub)?,
        _ => {}
    }
    Ok(())
}

fn search(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let text = sub.get_one::<String>("TEXT").unwrap().trim();
    let matches = api.search_funds(text)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &matches)? {
        return Ok(());
    }
    if matches.is_empty() {
        println!("No funds matched '{}'", text);
        return Ok(());
    }
    let rows = matches
        .iter()
        .map(|f| vec![f.scheme_code.to_string(), f.scheme_name.clone()])
        .collect();
    println!("{}", pretty_table(&["Scheme Code", "Scheme Name"], rows));
    Ok(())
}

fn show(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let fund_id = *sub.get_one::<i64>("fund").unwrap();
    let details = api.user_fund_details(&session.user_id, fund_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &details)? {
        return Ok(());
    }

    if let Some(fund) = &details.user_fund {
        let mut line = fund.fund_name.clone();
        if let Some(tag) = fund.tag.as_deref().filter(|t| !t.is_empty()) {
            line.push_str(&format!(" [{}]", tag));
        }
        if fund.is_emergency {
            line.push_str(" (emergency)");
        }
        println!("{} (fund id: {})", line, fund.fund_id);
        if let Some(benchmark) = fund.benchmark.as_deref() {
            println!("Benchmark: {}", benchmark);
        }
    }
    if let Some(summary) = &details.summary {
        println!(
            "Invested {}  Value {}  Units {}  P/L {} ({})",
            fmt_amount(summary.total_invested),
            fmt_amount(summary.total_value),
            fmt_units(summary.total_units),
            fmt_amount(summary.profit_loss),
            fmt_percent(summary.profit_loss_percent),
        );
    }
    if let Some(extra) = &details.extra_summary {
        println!(
            "XIRR {}  Realized {}  Realized this year {}",
            fmt_percent(extra.xirr),
            fmt_amount(extra.total_realized_profit),
            fmt_amount(extra.current_year_total_realized_profit),
        );
    }
    if let Some(nav) = details.latest_nav {
        println!(
            "Latest NAV {} on {}",
            fmt_amount(Some(nav)),
            details.latest_nav_date.as_deref().unwrap_or("-")
        );
    }

    if !details.registered_sips.is_empty() {
        let rows = details
            .registered_sips
            .iter()
            .map(|s| {
                vec![
                    s.id.clone().unwrap_or_default(),
                    fmt_amount(Some(s.amount)),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["SIP ID", "Amount"], rows));
    }

    if details.units.is_empty() {
        println!("No unit lots recorded");
    } else {
        let rows = details
            .units
            .iter()
            .map(|lot| {
                vec![
                    lot.date.clone().unwrap_or_default(),
                    lot.transaction_type.clone().unwrap_or_default(),
                    fmt_amount(lot.amount),
                    fmt_units(lot.units),
                    fmt_amount(lot.profit_loss),
                    fmt_percent(lot.profit_loss_percent),
                    if lot.is_sold.unwrap_or(false) {
                        lot.sell_date.clone().unwrap_or_else(|| "sold".into())
                    } else {
                        String::new()
                    },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Amount", "Units", "P/L", "P/L %", "Sold On"],
                rows,
            )
        );
    }
    Ok(())
}

/// Explicit field map when the payload matches the documented shape, with
/// heuristic detection kept as a fallback for anything else.
fn resolve_map(rows: &[Value], date_key: &str, value_key: &str) -> Option<FieldMap> {
    let first = rows.first()?.as_object()?;
    if first.contains_key(date_key) && first.contains_key(value_key) {
        return Some(FieldMap::new(date_key, value_key));
    }
    FieldMap::detect(rows)
}

fn nav(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let fund_id = *sub.get_one::<i64>("fund").unwrap();
    let window: Window = sub.get_one::<String>("window").unwrap().parse()?;

    let payload = api.fund_historic_chart(&session.user_id, fund_id)?;
    let rows = extract_series(&payload);
    let Some(map) = resolve_map(&rows, "date", "nav") else {
        println!("No NAV history available");
        return Ok(());
    };

    let today = Local::now().date_naive();
    let windowed = window_series(&rows, &map, window, today);
    if windowed.is_empty() {
        println!("No NAV history available");
        return Ok(());
    }

    let stats = series_stats(&windowed, &map);
    println!(
        "NAV ({}, {} points): {}  change {} ({})",
        window,
        windowed.len(),
        fmt_amount(Some(stats.current_value)),
        fmt_amount(Some(stats.change)),
        fmt_percent(Some(stats.change_percent)),
    );
    println!("{}", sparkline(&series_values(&windowed, &map)));

    if sub.get_flag("points") {
        let table_rows = windowed
            .iter()
            .map(|r| {
                vec![
                    r.get(&map.date)
                        .and_then(|v| v.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    fmt_amount(point_value(r, &map)),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "NAV"], table_rows));
    }
    Ok(())
}

fn chart(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let fund_id = *sub.get_one::<i64>("fund").unwrap();
    let window: Window = sub.get_one::<String>("window").unwrap().parse()?;

    let payload = api.fund_performance_chart(&session.user_id, fund_id)?;
    let rows = extract_series(&payload);
    let map = FieldMap::new("month", "totalValue");
    let today = Local::now().date_naive();
    let windowed = window_series(&rows, &map, window, today);
    if windowed.is_empty() {
        println!("No performance history available");
        return Ok(());
    }

    let stats = series_stats(&windowed, &map);
    println!(
        "Fund value ({}): {}  change {} ({})",
        window,
        fmt_amount(Some(stats.current_value)),
        fmt_amount(Some(stats.change)),
        fmt_percent(Some(stats.change_percent)),
    );
    println!("{}", sparkline(&series_values(&windowed, &map)));

    let table_rows = windowed
        .iter()
        .map(|r| {
            vec![
                r.get("month")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                fmt_amount(value_at(r, "totalInvested")),
                fmt_amount(value_at(r, "totalValue")),
                fmt_amount(value_at(r, "totalValueBenchmark")),
                fmt_percent(value_at(r, "growthPercent")),
                fmt_percent(value_at(r, "alphaPercent")),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Month", "Invested", "Value", "Benchmark", "Growth %", "Alpha %"],
            table_rows,
        )
    );
    Ok(())
}

/// The update endpoint overwrites the whole attribute set, so every edit
/// starts from a fresh copy of the fund and changes exactly one field.
fn load_fund(api: &ApiClient, user_id: &str, fund_id: i64) -> Result<UserFund> {
    let details = api.user_fund_details(user_id, fund_id)?;
    details
        .user_fund
        .with_context(|| format!("Fund {} is not part of your portfolio", fund_id))
}

fn print_update_result(result: &Value, fallback: &str) {
    match result.as_str() {
        Some(message) => println!("{}", message),
        None => println!("{}", fallback),
    }
}

fn set_tag(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let fund_id = *sub.get_one::<i64>("fund").unwrap();
    let tag = sub
        .get_one::<String>("tag")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let mut fund = load_fund(api, &session.user_id, fund_id)?;
    fund.tag = tag;
    let result = api.update_user_fund(&session.user_id, fund_id, &fund)?;
    print_update_result(&result, "Tag updated");
    Ok(())
}

fn set_emergency(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let fund_id = *sub.get_one::<i64>("fund").unwrap();
    let state = match sub.get_one::<String>("STATE").unwrap().to_lowercase().as_str() {
        "on" => true,
        "off" => false,
        other => bail!("Unknown state '{}' (use on|off)", other),
    };

    let mut fund = load_fund(api, &session.user_id, fund_id)?;
    fund.is_emergency = state;
    let result = api.update_user_fund(&session.user_id, fund_id, &fund)?;
    print_update_result(&result, "Emergency flag updated");
    Ok(())
}

fn set_benchmark(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let fund_id = *sub.get_one::<i64>("fund").unwrap();
    let benchmark = sub
        .get_one::<String>("benchmark")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    if let Some(name) = &benchmark {
        let valid = api.benchmark_enums()?;
        if !valid.iter().any(|v| v == name) {
            bail!(
                "Invalid benchmark value '{}'. Valid options: {}",
                name,
                valid.join(", ")
            );
        }
    }

    let mut fund = load_fund(api, &session.user_id, fund_id)?;
    fund.benchmark = benchmark;
    let result = api.update_user_fund(&session.user_id, fund_id, &fund)?;
    print_update_result(&result, "Benchmark updated");
    Ok(())
}

fn benchmarks(api: &ApiClient) -> Result<()> {
    for name in api.benchmark_enums()? {
        println!("{}", name);
    }
    Ok(())
}

fn rm(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let fund_id = *sub.get_one::<i64>("fund").unwrap();
    let result = api.delete_user_fund(&session.user_id, fund_id)?;
    print_update_result(&result, &format!("Removed fund {}", fund_id));
    Ok(())
}
