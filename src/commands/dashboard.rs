// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::session::SessionStore;
use crate::timeseries::{
    FieldMap, Window, extract_series, series_stats, series_values, sparkline, value_at,
    window_series,
};
use crate::utils::{fmt_amount, fmt_percent, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::{Datelike, Local};

pub fn handle(api: &ApiClient, store: &SessionStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(api, store, sub)?,
        Some(("chart", sub)) => chart(api, store, sub)?,
        Some(("quote", sub)) => quote(api, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let dash = api.dashboard(&session.user_id)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &dash)? {
        return Ok(());
    }

    println!(
        "Portfolio of {}",
        dash.user_name.as_deref().unwrap_or(&session.name)
    );
    println!(
        "Invested {}  Value {}  P/L {} ({})  Emergency {}",
        fmt_amount(dash.total_invested),
        fmt_amount(dash.total_value),
        fmt_amount(dash.profit_loss),
        fmt_percent(dash.profit_loss_percent),
        fmt_amount(dash.total_emergency_fund_value),
    );
    if let Some(message) = &dash.today_message {
        println!("Today: {}", message);
    } else if dash.today_profit.is_some() {
        println!("Today: {}", fmt_amount(dash.today_profit));
    }

    if dash.fund_summaries.is_empty() {
        println!("No funds yet. Record a transaction to get started.");
    } else {
        let rows = dash
            .fund_summaries
            .iter()
            .map(|f| {
                vec![
                    f.name.clone().unwrap_or_default(),
                    f.fund_id.map(|id| id.to_string()).unwrap_or_default(),
                    f.tag.clone().unwrap_or_default(),
                    if f.is_emergency.unwrap_or(false) {
                        "yes".into()
                    } else {
                        String::new()
                    },
                    fmt_amount(f.total_invested),
                    fmt_amount(f.total_value),
                    fmt_amount(f.profit_loss),
                    fmt_percent(f.profit_loss_percent),
                    fmt_amount(f.today_profit),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Fund",
                    "ID",
                    "Tag",
                    "Emergency",
                    "Invested",
                    "Value",
                    "P/L",
                    "P/L %",
                    "Today"
                ],
                rows,
            )
        );
    }

    if sub.get_flag("extra") {
        let extra = api.dashboard_extra(&session.user_id)?;
        println!(
            "XIRR {}  Realized {}  Realized ({}) {}  Long-term gains {}",
            fmt_percent(extra.xirr),
            fmt_amount(extra.total_realized_profit),
            Local::now().year(),
            fmt_amount(extra.current_year_total_realized_profit),
            fmt_amount(extra.long_term_gains),
        );
    }
    Ok(())
}

fn chart(api: &ApiClient, store: &SessionStore, sub: &clap::ArgMatches) -> Result<()> {
    let session = store.current()?;
    let window: Window = sub.get_one::<String>("window").unwrap().parse()?;
    let payload = api.dashboard_performance_chart(&session.user_id)?;
    let rows = extract_series(&payload);
    // The monthly series is keyed by a "July 2025"-style label.
    let map = FieldMap::new("month", "totalValue");
    let today = Local::now().date_naive();
    let windowed = window_series(&rows, &map, window, today);

    if windowed.is_empty() {
        println!("No performance history available");
        return Ok(());
    }

    let stats = series_stats(&windowed, &map);
    println!(
        "Portfolio value ({}): {}  change {} ({})",
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
                fmt_amount(value_at(r, "totalProfit")),
                fmt_percent(value_at(r, "growthPercent")),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Invested", "Value", "Profit", "Growth %"], table_rows)
    );
    Ok(())
}

fn quote(api: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let quotes = api.quotes()?;
    if quotes.is_empty() {
        return Ok(());
    }
    if sub.get_flag("all") {
        for q in &quotes {
            println!("{}", q);
        }
    } else {
        // One per day instead of the web UI's rotation timer.
        let idx = Local::now().date_naive().ordinal0() as usize % quotes.len();
        println!("{}", quotes[idx]);
    }
    Ok(())
}
