// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

/// CLI dates are entered as YYYY-MM-DD; the backend wire format is DD-MM-YYYY.
pub const WIRE_DATE_FMT: &str = "%d-%m-%Y";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn wire_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FMT).to_string()
}

pub fn parse_wire_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, WIRE_DATE_FMT)
        .with_context(|| format!("Invalid date '{}', expected DD-MM-YYYY", s))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn ensure_not_future(date: NaiveDate, today: NaiveDate) -> Result<()> {
    if date > today {
        bail!("Date cannot be in the future");
    }
    Ok(())
}

pub fn fmt_amount(v: Option<f64>) -> String {
    match v.and_then(Decimal::from_f64_retain) {
        Some(d) => format!("₹{}", d.round_dp(2)),
        None => "-".into(),
    }
}

pub fn fmt_units(v: Option<f64>) -> String {
    match v.and_then(Decimal::from_f64_retain) {
        Some(d) => format!("{}", d.round_dp(4)),
        None => "-".into(),
    }
}

pub fn fmt_percent(v: Option<f64>) -> String {
    match v.and_then(Decimal::from_f64_retain) {
        Some(d) => format!("{}%", d.round_dp(2)),
        None => "-".into(),
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

// Signup fields are checked before any request is made; thresholds and
// messages match what the backend enforces on its side.
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Name is required");
    }
    if name.trim().len() < 2 {
        bail!("Name must be at least 2 characters");
    }
    Ok(())
}

pub fn validate_login_id(login_id: &str) -> Result<()> {
    if login_id.trim().is_empty() {
        bail!("Login ID is required");
    }
    if login_id.trim().len() < 3 {
        bail!("Login ID must be at least 3 characters");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        bail!("Password is required");
    }
    if password.len() < 6 {
        bail!("Password must be at least 6 characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_date_round_trips_calendar_day() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let wire = wire_date(d);
        assert_eq!(wire, "15-01-2024");
        assert_eq!(parse_wire_date(&wire).unwrap(), d);
    }

    #[test]
    fn cli_date_rejects_wire_format() {
        assert!(parse_date("15-01-2024").is_err());
        assert!(parse_date("2024-01-15").is_ok());
    }
}
