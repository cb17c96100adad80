// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Shapes raw chart payloads from the backend into display-ready series:
//! extract the point array, resolve which keys hold date and value, sort
//! chronologically, cut to a time window, and derive headline stats.
//!
//! Date handling is fail-open throughout: a point whose date cannot be
//! parsed is kept by every window filter and compares as a tie when
//! sorting, so malformed rows are never silently dropped.

use anyhow::{Result, bail};
use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Preset chart windows. `D7`/`D15` are point-count windows over the full
/// sorted series; the rest cut by calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    D7,
    D15,
    M1,
    M6,
    Ytd,
    Y1,
    Y5,
    Max,
}

impl Window {
    pub const ALL: [Window; 8] = [
        Window::D7,
        Window::D15,
        Window::M1,
        Window::M6,
        Window::Ytd,
        Window::Y1,
        Window::Y5,
        Window::Max,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Window::D7 => "7D",
            Window::D15 => "15D",
            Window::M1 => "1M",
            Window::M6 => "6M",
            Window::Ytd => "YTD",
            Window::Y1 => "1Y",
            Window::Y5 => "5Y",
            Window::Max => "MAX",
        }
    }

    /// Number of trailing points for count-based windows.
    fn point_limit(&self) -> Option<usize> {
        match self {
            Window::D7 => Some(7),
            Window::D15 => Some(15),
            _ => None,
        }
    }

    /// Earliest date kept by date-based windows; `None` means unbounded.
    fn cutoff(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Window::D7 | Window::D15 | Window::Max => None,
            Window::M1 => Some(today - Duration::days(30)),
            Window::M6 => Some(today - Duration::days(180)),
            Window::Ytd => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            Window::Y1 => Some(today - Duration::days(365)),
            Window::Y5 => Some(today - Duration::days(5 * 365)),
        }
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Window {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "7D" => Ok(Window::D7),
            "15D" => Ok(Window::D15),
            "1M" => Ok(Window::M1),
            "6M" => Ok(Window::M6),
            "YTD" => Ok(Window::Ytd),
            "1Y" => Ok(Window::Y1),
            "5Y" => Ok(Window::Y5),
            "MAX" => Ok(Window::Max),
            other => bail!(
                "Unknown window '{}' (use 7D|15D|1M|6M|YTD|1Y|5Y|MAX)",
                other
            ),
        }
    }
}

/// Which keys of a series point hold the date and the value. Every known
/// endpoint declares its map explicitly; `detect` is the fallback for
/// payloads of unrecognized shape.
#[derive(Debug, Clone)]
pub struct FieldMap {
    pub date: String,
    pub value: String,
}

impl FieldMap {
    pub fn new(date: &str, value: &str) -> Self {
        FieldMap {
            date: date.to_string(),
            value: value.to_string(),
        }
    }

    /// Substring sniffing inherited from the original dashboard: the value
    /// key contains "nav", "value", or "price"; the date key contains
    /// "date" or "time". First match wins.
    pub fn detect(rows: &[Value]) -> Option<FieldMap> {
        let first = rows.first()?.as_object()?;
        let value = first.keys().find(|k| {
            let k = k.to_lowercase();
            k.contains("nav") || k.contains("value") || k.contains("price")
        })?;
        let date = first.keys().find(|k| {
            let k = k.to_lowercase();
            k.contains("date") || k.contains("time")
        })?;
        Some(FieldMap::new(date, value))
    }
}

static WIRE_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}-\d{2}-\d{4}$").unwrap());

/// Lenient point-date parser: strict DD-MM-YYYY first, then ISO date, then
/// the date part of an ISO datetime, then "Month YYYY" labels used by the
/// monthly performance series. `None` means unparsable, never an error.
pub fn parse_point_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if WIRE_DATE_RE.is_match(s) {
        return NaiveDate::parse_from_str(s, "%d-%m-%Y").ok();
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Some(prefix) = s.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(d);
        }
    }
    NaiveDate::parse_from_str(&format!("01 {}", s), "%d %B %Y").ok()
}

/// Pulls the point array out of a chart payload: a bare array, one of the
/// wrapper properties the backend has used over time, or the first
/// array-valued property.
pub fn extract_series(payload: &Value) -> Vec<Value> {
    if let Some(arr) = payload.as_array() {
        return arr.clone();
    }
    if let Some(obj) = payload.as_object() {
        for key in ["data", "chartData", "historicData", "navHistory"] {
            if let Some(arr) = obj.get(key).and_then(Value::as_array) {
                return arr.clone();
            }
        }
        for v in obj.values() {
            if let Some(arr) = v.as_array() {
                return arr.clone();
            }
        }
    }
    Vec::new()
}

pub fn point_date(row: &Value, map: &FieldMap) -> Option<NaiveDate> {
    row.get(&map.date)?.as_str().and_then(parse_point_date)
}

/// Numeric field of a point. Values arrive as JSON numbers or as numeric
/// strings (the upstream NAV feed serializes NAVs as strings).
pub fn value_at(row: &Value, key: &str) -> Option<f64> {
    match row.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

pub fn point_value(row: &Value, map: &FieldMap) -> Option<f64> {
    value_at(row, &map.value)
}

fn sort_by_date(rows: &mut [Value], map: &FieldMap) {
    rows.sort_by(|a, b| match (point_date(a, map), point_date(b, map)) {
        (Some(da), Some(db)) => da.cmp(&db),
        // Unparsable dates compare as ties; the stable sort keeps their
        // insertion order.
        _ => Ordering::Equal,
    });
}

/// Sorts the series ascending by date and applies the window. Count-based
/// windows take the last N points of the whole series regardless of date
/// gaps; date-based windows keep points in `[cutoff, today]`, and points
/// with unparsable dates always survive the filter.
pub fn window_series(rows: &[Value], map: &FieldMap, window: Window, today: NaiveDate) -> Vec<Value> {
    let mut sorted: Vec<Value> = rows.to_vec();
    sort_by_date(&mut sorted, map);

    if let Some(limit) = window.point_limit() {
        let skip = sorted.len().saturating_sub(limit);
        return sorted.split_off(skip);
    }

    let Some(cutoff) = window.cutoff(today) else {
        return sorted;
    };
    sorted
        .into_iter()
        .filter(|row| match point_date(row, map) {
            Some(d) => d >= cutoff && d <= today,
            None => true,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub current_value: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl SeriesStats {
    pub const ZERO: SeriesStats = SeriesStats {
        current_value: 0.0,
        change: 0.0,
        change_percent: 0.0,
    };
}

/// Headline stats over an already-windowed series: last point vs first
/// point after (re-)sorting ascending. An empty series is all zeros.
pub fn series_stats(rows: &[Value], map: &FieldMap) -> SeriesStats {
    if rows.is_empty() {
        return SeriesStats::ZERO;
    }
    let mut sorted: Vec<Value> = rows.to_vec();
    sort_by_date(&mut sorted, map);

    let current_value = sorted.last().and_then(|r| point_value(r, map)).unwrap_or(0.0);
    let first_value = sorted.first().and_then(|r| point_value(r, map)).unwrap_or(0.0);
    let change = current_value - first_value;
    let change_percent = if first_value != 0.0 {
        (change / first_value) * 100.0
    } else {
        0.0
    };
    SeriesStats {
        current_value,
        change,
        change_percent,
    }
}

pub fn series_values(rows: &[Value], map: &FieldMap) -> Vec<f64> {
    rows.iter().filter_map(|r| point_value(r, map)).collect()
}

const SPARK_BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// One-line unicode sparkline of the windowed values.
pub fn sparkline(values: &[f64]) -> String {
    if values.is_empty() {
        return String::new();
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    values
        .iter()
        .map(|v| {
            if span <= f64::EPSILON {
                SPARK_BLOCKS[3]
            } else {
                let idx = ((v - min) / span * 7.0).round() as usize;
                SPARK_BLOCKS[idx.min(7)]
            }
        })
        .collect()
}
