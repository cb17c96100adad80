// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fundclip::timeseries::{
    FieldMap, SeriesStats, Window, extract_series, parse_point_date, series_stats, window_series,
};
use serde_json::{Value, json};

fn nav_map() -> FieldMap {
    FieldMap::new("date", "nav")
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn shuffled_year_of_points() -> Vec<Value> {
    // Deliberately out of order: windowing must sort before cutting.
    let days = [200, 3, 150, 17, 90, 310, 45, 260, 1, 120];
    days.iter()
        .map(|d| {
            let date = day(2025, 1, 1) + chrono::Duration::days(*d as i64 - 1);
            json!({
                "date": date.format("%d-%m-%Y").to_string(),
                "nav": *d as f64,
            })
        })
        .collect()
}

#[test]
fn windowed_series_is_non_decreasing_by_date() {
    let rows = shuffled_year_of_points();
    let today = day(2025, 12, 31);
    for window in Window::ALL {
        let out = window_series(&rows, &nav_map(), window, today);
        let dates: Vec<NaiveDate> = out
            .iter()
            .filter_map(|r| r["date"].as_str().and_then(parse_point_date))
            .collect();
        for pair in dates.windows(2) {
            assert!(
                pair[0] <= pair[1],
                "window {} produced out-of-order dates",
                window
            );
        }
    }
}

#[test]
fn count_windows_bound_output_length() {
    let rows = shuffled_year_of_points();
    let today = day(2025, 12, 31);
    assert!(window_series(&rows, &nav_map(), Window::D7, today).len() <= 7);
    assert!(window_series(&rows, &nav_map(), Window::D15, today).len() <= 15);

    let three: Vec<Value> = rows.iter().take(3).cloned().collect();
    assert_eq!(window_series(&three, &nav_map(), Window::D7, today).len(), 3);
    assert_eq!(window_series(&three, &nav_map(), Window::D15, today).len(), 3);
}

#[test]
fn count_windows_ignore_date_gaps() {
    // Seven points spread over five years; 7D still returns all of them.
    let rows: Vec<Value> = (2019..=2025)
        .map(|y| json!({"date": format!("01-06-{}", y), "nav": y as f64}))
        .collect();
    let out = window_series(&rows, &nav_map(), Window::D7, day(2025, 12, 31));
    assert_eq!(out.len(), 7);
    assert_eq!(out[0]["nav"], json!(2019.0));
}

#[test]
fn ytd_window_is_bounded_by_jan_first_and_today() {
    let rows = vec![
        json!({"date": "31-12-2024", "nav": 1.0}),
        json!({"date": "01-01-2025", "nav": 2.0}),
        json!({"date": "15-03-2025", "nav": 3.0}),
        json!({"date": "01-07-2025", "nav": 4.0}),
    ];
    let today = day(2025, 6, 30);
    let out = window_series(&rows, &nav_map(), Window::Ytd, today);
    let jan1 = day(2025, 1, 1);
    for r in &out {
        let d = r["date"].as_str().and_then(parse_point_date).unwrap();
        assert!(d >= jan1 && d <= today);
    }
    let navs: Vec<f64> = out.iter().filter_map(|r| r["nav"].as_f64()).collect();
    assert_eq!(navs, vec![2.0, 3.0]);
}

#[test]
fn unparsable_dates_are_kept_not_dropped() {
    let rows = vec![
        json!({"date": "??", "nav": 99.0}),
        json!({"date": "01-01-2015", "nav": 1.0}),
    ];
    let today = day(2025, 6, 30);
    for window in [Window::M1, Window::M6, Window::Ytd, Window::Y1, Window::Y5] {
        let out = window_series(&rows, &nav_map(), window, today);
        assert!(
            out.iter().any(|r| r["nav"] == json!(99.0)),
            "window {} dropped the unparsable row",
            window
        );
        assert!(!out.iter().any(|r| r["nav"] == json!(1.0)));
    }
}

#[test]
fn stats_come_from_first_and_last_windowed_points() {
    let rows = vec![
        json!({"date": "03-01-2025", "nav": 120.0}),
        json!({"date": "01-01-2025", "nav": 100.0}),
        json!({"date": "02-01-2025", "nav": 90.0}),
    ];
    let stats = series_stats(&rows, &nav_map());
    assert_eq!(stats.current_value, 120.0);
    assert_eq!(stats.change, 20.0);
    assert!((stats.change_percent - 20.0).abs() < 1e-9);
}

#[test]
fn empty_series_yields_zero_stats() {
    let stats = series_stats(&[], &nav_map());
    assert_eq!(stats, SeriesStats::ZERO);
}

#[test]
fn string_navs_are_numeric() {
    // The upstream NAV feed serializes values as strings.
    let rows = vec![
        json!({"date": "01-01-2025", "nav": "100.25"}),
        json!({"date": "02-01-2025", "nav": "101.75"}),
    ];
    let stats = series_stats(&rows, &nav_map());
    assert_eq!(stats.current_value, 101.75);
    assert_eq!(stats.change, 1.5);
}

#[test]
fn window_labels_parse_round_trip() {
    for window in Window::ALL {
        let parsed: Window = window.label().parse().unwrap();
        assert_eq!(parsed, window);
    }
    assert!("2W".parse::<Window>().is_err());
}

#[test]
fn series_extraction_understands_known_wrappers() {
    let arr = json!([{"date": "01-01-2025", "nav": 1.0}]);
    assert_eq!(extract_series(&arr).len(), 1);

    for key in ["data", "chartData", "historicData", "navHistory"] {
        let wrapped = json!({key: [{"date": "01-01-2025", "nav": 1.0}]});
        assert_eq!(extract_series(&wrapped).len(), 1, "wrapper {}", key);
    }
}
