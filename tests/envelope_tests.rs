// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fundclip::api::{ApiError, Envelope, unwrap_envelope};
use fundclip::models::Dashboard;
use serde_json::{Value, json};

fn parse<T: serde::de::DeserializeOwned>(v: Value) -> Envelope<T> {
    serde_json::from_value(v).unwrap()
}

#[test]
fn success_envelope_resolves_to_data() {
    let env: Envelope<Value> = parse(json!({
        "success": true,
        "data": {"hello": "world"},
        "message": "Success"
    }));
    let data = unwrap_envelope(env, "fallback").unwrap();
    assert_eq!(data, json!({"hello": "world"}));
}

#[test]
fn failure_envelope_surfaces_backend_message() {
    let env: Envelope<Value> = parse(json!({
        "success": false,
        "data": null,
        "message": "Redeemed Transaction cannot be deleted because it is already redeemed"
    }));
    let err = unwrap_envelope(env, "Failed to delete transaction").unwrap_err();
    match err {
        ApiError::Api(message) => assert_eq!(
            message,
            "Redeemed Transaction cannot be deleted because it is already redeemed"
        ),
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[test]
fn failure_without_message_uses_fallback() {
    let env: Envelope<Value> = parse(json!({"success": false}));
    let err = unwrap_envelope(env, "Failed to fetch dashboard data").unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch dashboard data");
}

#[test]
fn typed_payloads_deserialize_through_the_envelope() {
    let env: Envelope<Dashboard> = parse(json!({
        "success": true,
        "data": {
            "userID": "u-1",
            "userName": "Asha",
            "fundSummaries": [
                {
                    "name": "Index Fund",
                    "fundId": 120716,
                    "tag": "core",
                    "isEmergency": false,
                    "totalInvested": 50000.0,
                    "totalValue": 56500.0,
                    "totalUnits": 412.5,
                    "profitLoss": 6500.0,
                    "profitLossPercent": 13.0,
                    "todayProfit": 120.0
                }
            ],
            "totalInvested": 50000.0,
            "totalValue": 56500.0,
            "profitLoss": 6500.0,
            "profitLossPercent": 13.0,
            "totalEmergencyFundValue": 0.0,
            "todayProfit": 120.0,
            "todayMessage": "Nice day: up 120.00"
        },
        "message": "Success"
    }));
    let dash = unwrap_envelope(env, "fallback").unwrap();
    assert_eq!(dash.user_id.as_deref(), Some("u-1"));
    assert_eq!(dash.fund_summaries.len(), 1);
    let fund = &dash.fund_summaries[0];
    assert_eq!(fund.fund_id, Some(120716));
    assert_eq!(fund.profit_loss_percent, Some(13.0));
    assert_eq!(dash.today_message.as_deref(), Some("Nice day: up 120.00"));
}

#[test]
fn success_with_missing_data_is_an_api_error() {
    let env: Envelope<Dashboard> = parse(json!({"success": true, "message": "Success"}));
    assert!(matches!(
        unwrap_envelope(env, "fallback"),
        Err(ApiError::Api(_))
    ));
}
