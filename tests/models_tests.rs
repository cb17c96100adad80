// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fundclip::models::{Sip, UserFund, UserFundDetails};
use serde_json::json;

#[test]
fn fund_details_deserialize_with_backend_key_spellings() {
    let details: UserFundDetails = serde_json::from_value(json!({
        "userFundDTO": {
            "userId": "u-1",
            "fundId": 120716,
            "fundName": "Index Fund",
            "isEmergency": true,
            "tag": "core",
            "benchmark": "Nifty 100",
            "units": 412.5,
            "investmentAmount": 50000.0
        },
        "units": [
            {
                "date": "15-01-2024",
                "amount": 5000.0,
                "units": 41.25,
                "transactionType": "BUY",
                "isSold": true,
                "sellDate": "20-03-2024",
                "profitLoss": 350.0,
                "profitLossPercent": 7.0,
                "transactionId": "t-9"
            }
        ],
        "summary": {
            "name": "Index Fund",
            "fundId": 120716,
            "totalInvested": 50000.0,
            "totalValue": 56500.0,
            "totalUnits": 412.5,
            "profitLoss": 6500.0,
            "profitLossPercent": 13.0
        },
        "extraSummary": {
            "xirr": 14.2,
            "totalRealizedProfit": 1200.0,
            "currentYearTotalRealizedProfit": 300.0,
            "longTermGains": 900.0
        },
        "registeredSIPs": [
            {"id": "s-1", "fundName": "Index Fund", "fundId": 120716, "userId": "u-1", "amount": 2000.0}
        ],
        "latestNav": 137.25,
        "latestNavDate": "05-08-2026"
    }))
    .unwrap();

    let fund = details.user_fund.expect("userFundDTO");
    assert_eq!(fund.fund_id, 120716);
    assert!(fund.is_emergency);
    assert_eq!(fund.benchmark.as_deref(), Some("Nifty 100"));

    assert_eq!(details.units.len(), 1);
    let lot = &details.units[0];
    assert_eq!(lot.transaction_type.as_deref(), Some("BUY"));
    assert_eq!(lot.is_sold, Some(true));
    assert_eq!(lot.sell_date.as_deref(), Some("20-03-2024"));

    assert_eq!(details.registered_sips.len(), 1);
    assert_eq!(details.extra_summary.unwrap().xirr, Some(14.2));
    assert_eq!(details.latest_nav, Some(137.25));
}

#[test]
fn sparse_fund_details_use_defaults() {
    let details: UserFundDetails = serde_json::from_value(json!({})).unwrap();
    assert!(details.user_fund.is_none());
    assert!(details.units.is_empty());
    assert!(details.registered_sips.is_empty());
    assert!(details.latest_nav.is_none());
}

#[test]
fn user_fund_update_serializes_every_mutable_attribute() {
    // Full-overwrite contract: one changed field still ships all three.
    let fund = UserFund {
        user_id: "u-1".into(),
        fund_id: 120716,
        fund_name: "Index Fund".into(),
        is_emergency: false,
        tag: Some("retirement".into()),
        benchmark: None,
        units: None,
        investment_amount: None,
    };
    let body = serde_json::to_value(&fund).unwrap();
    assert_eq!(body["isEmergency"], json!(false));
    assert_eq!(body["tag"], json!("retirement"));
    assert_eq!(body["benchmark"], json!(null));
    assert_eq!(body["fundName"], json!("Index Fund"));
    assert!(body.get("units").is_none());
}

#[test]
fn sip_payload_uses_backend_field_names() {
    let sip = Sip {
        id: None,
        fund_name: "Index Fund".into(),
        fund_id: 120716,
        user_id: "u-1".into(),
        amount: 2000.0,
    };
    let body = serde_json::to_value(&sip).unwrap();
    assert_eq!(body["fundName"], json!("Index Fund"));
    assert_eq!(body["fundId"], json!(120716));
    assert_eq!(body["userId"], json!("u-1"));
    assert_eq!(body["amount"], json!(2000.0));
}
