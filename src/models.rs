// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::{ensure_not_future, wire_date};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub login_id: String,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundMatch {
    pub scheme_code: i64,
    pub scheme_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
    Dividend,
    Swp,
    Stp,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
            TransactionType::Dividend => "DIVIDEND",
            TransactionType::Swp => "SWP",
            TransactionType::Stp => "STP",
        };
        f.write_str(s)
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(TransactionType::Buy),
            "SELL" => Ok(TransactionType::Sell),
            "DIVIDEND" => Ok(TransactionType::Dividend),
            "SWP" => Ok(TransactionType::Swp),
            "STP" => Ok(TransactionType::Stp),
            other => bail!(
                "Unknown transaction type '{}' (use BUY|SELL|DIVIDEND|SWP|STP)",
                other
            ),
        }
    }
}

/// Wire payload for POST /api/transaction and /api/transaction/bulk.
/// The trailing fields are backend-computed and only ever read back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    #[serde(default)]
    pub id: Option<String>,
    pub fund_name: String,
    pub fund_id: i64,
    pub amount: f64,
    pub date: String,
    pub user_id: String,
    pub transaction_type: TransactionType,
    pub units: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_redeemed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sell_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked_profit: Option<f64>,
}

/// A transaction as entered on the command line, before it is validated and
/// shaped for the wire.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub fund_id: i64,
    pub fund_name: String,
    pub date: NaiveDate,
    pub transaction_type: TransactionType,
    pub amount: Option<Decimal>,
    pub units: Option<Decimal>,
}

impl TransactionDraft {
    /// Client-side validation mirrors the recording form: the date must not
    /// be in the future, a BUY needs a positive amount, a SELL needs
    /// positive units. The unused quantity goes on the wire as 0.
    pub fn into_payload(self, user_id: &str, today: NaiveDate) -> Result<TransactionPayload> {
        ensure_not_future(self.date, today)?;
        if self.fund_name.trim().is_empty() {
            bail!("Fund name cannot be empty");
        }

        let amount = self.amount.unwrap_or(Decimal::ZERO);
        let units = self.units.unwrap_or(Decimal::ZERO);
        match self.transaction_type {
            TransactionType::Buy => {
                if amount <= Decimal::ZERO {
                    bail!("Amount is required and must be greater than 0");
                }
            }
            TransactionType::Sell => {
                if units <= Decimal::ZERO {
                    bail!("Units are required and must be greater than 0");
                }
            }
            _ => {
                if amount <= Decimal::ZERO && units <= Decimal::ZERO {
                    bail!("Either amount or units must be greater than 0");
                }
            }
        }

        Ok(TransactionPayload {
            id: None,
            fund_name: self.fund_name,
            fund_id: self.fund_id,
            amount: amount.to_f64().unwrap_or_default(),
            date: wire_date(self.date),
            user_id: user_id.to_string(),
            transaction_type: self.transaction_type,
            units: units.to_f64().unwrap_or_default(),
            is_redeemed: None,
            sell_date: None,
            price: None,
            booked_profit: None,
        })
    }
}

/// A BUY lot reconciled against later sales, rendered read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitLot {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub units: Option<f64>,
    #[serde(default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub is_sold: Option<bool>,
    #[serde(default)]
    pub sell_date: Option<String>,
    #[serde(default)]
    pub profit_loss: Option<f64>,
    #[serde(default)]
    pub profit_loss_percent: Option<f64>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sip {
    #[serde(default)]
    pub id: Option<String>,
    pub fund_name: String,
    pub fund_id: i64,
    pub user_id: String,
    pub amount: f64,
}

/// Full-overwrite update payload for PUT /api/userFund: every edit sends all
/// three mutable attributes, merged from the freshly loaded fund.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFund {
    pub user_id: String,
    pub fund_id: i64,
    pub fund_name: String,
    #[serde(default)]
    pub is_emergency: bool,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub benchmark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSummary {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fund_id: Option<i64>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub is_emergency: Option<bool>,
    #[serde(default)]
    pub total_invested: Option<f64>,
    #[serde(default)]
    pub total_value: Option<f64>,
    #[serde(default)]
    pub total_units: Option<f64>,
    #[serde(default)]
    pub profit_loss: Option<f64>,
    #[serde(default)]
    pub profit_loss_percent: Option<f64>,
    #[serde(default)]
    pub today_profit: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundSummaryExtra {
    #[serde(default)]
    pub xirr: Option<f64>,
    #[serde(default)]
    pub total_realized_profit: Option<f64>,
    #[serde(default)]
    pub current_year_total_realized_profit: Option<f64>,
    #[serde(default)]
    pub long_term_gains: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    #[serde(default, rename = "userID")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub fund_summaries: Vec<FundSummary>,
    #[serde(default)]
    pub total_invested: Option<f64>,
    #[serde(default)]
    pub total_value: Option<f64>,
    #[serde(default)]
    pub profit_loss: Option<f64>,
    #[serde(default)]
    pub profit_loss_percent: Option<f64>,
    #[serde(default)]
    pub total_emergency_fund_value: Option<f64>,
    #[serde(default)]
    pub today_profit: Option<f64>,
    #[serde(default)]
    pub today_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFundDetails {
    #[serde(default, rename = "userFundDTO")]
    pub user_fund: Option<UserFund>,
    #[serde(default)]
    pub units: Vec<UnitLot>,
    #[serde(default)]
    pub summary: Option<FundSummary>,
    #[serde(default)]
    pub extra_summary: Option<FundSummaryExtra>,
    #[serde(default, rename = "registeredSIPs")]
    pub registered_sips: Vec<Sip>,
    #[serde(default)]
    pub latest_nav: Option<f64>,
    #[serde(default)]
    pub latest_nav_date: Option<String>,
}
