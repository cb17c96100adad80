// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Thin client for the tracker backend. Every call issues exactly one HTTP
//! request and unwraps the `{success, data, message}` envelope: `success`
//! resolves to the payload, anything else fails with the backend's message.
//! No retries, no backoff; failures surface immediately to the caller.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::models::{
    Dashboard, FundMatch, FundSummaryExtra, Sip, TransactionPayload, User, UserFund,
    UserFundDetails,
};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

const UA: &str = concat!(
    "fundclip/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/fundclip)"
);

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered `success: false`; the message is the only
    /// user-facing error text.
    #[error("{0}")]
    Api(String),
    /// Network or decode failure below the envelope.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn unwrap_envelope<T>(env: Envelope<T>, fallback: &str) -> Result<T, ApiError> {
    if env.success {
        env.data
            .ok_or_else(|| ApiError::Api("Empty response payload".into()))
    } else {
        Err(ApiError::Api(
            env.message.unwrap_or_else(|| fallback.to_string()),
        ))
    }
}

pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<ApiClient, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .user_agent(UA)
            .build()?;
        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        fallback: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let env: Envelope<T> = self.http.get(url).query(query).send()?.json()?;
        unwrap_envelope(env, fallback)
    }

    fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("POST {}", url);
        let env: Envelope<T> = self.http.post(url).json(body).send()?.json()?;
        unwrap_envelope(env, fallback)
    }

    fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("PUT {}", url);
        let env: Envelope<T> = self.http.put(url).query(query).json(body).send()?.json()?;
        unwrap_envelope(env, fallback)
    }

    fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        fallback: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("DELETE {}", url);
        let env: Envelope<T> = self.http.delete(url).query(query).send()?.json()?;
        unwrap_envelope(env, fallback)
    }

    // Users

    pub fn login(&self, login_id: &str, password: &str) -> Result<User, ApiError> {
        self.post(
            "/api/users/login",
            &json!({"loginId": login_id, "password": password}),
            "Login failed",
        )
    }

    pub fn users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/api/users", &[], "Failed to fetch users")
    }

    pub fn user(&self, id: &str) -> Result<User, ApiError> {
        self.get(&format!("/api/users/{}", id), &[], "Failed to fetch user")
    }

    pub fn create_user(&self, user: &User) -> Result<User, ApiError> {
        self.post("/api/users", user, "Failed to create user")
    }

    pub fn update_user(&self, id: &str, user: &User) -> Result<User, ApiError> {
        self.put(
            &format!("/api/users/{}", id),
            &[],
            user,
            "Failed to update user",
        )
    }

    pub fn delete_user(&self, id: &str) -> Result<Value, ApiError> {
        self.delete(&format!("/api/users/{}", id), &[], "Failed to delete user")
    }

    // Dashboard

    pub fn dashboard(&self, user_id: &str) -> Result<Dashboard, ApiError> {
        self.get(
            "/api/dashboard",
            &[("userId", user_id.to_string())],
            "Failed to fetch dashboard data",
        )
    }

    pub fn dashboard_extra(&self, user_id: &str) -> Result<FundSummaryExtra, ApiError> {
        self.get(
            "/api/dashboard/extra",
            &[("userId", user_id.to_string())],
            "Failed to fetch dashboard extra",
        )
    }

    pub fn search_funds(&self, search_text: &str) -> Result<Vec<FundMatch>, ApiError> {
        self.get(
            "/api/dashboard/searchFund",
            &[("searchText", search_text.to_string())],
            "Failed to search funds",
        )
    }

    pub fn quotes(&self) -> Result<Vec<String>, ApiError> {
        self.get("/api/dashboard/quotes", &[], "Failed to fetch quotes")
    }

    pub fn dashboard_performance_chart(&self, user_id: &str) -> Result<Value, ApiError> {
        self.get(
            "/api/dashboard/performanceChart",
            &[("userId", user_id.to_string())],
            "Failed to fetch dashboard historic data",
        )
    }

    // Transactions

    pub fn add_transaction(&self, tx: &TransactionPayload) -> Result<Value, ApiError> {
        self.post("/api/transaction", tx, "Failed to record transaction")
    }

    pub fn add_bulk_transactions(&self, txs: &[TransactionPayload]) -> Result<Value, ApiError> {
        self.post(
            "/api/transaction/bulk",
            &txs,
            "Failed to record transactions",
        )
    }

    pub fn delete_transaction(&self, transaction_id: &str) -> Result<Value, ApiError> {
        self.delete(
            "/api/transaction",
            &[("transactionId", transaction_id.to_string())],
            "Failed to delete transaction",
        )
    }

    // Per-fund views

    pub fn user_fund_details(
        &self,
        user_id: &str,
        fund_id: i64,
    ) -> Result<UserFundDetails, ApiError> {
        self.get(
            "/api/userFund",
            &[
                ("userId", user_id.to_string()),
                ("fundId", fund_id.to_string()),
            ],
            "Failed to fetch user fund details",
        )
    }

    pub fn update_user_fund(
        &self,
        user_id: &str,
        fund_id: i64,
        fund: &UserFund,
    ) -> Result<Value, ApiError> {
        self.put(
            "/api/userFund",
            &[
                ("userId", user_id.to_string()),
                ("fundId", fund_id.to_string()),
            ],
            fund,
            "Failed to update user fund",
        )
    }

    pub fn delete_user_fund(&self, user_id: &str, fund_id: i64) -> Result<Value, ApiError> {
        self.delete(
            "/api/userFund",
            &[
                ("userId", user_id.to_string()),
                ("fundId", fund_id.to_string()),
            ],
            "Failed to delete user fund",
        )
    }

    pub fn fund_historic_chart(&self, user_id: &str, fund_id: i64) -> Result<Value, ApiError> {
        self.get(
            "/api/userFund/historicChart",
            &[
                ("userId", user_id.to_string()),
                ("fundId", fund_id.to_string()),
            ],
            "Failed to fetch user fund historic data",
        )
    }

    pub fn fund_performance_chart(&self, user_id: &str, fund_id: i64) -> Result<Value, ApiError> {
        self.get(
            "/api/userFund/performanceChart",
            &[
                ("userId", user_id.to_string()),
                ("fundId", fund_id.to_string()),
            ],
            "Failed to fetch user fund performance data",
        )
    }

    pub fn benchmark_enums(&self) -> Result<Vec<String>, ApiError> {
        self.get(
            "/api/userFund/benchmarkEnums",
            &[],
            "Failed to fetch benchmark enums",
        )
    }

    // SIPs

    pub fn register_sip(&self, sip: &Sip) -> Result<Value, ApiError> {
        self.post("/api/sip", sip, "Failed to register SIP")
    }

    pub fn sips(&self, user_id: &str) -> Result<Vec<Sip>, ApiError> {
        self.get(
            "/api/sip",
            &[("userId", user_id.to_string())],
            "Failed to fetch SIPs",
        )
    }

    pub fn update_sip(&self, id: &str, sip: &Sip) -> Result<Value, ApiError> {
        self.put(
            "/api/sip",
            &[("id", id.to_string())],
            sip,
            "Failed to update SIP",
        )
    }

    pub fn delete_sip(&self, id: &str) -> Result<Value, ApiError> {
        self.delete("/api/sip", &[("id", id.to_string())], "Failed to delete SIP")
    }
}
