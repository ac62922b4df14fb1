//! # Currency Client SDK
//!
//! A typed Rust client for the Currency API.

use std::collections::BTreeMap;

use currency_types::{
    ConvertCurrencyRequest, ConvertCurrencyResponse, CreateCurrencyRequest, CurrencyId,
    CurrencyResponse,
};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Currency API client.
pub struct CurrencyClient {
    base_url: String,
    http: Client,
}

impl CurrencyClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Lists all currencies as `"<id> - <name>"` labels.
    pub async fn list_currencies(&self) -> Result<Vec<String>, ClientError> {
        let currencies: Vec<CurrencyResponse> = self.get("/currency").await?;
        Ok(currencies.into_iter().map(|c| c.label).collect())
    }

    /// Registers a currency and returns its id.
    pub async fn create_currency(
        &self,
        name: &str,
        description: &str,
        exchanges: BTreeMap<String, Decimal>,
    ) -> Result<CurrencyId, ClientError> {
        let req = CreateCurrencyRequest {
            name: name.to_string(),
            description: description.to_string(),
            exchanges,
        };
        self.post("/currency", &req).await
    }

    /// Deletes a currency. Unknown ids succeed.
    pub async fn delete_currency(&self, id: CurrencyId) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(format!("{}/currency/{}", self.base_url, id))
            .send()
            .await?;
        check_status(resp).await.map(|_| ())
    }

    /// Converts with the stored rate.
    pub async fn convert(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<Decimal, ClientError> {
        self.conversion("/currency/convert", from, to, amount).await
    }

    /// Converts with the live quote.
    pub async fn convert_live(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<Decimal, ClientError> {
        self.conversion("/currency/api-convert", from, to, amount).await
    }

    async fn conversion(
        &self,
        path: &str,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<Decimal, ClientError> {
        let req = ConvertCurrencyRequest {
            from: from.to_string(),
            to: to.to_string(),
            amount,
        };
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(&req)
            .send()
            .await?;
        let converted: ConvertCurrencyResponse = handle_response(resp).await?;
        Ok(converted.amount)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        handle_response(resp).await
    }
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let body = check_status(resp).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Returns the body of a successful response, or the API error it carries.
async fn check_status(resp: reqwest::Response) -> Result<String, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.text().await?);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Pulls the `error` field out of an API error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| body.to_string())
}
