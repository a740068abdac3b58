//! HTTP client for the anti-fraud monitoring API

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client as HttpClient;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use super::models::{
    Account, AccountsResponse, ApiMessage, Client, ClientDetails, ClientsResponse,
    CreateTransactionRequest, CreateTransactionResponse, PatternPoint, PatternsResponse, Stats,
    SubmitOutcome, Transaction, TransactionDetail, TransactionDetailResponse,
    TransactionsResponse,
};

/// Typed errors for API operations
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server error ({0}): {1}")]
    ServerError(u16, String),
    #[error("unexpected status ({0}): {1}")]
    HttpError(u16, String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Monitoring API client
pub struct ApiClient {
    http_client: HttpClient,
    base_url: String,
}

impl ApiClient {
    const DEFAULT_BASE_URL: &'static str = "http://localhost:5000";

    /// Create a new client against the default backend address
    pub fn new(request_timeout: Duration) -> Result<Self, ApiError> {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string(), request_timeout)
    }

    /// Create a new client with a custom base URL
    pub fn with_base_url(base_url: String, request_timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(request_timeout)
            .default_headers(Self::create_headers())
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ApiMessage>(&body_text)
            .ok()
            .and_then(|m| m.error)
            .unwrap_or(body_text);

        match status_code {
            400 => ApiError::BadRequest(message),
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            500..=599 => {
                log::warn!("Server error {}: {}", status_code, message);
                ApiError::ServerError(status_code, message)
            }
            _ => ApiError::HttpError(status_code, message),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.http_client.get(self.url(path)).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .http_client
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET /api/stats - dashboard counters
    pub async fn stats(&self) -> Result<Stats, ApiError> {
        self.get_json("/api/stats").await
    }

    /// GET /api/transactions - recent transactions, newest first
    pub async fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let resp: TransactionsResponse = self.get_json("/api/transactions").await?;
        Ok(resp.transactions)
    }

    /// GET /api/flagged-transactions - flagged only, by score descending
    pub async fn flagged_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let resp: TransactionsResponse = self.get_json("/api/flagged-transactions").await?;
        Ok(resp.transactions)
    }

    /// GET /api/high-risk-clients
    pub async fn high_risk_clients(&self) -> Result<Vec<Client>, ApiError> {
        let resp: ClientsResponse = self.get_json("/api/high-risk-clients").await?;
        Ok(resp.clients)
    }

    /// GET /api/accounts - active accounts for the transfer form
    pub async fn accounts(&self) -> Result<Vec<Account>, ApiError> {
        let resp: AccountsResponse = self.get_json("/api/accounts").await?;
        Ok(resp.accounts)
    }

    /// GET /api/transaction-patterns - hourly volume buckets, last 24h
    pub async fn transaction_patterns(&self) -> Result<Vec<PatternPoint>, ApiError> {
        let resp: PatternsResponse = self.get_json("/api/transaction-patterns").await?;
        Ok(resp.patterns)
    }

    /// GET /api/transaction/{id}
    pub async fn transaction_details(&self, transaction_id: i64) -> Result<TransactionDetail, ApiError> {
        let resp: TransactionDetailResponse = self
            .get_json(&format!("/api/transaction/{}", transaction_id))
            .await?;
        Ok(resp.transaction)
    }

    /// GET /api/client/{id}
    pub async fn client_details(&self, client_id: i64) -> Result<ClientDetails, ApiError> {
        self.get_json(&format!("/api/client/{}", client_id)).await
    }

    /// POST /api/create-transaction
    ///
    /// A 4xx with an `{error, reason}` body is a rejection verdict, not a
    /// transport failure, and is surfaced as `SubmitOutcome::Rejected`.
    pub async fn create_transaction(
        &self,
        request: &CreateTransactionRequest,
    ) -> Result<SubmitOutcome, ApiError> {
        let response = self
            .http_client
            .post(self.url("/api/create-transaction"))
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            let resp: CreateTransactionResponse = serde_json::from_str(&body)?;
            return Ok(SubmitOutcome::Accepted(resp));
        }

        if status.is_client_error() {
            if let Ok(msg) = serde_json::from_str::<ApiMessage>(&body) {
                if let Some(error) = msg.error {
                    return Ok(SubmitOutcome::Rejected {
                        error,
                        reason: msg.reason,
                    });
                }
            }
        }

        Err(match status.as_u16() {
            500..=599 => ApiError::ServerError(status.as_u16(), body),
            code => ApiError::HttpError(code, body),
        })
    }

    /// POST /api/flag-transaction
    pub async fn flag_transaction(
        &self,
        transaction_id: i64,
        reason: &str,
    ) -> Result<String, ApiError> {
        let body = serde_json::json!({
            "transaction_id": transaction_id,
            "reason": reason,
        });
        let resp: ApiMessage = self.post_json("/api/flag-transaction", &body).await?;
        Ok(resp
            .message
            .unwrap_or_else(|| "Транзакция помечена".to_string()))
    }

    /// POST /api/block-client
    pub async fn block_client(&self, client_id: i64, reason: &str) -> Result<String, ApiError> {
        let body = serde_json::json!({
            "client_id": client_id,
            "reason": reason,
        });
        let resp: ApiMessage = self.post_json("/api/block-client", &body).await?;
        Ok(resp.message.unwrap_or_else(|| "Клиент заблокирован".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            ApiClient::with_base_url("http://10.0.0.5:5000/".to_string(), Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.base_url(), "http://10.0.0.5:5000");
        assert_eq!(client.url("/api/stats"), "http://10.0.0.5:5000/api/stats");
    }
}
