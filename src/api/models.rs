//! Response and request models for the anti-fraud monitoring API
//!
//! Field names mirror the server JSON verbatim. Numeric money/score fields
//! arrive either as JSON numbers or as decimal strings depending on the
//! backend's serializer, so they go through a lenient deserializer.

use serde::{Deserialize, Deserializer, Serialize};

/// Accepts a JSON number or a numeric string
#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrStr {
    Num(f64),
    Str(String),
}

impl NumOrStr {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            NumOrStr::Num(v) => Ok(v),
            NumOrStr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}

fn flex_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    NumOrStr::deserialize(d)?.into_f64()
}

fn flex_f64_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    match Option::<NumOrStr>::deserialize(d)? {
        Some(v) => v.into_f64().map(Some),
        None => Ok(None),
    }
}

/// Nullable risk levels collapse to 0.0, matching how the dashboard
/// treats clients without a computed risk profile.
fn flex_f64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(flex_f64_opt(d)?.unwrap_or(0.0))
}

/// GET /api/stats
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Stats {
    pub total_transactions: i64,
    pub today_transactions: i64,
    pub flagged_transactions: i64,
    pub high_risk_clients: i64,
    pub blocked_clients: i64,
}

/// One row of GET /api/transactions and /api/flagged-transactions
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    pub transaction_id: i64,
    pub transaction_date: String,
    #[serde(deserialize_with = "flex_f64")]
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub status: String,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default, deserialize_with = "flex_f64_opt")]
    pub fraud_score: Option<f64>,
    #[serde(default)]
    pub flagged_reason: Option<String>,
    #[serde(default)]
    pub sender_account: Option<String>,
    #[serde(default)]
    pub receiver_account: Option<String>,
    pub sender_first_name: String,
    pub sender_last_name: String,
    pub receiver_first_name: String,
    pub receiver_last_name: String,
}

impl Transaction {
    pub fn sender_name(&self) -> String {
        format!("{} {}", self.sender_first_name, self.sender_last_name)
    }

    pub fn receiver_name(&self) -> String {
        format!("{} {}", self.receiver_first_name, self.receiver_last_name)
    }
}

/// One row of GET /api/high-risk-clients
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Client {
    pub client_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "flex_f64_or_zero")]
    pub risk_level: f64,
    #[serde(default)]
    pub is_blocked: bool,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One row of GET /api/accounts - an active account joined with its owner
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    pub account_id: i64,
    pub account_number: String,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(deserialize_with = "flex_f64")]
    pub balance: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub client_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, deserialize_with = "flex_f64_or_zero")]
    pub risk_level: f64,
    #[serde(default)]
    pub is_blocked: bool,
}

impl Account {
    pub fn owner_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One bucket of GET /api/transaction-patterns - hourly counts, last 24h
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PatternPoint {
    pub hour: String,
    pub transaction_count: i64,
}

/// GET /api/transaction/{id} - full record with device and network context
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionDetail {
    pub transaction_id: i64,
    pub transaction_date: String,
    #[serde(deserialize_with = "flex_f64")]
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<String>,
    pub status: String,
    #[serde(default)]
    pub location_coordinates: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flex_f64_opt")]
    pub fraud_score: Option<f64>,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub flagged_reason: Option<String>,
    pub sender_account: String,
    pub receiver_account: String,
    pub sender_first_name: String,
    pub sender_last_name: String,
    #[serde(default)]
    pub sender_phone: Option<String>,
    pub receiver_first_name: String,
    pub receiver_last_name: String,
    #[serde(default)]
    pub receiver_phone: Option<String>,
    #[serde(default)]
    pub device_fingerprint: Option<String>,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// GET /api/client/{id} - profile plus accounts and recent outgoing transfers
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientDetails {
    pub client: ClientProfile,
    #[serde(default)]
    pub accounts: Vec<ClientAccount>,
    #[serde(default)]
    pub transactions: Vec<OutgoingTransaction>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientProfile {
    pub client_id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub registration_date: Option<String>,
    #[serde(default)]
    pub kyc_status: Option<String>,
    #[serde(default, deserialize_with = "flex_f64_or_zero")]
    pub risk_level: f64,
    #[serde(default)]
    pub is_blocked: bool,
}

impl ClientProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientAccount {
    pub account_id: i64,
    pub account_number: String,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(deserialize_with = "flex_f64")]
    pub balance: f64,
    #[serde(default)]
    pub opening_date: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutgoingTransaction {
    pub transaction_id: i64,
    pub transaction_date: String,
    #[serde(deserialize_with = "flex_f64")]
    pub amount: f64,
    pub status: String,
    #[serde(default, deserialize_with = "flex_f64_opt")]
    pub fraud_score: Option<f64>,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub receiver_account: Option<String>,
    pub receiver_first_name: String,
    pub receiver_last_name: String,
}

// Envelope types - the API wraps every list in a keyed object.

#[derive(Debug, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Deserialize)]
pub struct ClientsResponse {
    pub clients: Vec<Client>,
}

#[derive(Debug, Deserialize)]
pub struct AccountsResponse {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Deserialize)]
pub struct PatternsResponse {
    pub patterns: Vec<PatternPoint>,
}

#[derive(Debug, Deserialize)]
pub struct TransactionDetailResponse {
    pub transaction: TransactionDetail,
}

/// POST /api/create-transaction request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTransactionRequest {
    pub sender_account_id: i64,
    pub receiver_account_id: i64,
    pub amount: f64,
    pub description: String,
}

/// Fraud engine verdict attached to a created transaction
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FraudCheck {
    #[serde(deserialize_with = "flex_f64")]
    pub score: f64,
    #[serde(default)]
    pub is_flagged: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub flags: Vec<String>,
}

/// Successful POST /api/create-transaction response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateTransactionResponse {
    #[serde(default)]
    pub success: bool,
    pub transaction_id: i64,
    #[serde(default)]
    pub transaction_date: Option<String>,
    pub status: String,
    pub message: String,
    pub fraud_check: FraudCheck,
}

/// Outcome of a transaction submission: the server either accepted it
/// (possibly flagged or blocked by the fraud engine) or rejected it with
/// an error body before any transaction was created.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Accepted(CreateTransactionResponse),
    Rejected {
        error: String,
        reason: Option<String>,
    },
}

/// Generic `{success, message}` / `{error, reason}` body used by the
/// flag-transaction and block-client actions and by error responses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}
