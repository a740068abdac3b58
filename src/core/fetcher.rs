//! Fetch dispatch - runs API calls on tokio tasks and reports completions
//!
//! The UI task never awaits a request. Every call is spawned, and its
//! completion arrives on an unbounded channel tagged with the sequence
//! number the scheduler issued for it, so stale responses can be fenced.

use crate::api::{
    Account, ApiClient, ApiError, Client, ClientDetails, CreateTransactionRequest, PatternPoint,
    Stats, SubmitOutcome, Transaction, TransactionDetail,
};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// What a fetch refreshes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchTarget {
    Stats,
    Patterns,
    RecentFlagged,
    Transactions,
    Flagged,
    Clients,
    Accounts,
    RecentTransactions,
    TransactionDetail,
    ClientDetail,
    Submit,
    FlagAction,
    BlockAction,
}

/// Payload of a completed fetch
#[derive(Debug, Clone)]
pub enum FetchData {
    Stats(Stats),
    Patterns(Vec<PatternPoint>),
    Transactions(Vec<Transaction>),
    Clients(Vec<Client>),
    Accounts(Vec<Account>),
    TransactionDetail(Box<TransactionDetail>),
    ClientDetails(Box<ClientDetails>),
    Submission(SubmitOutcome),
    ActionDone(String),
}

/// Fetch completion event
#[derive(Debug, Clone)]
pub enum FetchEvent {
    Loaded {
        target: FetchTarget,
        seq: u64,
        data: FetchData,
    },
    Failed {
        target: FetchTarget,
        seq: u64,
        /// Localized text for the error row/toast; the raw cause is logged
        error: String,
    },
}

/// Fetch dispatcher - owns the API client and the event channel sender
pub struct Fetcher {
    client: Arc<ApiClient>,
    event_tx: mpsc::UnboundedSender<FetchEvent>,
}

impl Fetcher {
    /// Create a new fetcher
    pub fn new(client: ApiClient) -> (Self, mpsc::UnboundedReceiver<FetchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                client: Arc::new(client),
                event_tx: tx,
            },
            rx,
        )
    }

    fn spawn<F>(&self, target: FetchTarget, seq: u64, fut: F)
    where
        F: Future<Output = Result<FetchData, ApiError>> + Send + 'static,
    {
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            match fut.await {
                Ok(data) => {
                    let _ = event_tx.send(FetchEvent::Loaded { target, seq, data });
                }
                Err(e) => {
                    log::warn!("Fetch {:?} failed: {}", target, e);
                    let _ = event_tx.send(FetchEvent::Failed {
                        target,
                        seq,
                        error: display_error(target, &e),
                    });
                }
            }
        });
    }

    /// Dispatch a list/stats fetch for a view target
    pub fn dispatch(&self, target: FetchTarget, seq: u64) {
        let client = self.client.clone();
        match target {
            FetchTarget::Stats => self.spawn(target, seq, async move {
                Ok(FetchData::Stats(client.stats().await?))
            }),
            FetchTarget::Patterns => self.spawn(target, seq, async move {
                Ok(FetchData::Patterns(client.transaction_patterns().await?))
            }),
            FetchTarget::RecentFlagged | FetchTarget::Flagged => {
                self.spawn(target, seq, async move {
                    Ok(FetchData::Transactions(client.flagged_transactions().await?))
                })
            }
            FetchTarget::Transactions | FetchTarget::RecentTransactions => {
                self.spawn(target, seq, async move {
                    Ok(FetchData::Transactions(client.transactions().await?))
                })
            }
            FetchTarget::Clients => self.spawn(target, seq, async move {
                Ok(FetchData::Clients(client.high_risk_clients().await?))
            }),
            FetchTarget::Accounts => self.spawn(target, seq, async move {
                Ok(FetchData::Accounts(client.accounts().await?))
            }),
            other => log::error!("dispatch() called with non-view target {:?}", other),
        }
    }

    /// Fetch one transaction for the detail popup
    pub fn fetch_transaction_detail(&self, transaction_id: i64, seq: u64) {
        let client = self.client.clone();
        self.spawn(FetchTarget::TransactionDetail, seq, async move {
            let detail = client.transaction_details(transaction_id).await?;
            Ok(FetchData::TransactionDetail(Box::new(detail)))
        });
    }

    /// Fetch one client bundle for the detail popup
    pub fn fetch_client_detail(&self, client_id: i64, seq: u64) {
        let client = self.client.clone();
        self.spawn(FetchTarget::ClientDetail, seq, async move {
            let details = client.client_details(client_id).await?;
            Ok(FetchData::ClientDetails(Box::new(details)))
        });
    }

    /// POST the transfer form
    pub fn submit_transaction(&self, request: CreateTransactionRequest, seq: u64) {
        let client = self.client.clone();
        log::info!(
            "Submitting transaction: {} -> {} ({})",
            request.sender_account_id,
            request.receiver_account_id,
            request.amount
        );
        self.spawn(FetchTarget::Submit, seq, async move {
            Ok(FetchData::Submission(
                client.create_transaction(&request).await?,
            ))
        });
    }

    /// POST a manual fraud flag
    pub fn flag_transaction(&self, transaction_id: i64, reason: String, seq: u64) {
        let client = self.client.clone();
        log::info!("Flagging transaction {}: {}", transaction_id, reason);
        self.spawn(FetchTarget::FlagAction, seq, async move {
            let message = client.flag_transaction(transaction_id, &reason).await?;
            Ok(FetchData::ActionDone(message))
        });
    }

    /// POST a client block
    pub fn block_client(&self, client_id: i64, reason: String, seq: u64) {
        let client = self.client.clone();
        log::info!("Blocking client {}", client_id);
        self.spawn(FetchTarget::BlockAction, seq, async move {
            let message = client.block_client(client_id, &reason).await?;
            Ok(FetchData::ActionDone(message))
        });
    }
}

/// User-facing text for a failed fetch
fn display_error(target: FetchTarget, error: &ApiError) -> String {
    match (target, error) {
        (_, ApiError::NotFound(_)) => "Запись не найдена".to_string(),
        (FetchTarget::Submit, _) => "Ошибка при выполнении транзакции".to_string(),
        (FetchTarget::FlagAction | FetchTarget::BlockAction, ApiError::BadRequest(msg)) => {
            format!("Отклонено сервером: {}", msg)
        }
        _ => "Ошибка загрузки данных".to_string(),
    }
}
