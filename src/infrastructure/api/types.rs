//! Wire models for the node's JSON API

use serde::{Deserialize, Serialize};

/// Node-wide counters from `GET /api/stats`. Replaced wholesale every poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub height: u64,
    pub mempool_size: u64,
}

/// One entry of the newest-first sequence from `GET /api/blocks?limit=N`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    pub hash: String,
    pub height: u64,
    /// Unix seconds.
    pub timestamp: i64,
    pub miner: String,
    pub tx_count: u64,
}

/// One entry of `GET /api/transactions` (mempool head, newest-first).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub hash: String,
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionPage {
    pub transactions: Vec<TransactionSummary>,
    #[allow(dead_code)]
    pub total: u64,
}

/// The node's wallet from `GET /api/wallet`. At most one per node; a 404
/// from the endpoint means "no wallet configured" and is not an error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    pub address: String,
    pub balance: f64,
}

/// Body of `POST /api/wallet/send`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRequest {
    pub to: String,
    pub amount: f64,
    pub fee: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SendResponse {
    pub success: bool,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Outcome of a send as reported by the backend. A rejection is application
/// data carrying the server's reason, not a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Accepted { tx_hash: String },
    Rejected { reason: String },
}

impl From<SendResponse> for SendOutcome {
    fn from(resp: SendResponse) -> Self {
        if resp.success {
            SendOutcome::Accepted {
                tx_hash: resp.tx_hash.unwrap_or_default(),
            }
        } else {
            SendOutcome::Rejected {
                reason: resp
                    .error
                    .unwrap_or_else(|| "rejected by node".to_string()),
            }
        }
    }
}
