//! Node HTTP API access

pub mod client;
pub mod types;

pub use client::{ApiError, HttpNodeApi, NodeApi};
pub use types::{
    BlockSummary, SendOutcome, SendRequest, StatsSnapshot, TransactionSummary, WalletInfo,
};
