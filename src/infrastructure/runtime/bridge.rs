//! Runtime bridge - connects the sync TUI thread with the async Tokio runtime
//!
//! The TUI thread pushes commands and drains events through non-blocking
//! channel ends; the worker thread owns its own Tokio runtime and all
//! network activity.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::infrastructure::api::{
    BlockSummary, HttpNodeApi, NodeApi, SendOutcome, SendRequest, StatsSnapshot,
    TransactionSummary, WalletInfo,
};
use crate::infrastructure::runtime::worker::run_worker;

/// Poll cadence and request shaping for the worker.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub api_url: String,
    pub stats_interval: Duration,
    pub blocks_interval: Duration,
    pub wallet_interval: Duration,
    pub blocks_limit: usize,
    pub request_timeout: Duration,
    /// Whether the node exposes `/api/transactions`. Off by default; while
    /// off the transactions panel shows the static demo list instead.
    pub poll_transactions: bool,
}

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Re-fire every feed immediately
    Refresh,
    /// Submit a wallet send transaction
    Send { request: SendRequest },
    /// Query the search endpoint
    Search { query: String },
    /// Shutdown the worker; in-flight responses are discarded
    Shutdown,
}

/// Events sent from the async worker to the TUI. Each feed event carries its
/// tick sequence so the receiving side can refuse regressions.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    Stats {
        seq: u64,
        result: Result<StatsSnapshot, String>,
    },
    Blocks {
        seq: u64,
        result: Result<Vec<BlockSummary>, String>,
    },
    Transactions {
        seq: u64,
        result: Result<Vec<TransactionSummary>, String>,
    },
    Wallet {
        seq: u64,
        result: Result<Option<WalletInfo>, String>,
    },
    SendFinished {
        outcome: Result<SendOutcome, String>,
    },
    SearchReady {
        query: String,
        result: Result<serde_json::Value, String>,
    },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: Sender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Spawn the worker against the node's HTTP API.
    pub fn new(config: PollConfig) -> anyhow::Result<Self> {
        let api = HttpNodeApi::new(config.api_url.clone(), config.request_timeout)?;
        Ok(Self::with_api(Arc::new(api), config))
    }

    /// Spawn the worker against an arbitrary [`NodeApi`] implementation.
    pub fn with_api(api: Arc<dyn NodeApi>, config: PollConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        thread::spawn(move || {
            let rt = Runtime::new().expect("Failed to create Tokio runtime");
            rt.block_on(run_worker(api, config, cmd_rx, evt_tx));
        });

        Self { cmd_tx, evt_rx }
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
