use std::time::{Duration, Instant};

use crate::config::Config;
use crate::core::Feed;
use crate::infrastructure::api::{
    BlockSummary, SendOutcome, SendRequest, StatsSnapshot, TransactionSummary, WalletInfo,
};
use crate::infrastructure::runtime::{RuntimeCommand, RuntimeEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Prompt(PromptKind),
    Search,
}

/// Steps of the send flow. Each step is one prompt; the event loop keeps
/// running while the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Recipient,
    Amount,
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            PromptKind::Recipient => "Recipient address",
            PromptKind::Amount => "Amount (RNR)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

/// Placeholder transaction shown while no real transaction feed is
/// configured. Never mixed with live data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoTransaction {
    pub hash: String,
    pub from: String,
    pub to: String,
    pub amount: String,
}

pub fn demo_transactions() -> Vec<DemoTransaction> {
    vec![
        DemoTransaction {
            hash: "0x3f...e1".to_string(),
            from: "0xAlice...".to_string(),
            to: "0xBob...".to_string(),
            amount: "100 RNR".to_string(),
        },
        DemoTransaction {
            hash: "0xa9...b2".to_string(),
            from: "0xValidator...".to_string(),
            to: "0xPool...".to_string(),
            amount: "5000 RNR".to_string(),
        },
        DemoTransaction {
            hash: "0x7c...d9".to_string(),
            from: "0xUser1...".to_string(),
            to: "0xUser2...".to_string(),
            amount: "12.5 RNR".to_string(),
        },
    ]
}

/// Result of a search, presented as the page the query navigated to.
#[derive(Debug, Clone)]
pub struct SearchView {
    pub query: String,
    pub body: String,
}

pub struct App {
    pub stats: Feed<StatsSnapshot>,
    pub blocks: Feed<Vec<BlockSummary>>,
    /// Live only when the node exposes a transaction feed.
    pub transactions: Feed<Vec<TransactionSummary>>,
    pub wallet: Feed<Option<WalletInfo>>,
    /// Populated only when no real transaction feed is configured.
    pub demo_txs: Option<Vec<DemoTransaction>>,

    pub api_endpoint: String,
    pub unit_price_usd: f64,
    pub send_fee: f64,

    pub input_mode: InputMode,
    pub input: String,
    pub search_view: Option<SearchView>,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,

    pending_recipient: Option<String>,
    send_in_flight: bool,
    pending_commands: Vec<RuntimeCommand>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let mut stats = Feed::new();
        let mut blocks = Feed::new();
        let mut transactions = Feed::new();
        let mut wallet = Feed::new();
        stats.begin();
        blocks.begin();
        wallet.begin();
        if config.transactions_feed {
            transactions.begin();
        }

        Self {
            stats,
            blocks,
            transactions,
            wallet,
            demo_txs: (!config.transactions_feed).then(demo_transactions),
            api_endpoint: config.api_url.clone(),
            unit_price_usd: config.unit_price_usd,
            send_fee: config.send_fee,
            input_mode: InputMode::Normal,
            input: String::new(),
            search_view: None,
            status: None,
            should_quit: false,
            pending_recipient: None,
            send_in_flight: false,
            pending_commands: Vec::new(),
        }
    }

    /// Fold one worker event into view state. Stale feed events (sequence
    /// regressions) change nothing.
    pub fn apply_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::Stats { seq, result } => {
                self.stats.apply(seq, result);
            }
            RuntimeEvent::Blocks { seq, result } => {
                self.blocks.apply(seq, result);
            }
            RuntimeEvent::Transactions { seq, result } => {
                self.transactions.apply(seq, result);
            }
            RuntimeEvent::Wallet { seq, result } => {
                self.wallet.apply(seq, result);
            }
            RuntimeEvent::SendFinished { outcome } => {
                self.send_in_flight = false;
                match outcome {
                    Ok(SendOutcome::Accepted { tx_hash }) => self.set_status(
                        format!("Transaction sent! Hash: {tx_hash}"),
                        StatusLevel::Info,
                    ),
                    Ok(SendOutcome::Rejected { reason }) => {
                        self.set_status(format!("Send rejected: {reason}"), StatusLevel::Error)
                    }
                    Err(message) => {
                        self.set_status(format!("Send failed: {message}"), StatusLevel::Error)
                    }
                }
            }
            RuntimeEvent::SearchReady { query, result } => match result {
                Ok(value) => {
                    let body = serde_json::to_string_pretty(&value)
                        .unwrap_or_else(|_| value.to_string());
                    self.search_view = Some(SearchView { query, body });
                }
                Err(message) => {
                    self.set_status(format!("Search failed: {message}"), StatusLevel::Error)
                }
            },
        }
    }

    /// Commands queued by user actions, drained by the main loop into the
    /// runtime bridge.
    pub fn take_commands(&mut self) -> Vec<RuntimeCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    pub fn send_in_flight(&self) -> bool {
        self.send_in_flight
    }

    pub fn refresh(&mut self) {
        self.pending_commands.push(RuntimeCommand::Refresh);
        self.set_status("Refreshing…", StatusLevel::Info);
    }

    /// Open the send flow. Refused while a previous send is still pending.
    pub fn begin_send(&mut self) {
        if self.send_in_flight {
            self.set_status("Transaction already pending", StatusLevel::Warn);
            return;
        }
        self.pending_recipient = None;
        self.input.clear();
        self.input_mode = InputMode::Prompt(PromptKind::Recipient);
    }

    /// Advance the send flow by one prompt step. Validation happens here,
    /// before anything reaches the network.
    pub fn apply_prompt(&mut self, kind: PromptKind) {
        match kind {
            PromptKind::Recipient => {
                let recipient = self.input.trim().to_string();
                if recipient.is_empty() {
                    self.exit_prompt();
                    self.set_status("Send cancelled: recipient required", StatusLevel::Warn);
                    return;
                }
                self.pending_recipient = Some(recipient);
                self.input.clear();
                self.input_mode = InputMode::Prompt(PromptKind::Amount);
            }
            PromptKind::Amount => {
                let amount = self.input.trim().parse::<f64>().ok();
                let Some(amount) = amount.filter(|value| *value > 0.0) else {
                    self.exit_prompt();
                    self.set_status("Send cancelled: invalid amount", StatusLevel::Warn);
                    return;
                };
                let Some(to) = self.pending_recipient.take() else {
                    self.exit_prompt();
                    return;
                };
                self.pending_commands.push(RuntimeCommand::Send {
                    request: SendRequest {
                        to,
                        amount,
                        fee: self.send_fee,
                    },
                });
                self.send_in_flight = true;
                self.exit_prompt();
                self.set_status("Submitting transaction…", StatusLevel::Info);
            }
        }
    }

    pub fn exit_prompt(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
        self.pending_recipient = None;
    }

    pub fn enter_search(&mut self) {
        self.input.clear();
        self.input_mode = InputMode::Search;
    }

    /// Submit the search input. An empty query is a no-op, not an error.
    pub fn apply_search(&mut self) {
        let query = self.input.trim().to_string();
        self.input.clear();
        self.input_mode = InputMode::Normal;
        if query.is_empty() {
            return;
        }
        self.set_status(format!("Searching for {query}…"), StatusLevel::Info);
        self.pending_commands.push(RuntimeCommand::Search { query });
    }

    pub fn close_search(&mut self) {
        self.search_view = None;
    }

    /// Copy the full wallet address (never the truncated display form).
    pub fn copy_address(&mut self) {
        let Some(address) = self
            .wallet
            .snapshot()
            .and_then(|wallet| wallet.as_ref())
            .map(|info| info.address.clone())
        else {
            self.set_status("No wallet address to copy", StatusLevel::Warn);
            return;
        };
        match arboard::Clipboard::new() {
            Ok(mut clipboard) => {
                if clipboard.set_text(address).is_ok() {
                    self.set_status("Address copied!", StatusLevel::Info);
                } else {
                    self.set_status("Failed to copy to clipboard", StatusLevel::Error);
                }
            }
            Err(_) => self.set_status("Clipboard not available", StatusLevel::Error),
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
    }
}
