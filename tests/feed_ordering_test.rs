//! Ordering and teardown guarantees of the poll runtime
//!
//! Each feed's ticks carry monotonically increasing sequence numbers; only
//! the latest issued sequence may paint, and nothing paints after shutdown.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use rnrscan::app::App;
use rnrscan::config::Config;
use rnrscan::core::FeedState;
use rnrscan::infrastructure::api::{
    ApiError, BlockSummary, NodeApi, SendOutcome, SendRequest, StatsSnapshot, TransactionSummary,
    WalletInfo,
};
use rnrscan::infrastructure::runtime::{
    PollConfig, RuntimeBridge, RuntimeCommand, RuntimeEvent, TickGate,
};

fn sample_block(height: u64) -> BlockSummary {
    BlockSummary {
        hash: format!("0xhash{height}"),
        height,
        timestamp: 1_700_000_000,
        miner: "0xminer".to_string(),
        tx_count: 1,
    }
}

fn slow_poll_config() -> PollConfig {
    // Long intervals: only the immediate first tick of each feed fires
    // within the test window.
    PollConfig {
        api_url: "http://localhost:0".to_string(),
        stats_interval: Duration::from_secs(60),
        blocks_interval: Duration::from_secs(60),
        wallet_interval: Duration::from_secs(60),
        blocks_limit: 5,
        request_timeout: Duration::from_secs(1),
        poll_transactions: false,
    }
}

fn drain_for(bridge: &RuntimeBridge, window: Duration) -> Vec<RuntimeEvent> {
    let deadline = Instant::now() + window;
    let mut events = Vec::new();
    while Instant::now() < deadline {
        events.extend(bridge.poll_events());
        std::thread::sleep(Duration::from_millis(20));
    }
    events
}

struct QuietApi {
    wallet_delay: Duration,
}

#[async_trait]
impl NodeApi for QuietApi {
    async fn stats(&self) -> Result<StatsSnapshot, ApiError> {
        Ok(StatsSnapshot {
            height: 10,
            mempool_size: 2,
        })
    }

    async fn blocks(&self, limit: usize) -> Result<Vec<BlockSummary>, ApiError> {
        Ok((0..limit as u64).rev().map(sample_block).collect())
    }

    async fn transactions(&self) -> Result<Vec<TransactionSummary>, ApiError> {
        Ok(Vec::new())
    }

    async fn wallet(&self) -> Result<Option<WalletInfo>, ApiError> {
        tokio::time::sleep(self.wallet_delay).await;
        Ok(Some(WalletInfo {
            address: "0xabcdef1234567890".to_string(),
            balance: 100.0,
        }))
    }

    async fn send(&self, _request: &SendRequest) -> Result<SendOutcome, ApiError> {
        Err(ApiError::Server { status: 500 })
    }

    async fn search(&self, _query: &str) -> Result<serde_json::Value, ApiError> {
        Ok(serde_json::Value::Null)
    }
}

#[test]
fn stale_sequence_never_overwrites_newer_snapshot() {
    let gate = TickGate::new();
    let first = gate.issue();
    let second = gate.issue();

    // The second tick was issued, so the first is stale even if it is the
    // one that resolves first.
    assert!(!gate.is_current(first));
    assert!(gate.is_current(second));

    // The app-side feed enforces the same rule when the slower response
    // arrives after the newer one was already painted.
    let mut app = App::new(&Config::default());
    app.apply_event(RuntimeEvent::Blocks {
        seq: second,
        result: Ok(vec![sample_block(20)]),
    });
    app.apply_event(RuntimeEvent::Blocks {
        seq: first,
        result: Ok(vec![sample_block(19)]),
    });
    assert_eq!(app.blocks.snapshot().unwrap()[0].height, 20);
}

#[test]
fn failed_feed_is_scoped_to_its_own_region() {
    let mut app = App::new(&Config::default());
    app.apply_event(RuntimeEvent::Blocks {
        seq: 1,
        result: Ok(vec![sample_block(5)]),
    });
    app.apply_event(RuntimeEvent::Stats {
        seq: 1,
        result: Err("connection refused".to_string()),
    });

    assert!(matches!(app.stats.state(), FeedState::Failed(_)));
    assert_eq!(app.blocks.snapshot().unwrap().len(), 1);

    // The wallet pane is untouched by both.
    app.apply_event(RuntimeEvent::Wallet {
        seq: 1,
        result: Ok(None),
    });
    assert!(matches!(app.wallet.state(), FeedState::Ready(None)));
    assert!(matches!(app.stats.state(), FeedState::Failed(_)));
}

#[test]
fn first_tick_fires_immediately_at_mount() {
    let api = Arc::new(QuietApi {
        wallet_delay: Duration::ZERO,
    });
    let bridge = RuntimeBridge::with_api(api, slow_poll_config());

    // The intervals are 60s, so any event inside this window must come from
    // the immediate initial tick.
    let events = drain_for(&bridge, Duration::from_millis(800));
    assert!(events
        .iter()
        .any(|evt| matches!(evt, RuntimeEvent::Stats { .. })));
    assert!(events
        .iter()
        .any(|evt| matches!(evt, RuntimeEvent::Blocks { .. })));
}

#[test]
fn response_arriving_after_shutdown_is_discarded() {
    let api = Arc::new(QuietApi {
        wallet_delay: Duration::from_millis(400),
    });
    let bridge = RuntimeBridge::with_api(api, slow_poll_config());

    // Tear down while the wallet fetch from the initial tick is in flight.
    std::thread::sleep(Duration::from_millis(100));
    bridge.send(RuntimeCommand::Shutdown).unwrap();

    let events = drain_for(&bridge, Duration::from_secs(1));
    assert!(
        !events
            .iter()
            .any(|evt| matches!(evt, RuntimeEvent::Wallet { .. })),
        "wallet response slipped past teardown: {events:?}"
    );
}
