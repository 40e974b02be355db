//! Async worker - runs in the Tokio runtime and drives the poll loops
//!
//! Each feed (stats, blocks, wallet) ticks on its own interval, starting
//! immediately. A tick issues a sequence number from the feed's gate and
//! spawns an independent fetch task, so a slow response never delays the
//! next tick and never overwrites a newer one: completions that are not the
//! latest issued sequence are dropped before crossing the bridge.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::interval;
use tracing::{info, warn};

use crate::infrastructure::api::{NodeApi, SendRequest};
use crate::infrastructure::runtime::bridge::{PollConfig, RuntimeCommand, RuntimeEvent};
use crate::infrastructure::runtime::gate::TickGate;

pub async fn run_worker(
    api: Arc<dyn NodeApi>,
    config: PollConfig,
    cmd_rx: Receiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) {
    let stats_gate = TickGate::new();
    let blocks_gate = TickGate::new();
    let txs_gate = TickGate::new();
    let wallet_gate = TickGate::new();

    let mut stats_tick = interval(config.stats_interval);
    let mut blocks_tick = interval(config.blocks_interval);
    // The transaction feed shares the blocks cadence when the node has one.
    let mut txs_tick = interval(config.blocks_interval);
    let mut wallet_tick = interval(config.wallet_interval);
    // Commands arrive over a sync channel; poll it between ticks.
    let mut command_poll = interval(Duration::from_millis(50));

    loop {
        while let Ok(cmd) = cmd_rx.try_recv() {
            match cmd {
                RuntimeCommand::Shutdown => {
                    stats_gate.close();
                    blocks_gate.close();
                    txs_gate.close();
                    wallet_gate.close();
                    return;
                }
                RuntimeCommand::Refresh => {
                    spawn_stats(&api, &stats_gate, &evt_tx);
                    spawn_blocks(&api, &blocks_gate, &evt_tx, config.blocks_limit);
                    if config.poll_transactions {
                        spawn_transactions(&api, &txs_gate, &evt_tx);
                    }
                    spawn_wallet(&api, &wallet_gate, &evt_tx);
                }
                RuntimeCommand::Send { request } => {
                    spawn_send(&api, &evt_tx, request);
                }
                RuntimeCommand::Search { query } => {
                    spawn_search(&api, &evt_tx, query);
                }
            }
        }

        tokio::select! {
            _ = stats_tick.tick() => spawn_stats(&api, &stats_gate, &evt_tx),
            _ = blocks_tick.tick() => spawn_blocks(&api, &blocks_gate, &evt_tx, config.blocks_limit),
            _ = txs_tick.tick(), if config.poll_transactions => spawn_transactions(&api, &txs_gate, &evt_tx),
            _ = wallet_tick.tick() => spawn_wallet(&api, &wallet_gate, &evt_tx),
            _ = command_poll.tick() => {}
        }
    }
}

fn spawn_stats(api: &Arc<dyn NodeApi>, gate: &TickGate, evt_tx: &Sender<RuntimeEvent>) {
    let seq = gate.issue();
    let api = Arc::clone(api);
    let gate = gate.clone();
    let evt_tx = evt_tx.clone();
    tokio::spawn(async move {
        let result = api.stats().await.map_err(|err| err.to_string());
        if let Err(ref message) = result {
            warn!(feed = "stats", seq, %message, "poll failed");
        }
        if gate.is_current(seq) {
            let _ = evt_tx.send(RuntimeEvent::Stats { seq, result });
        }
    });
}

fn spawn_blocks(
    api: &Arc<dyn NodeApi>,
    gate: &TickGate,
    evt_tx: &Sender<RuntimeEvent>,
    limit: usize,
) {
    let seq = gate.issue();
    let api = Arc::clone(api);
    let gate = gate.clone();
    let evt_tx = evt_tx.clone();
    tokio::spawn(async move {
        let result = api.blocks(limit).await.map_err(|err| err.to_string());
        if let Err(ref message) = result {
            warn!(feed = "blocks", seq, %message, "poll failed");
        }
        if gate.is_current(seq) {
            let _ = evt_tx.send(RuntimeEvent::Blocks { seq, result });
        }
    });
}

fn spawn_transactions(api: &Arc<dyn NodeApi>, gate: &TickGate, evt_tx: &Sender<RuntimeEvent>) {
    let seq = gate.issue();
    let api = Arc::clone(api);
    let gate = gate.clone();
    let evt_tx = evt_tx.clone();
    tokio::spawn(async move {
        let result = api.transactions().await.map_err(|err| err.to_string());
        if let Err(ref message) = result {
            warn!(feed = "transactions", seq, %message, "poll failed");
        }
        if gate.is_current(seq) {
            let _ = evt_tx.send(RuntimeEvent::Transactions { seq, result });
        }
    });
}

fn spawn_wallet(api: &Arc<dyn NodeApi>, gate: &TickGate, evt_tx: &Sender<RuntimeEvent>) {
    let seq = gate.issue();
    let api = Arc::clone(api);
    let gate = gate.clone();
    let evt_tx = evt_tx.clone();
    tokio::spawn(async move {
        let result = api.wallet().await.map_err(|err| err.to_string());
        if let Err(ref message) = result {
            warn!(feed = "wallet", seq, %message, "poll failed");
        }
        if gate.is_current(seq) {
            let _ = evt_tx.send(RuntimeEvent::Wallet { seq, result });
        }
    });
}

fn spawn_send(api: &Arc<dyn NodeApi>, evt_tx: &Sender<RuntimeEvent>, request: SendRequest) {
    let api = Arc::clone(api);
    let evt_tx = evt_tx.clone();
    tokio::spawn(async move {
        info!(to = %request.to, amount = request.amount, fee = request.fee, "submitting transaction");
        let outcome = api.send(&request).await.map_err(|err| err.to_string());
        match &outcome {
            Ok(result) => info!(?result, "send finished"),
            Err(message) => warn!(%message, "send failed"),
        }
        let _ = evt_tx.send(RuntimeEvent::SendFinished { outcome });
    });
}

fn spawn_search(api: &Arc<dyn NodeApi>, evt_tx: &Sender<RuntimeEvent>, query: String) {
    let api = Arc::clone(api);
    let evt_tx = evt_tx.clone();
    tokio::spawn(async move {
        let result = api.search(&query).await.map_err(|err| err.to_string());
        if let Err(ref message) = result {
            warn!(%query, %message, "search failed");
        }
        let _ = evt_tx.send(RuntimeEvent::SearchReady { query, result });
    });
}
