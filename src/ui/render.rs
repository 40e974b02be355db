//! Pure snapshot-to-text renderers
//!
//! Every function maps a data snapshot to a fresh list of lines: the caller
//! replaces the target region's content wholesale, so rendering the same
//! input twice yields the same visible output.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::app::DemoTransaction;
use crate::core::FeedState;
use crate::infrastructure::api::{BlockSummary, StatsSnapshot, TransactionSummary, WalletInfo};
use crate::ui::format;

pub fn latest_block_text(stats: &StatsSnapshot) -> String {
    format!("#{}", stats.height)
}

pub fn pending_text(stats: &StatsSnapshot) -> String {
    format!("{} Pending", stats.mempool_size)
}

/// Header indicator for one stats field; "--" until the first snapshot
/// lands, "error" when the last tick failed.
pub fn indicator_text<T, F>(state: &FeedState<T>, ready: F) -> String
where
    F: Fn(&T) -> String,
{
    match state {
        FeedState::Idle | FeedState::Loading => "--".to_string(),
        FeedState::Ready(value) => ready(value),
        FeedState::Failed(_) => "error".to_string(),
    }
}

/// One line per block, newest-first as delivered by the node.
pub fn block_rows(blocks: &[BlockSummary], now: i64) -> Vec<Line<'static>> {
    blocks
        .iter()
        .map(|block| {
            Line::from(vec![
                Span::styled(
                    format!("{}", block.height),
                    Style::default()
                        .fg(Color::LightCyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", format::time_ago(block.timestamp, now)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(format!(
                    "  Validator: {}",
                    format::truncate_miner(&block.miner)
                )),
                Span::styled(
                    format!("  {} txns", block.tx_count),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect()
}

/// The whole blocks region, covering loading/empty/error states.
pub fn blocks_panel(state: &FeedState<Vec<BlockSummary>>, now: i64) -> Vec<Line<'static>> {
    match state {
        FeedState::Idle | FeedState::Loading => vec![Line::from("Loading…")],
        FeedState::Ready(blocks) if blocks.is_empty() => vec![Line::from("No blocks yet")],
        FeedState::Ready(blocks) => block_rows(blocks, now),
        FeedState::Failed(_) => vec![Line::from(Span::styled(
            "Failed to load blocks",
            Style::default().fg(Color::Red),
        ))],
    }
}

/// The wallet region: address/balance/fiat when present, a distinct
/// "No Wallet" marker when the node has none, an error line otherwise.
pub fn wallet_lines(state: &FeedState<Option<WalletInfo>>, unit_price: f64) -> Vec<Line<'static>> {
    match state {
        FeedState::Idle | FeedState::Loading => vec![Line::from("Loading…")],
        FeedState::Ready(None) => vec![Line::from(Span::styled(
            "No Wallet",
            Style::default().fg(Color::DarkGray),
        ))],
        FeedState::Ready(Some(wallet)) => vec![
            Line::from(vec![
                Span::styled("Address ", Style::default().fg(Color::DarkGray)),
                Span::raw(format::short_address(&wallet.address)),
            ]),
            Line::from(vec![
                Span::styled("Balance ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format::format_balance(wallet.balance),
                    Style::default()
                        .fg(Color::LightCyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Value   ", Style::default().fg(Color::DarkGray)),
                Span::raw(format!(
                    "{} USD",
                    format::fiat_value(wallet.balance, unit_price)
                )),
            ]),
        ],
        FeedState::Failed(message) => vec![
            Line::from(Span::styled(
                "Wallet unavailable",
                Style::default().fg(Color::Red),
            )),
            Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::DarkGray),
            )),
        ],
    }
}

/// One line per live mempool transaction.
pub fn transaction_rows(txs: &[TransactionSummary]) -> Vec<Line<'static>> {
    txs.iter()
        .map(|tx| {
            Line::from(vec![
                Span::styled(
                    format::short_address(&tx.hash),
                    Style::default().fg(Color::LightGreen),
                ),
                Span::styled(
                    format!(
                        "  From {} To {}",
                        format::short_address(&tx.from),
                        format::short_address(&tx.to)
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(format!("  {}", format::format_balance(tx.amount))),
                Span::styled(
                    format!("  {}", tx.status),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect()
}

/// The live transactions region with its loading/empty/error states.
pub fn transactions_panel(state: &FeedState<Vec<TransactionSummary>>) -> Vec<Line<'static>> {
    match state {
        FeedState::Idle | FeedState::Loading => vec![Line::from("Loading…")],
        FeedState::Ready(txs) if txs.is_empty() => vec![Line::from("No transactions yet")],
        FeedState::Ready(txs) => transaction_rows(txs),
        FeedState::Failed(_) => vec![Line::from(Span::styled(
            "Failed to load transactions",
            Style::default().fg(Color::Red),
        ))],
    }
}

/// Placeholder transaction rows, used only while no real feed is wired up.
pub fn demo_tx_rows(txs: &[DemoTransaction]) -> Vec<Line<'static>> {
    txs.iter()
        .map(|tx| {
            Line::from(vec![
                Span::styled(tx.hash.clone(), Style::default().fg(Color::LightGreen)),
                Span::styled(
                    format!("  From {} To {}", tx.from, tx.to),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(format!("  {}", tx.amount)),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    fn block(height: u64, timestamp: i64) -> BlockSummary {
        BlockSummary {
            hash: format!("0xhash{height}"),
            height,
            timestamp,
            miner: "0xminerminerminer".to_string(),
            tx_count: 3,
        }
    }

    #[test]
    fn stats_indicators_match_exact_format() {
        let stats = StatsSnapshot {
            height: 1234,
            mempool_size: 7,
        };
        assert_eq!(latest_block_text(&stats), "#1234");
        assert_eq!(pending_text(&stats), "7 Pending");
    }

    #[test]
    fn block_rows_render_one_row_per_block_newest_first() {
        let now = 1_700_000_000;
        let blocks = vec![block(12, now - 10), block(11, now - 20), block(10, now - 30)];
        let rows = block_rows(&blocks, now);
        assert_eq!(rows.len(), 3);
        assert!(line_text(&rows[0]).starts_with("12"));
        assert!(line_text(&rows[2]).starts_with("10"));
    }

    #[test]
    fn block_rows_are_idempotent() {
        let now = 1_700_000_000;
        let blocks = vec![block(5, now - 90)];
        assert_eq!(block_rows(&blocks, now), block_rows(&blocks, now));
    }

    #[test]
    fn block_row_truncates_miner_for_display_only() {
        let now = 1_700_000_000;
        let blocks = vec![block(1, now - 5)];
        let text = line_text(&block_rows(&blocks, now)[0]);
        assert!(text.contains("Validator: 0xminermin..."));
        // The summary itself keeps the full value for links.
        assert_eq!(blocks[0].miner, "0xminerminerminer");
    }

    #[test]
    fn failed_blocks_feed_renders_scoped_error() {
        let state = FeedState::Failed("connection refused".to_string());
        let lines = blocks_panel(&state, 0);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "Failed to load blocks");
    }

    #[test]
    fn wallet_absent_renders_no_wallet_marker() {
        let lines = wallet_lines(&FeedState::Ready(None), 12.45);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "No Wallet");
    }

    #[test]
    fn wallet_ready_renders_short_address_balance_and_fiat() {
        let wallet = WalletInfo {
            address: "0xabcdef1234567890".to_string(),
            balance: 100.0,
        };
        let lines = wallet_lines(&FeedState::Ready(Some(wallet)), 12.45);
        let text: Vec<String> = lines.iter().map(line_text).collect();
        assert!(text[0].contains("0xabcd...7890"));
        assert!(text[1].contains("100 RNR"));
        assert!(text[2].contains("$1245.00"));
    }

    #[test]
    fn demo_rows_cover_every_placeholder() {
        let txs = crate::app::demo_transactions();
        let rows = demo_tx_rows(&txs);
        assert_eq!(rows.len(), txs.len());
        assert!(line_text(&rows[0]).contains("100 RNR"));
    }
}
