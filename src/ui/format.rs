//! Display formatting helpers

use chrono::Utc;

pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}

/// Humanized age of a block. Two tiers only: under a minute in seconds,
/// everything else in floor-divided minutes.
pub fn time_ago(timestamp: i64, now: i64) -> String {
    let seconds = (now - timestamp).max(0);
    if seconds < 60 {
        format!("{} secs ago", seconds)
    } else {
        format!("{} mins ago", seconds / 60)
    }
}

/// Wallet-style short form: first 6 characters, ellipsis, last 4.
pub fn short_address(value: &str) -> String {
    let value = value.trim();
    if value.chars().count() <= 10 {
        return value.to_string();
    }
    let start: String = value.chars().take(6).collect();
    let end: String = value
        .chars()
        .rev()
        .take(4)
        .collect::<String>()
        .chars()
        .rev()
        .collect();
    format!("{}...{}", start, end)
}

/// Validator column form: 10-character prefix plus ellipsis. Display only;
/// the full value stays untouched on the summary.
pub fn truncate_miner(value: &str) -> String {
    if value.chars().count() <= 10 {
        return value.to_string();
    }
    let prefix: String = value.chars().take(10).collect();
    format!("{}...", prefix)
}

pub fn format_balance(balance: f64) -> String {
    format!("{} RNR", balance)
}

/// Balance times the configured unit price, two decimals.
pub fn fiat_value(balance: f64, unit_price: f64) -> String {
    format!("${:.2}", balance * unit_price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_ago_under_a_minute_is_seconds() {
        let now = 1_700_000_000;
        assert_eq!(time_ago(now - 45, now), "45 secs ago");
        assert_eq!(time_ago(now - 59, now), "59 secs ago");
    }

    #[test]
    fn time_ago_floors_to_minutes() {
        let now = 1_700_000_000;
        assert_eq!(time_ago(now - 60, now), "1 mins ago");
        assert_eq!(time_ago(now - 125, now), "2 mins ago");
        // No hours tier: long ages stay in minutes.
        assert_eq!(time_ago(now - 7_200, now), "120 mins ago");
    }

    #[test]
    fn time_ago_clamps_future_timestamps() {
        let now = 1_700_000_000;
        assert_eq!(time_ago(now + 30, now), "0 secs ago");
    }

    #[test]
    fn short_address_keeps_head_and_tail() {
        assert_eq!(short_address("0xabcdef1234567890"), "0xabcd...7890");
        assert_eq!(short_address("0xshort"), "0xshort");
    }

    #[test]
    fn truncate_miner_takes_ten_chars() {
        assert_eq!(
            truncate_miner("0xfeedbeefcafe0123"),
            "0xfeedbeef..."
        );
        assert_eq!(truncate_miner("0xtiny"), "0xtiny");
    }

    #[test]
    fn fiat_value_rounds_to_cents() {
        assert_eq!(fiat_value(100.0, 12.45), "$1245.00");
        assert_eq!(fiat_value(0.1, 12.45), "$1.25");
        assert_eq!(fiat_value(0.0, 12.45), "$0.00");
    }

    #[test]
    fn balance_display_drops_trailing_zero() {
        assert_eq!(format_balance(100.0), "100 RNR");
        assert_eq!(format_balance(12.5), "12.5 RNR");
    }
}
