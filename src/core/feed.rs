//! Per-feed view state

/// Lifecycle of one polled data source. Every feed moves Idle → Loading once
/// at mount, then settles on Ready or Failed after each accepted tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

/// A feed's most recently accepted snapshot plus the sequence number that
/// produced it. `apply` refuses sequence regressions, so even if a stale
/// response slips through the worker-side gate it cannot overwrite a newer
/// one here.
#[derive(Debug, Clone)]
pub struct Feed<T> {
    state: FeedState<T>,
    last_seq: u64,
}

impl<T> Feed<T> {
    pub fn new() -> Self {
        Self {
            state: FeedState::Idle,
            last_seq: 0,
        }
    }

    /// Mark the feed as loading. Only meaningful from Idle; once data or an
    /// error has arrived the previous state stays visible until replaced.
    pub fn begin(&mut self) {
        if matches!(self.state, FeedState::Idle) {
            self.state = FeedState::Loading;
        }
    }

    /// Accept a tick's result. Returns false (and changes nothing) when the
    /// sequence does not advance past the last accepted one.
    pub fn apply(&mut self, seq: u64, result: Result<T, String>) -> bool {
        if seq <= self.last_seq {
            return false;
        }
        self.last_seq = seq;
        self.state = match result {
            Ok(value) => FeedState::Ready(value),
            Err(message) => FeedState::Failed(message),
        };
        true
    }

    pub fn state(&self) -> &FeedState<T> {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&T> {
        match &self.state {
            FeedState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FeedState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> Default for Feed<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begins_loading_only_from_idle() {
        let mut feed = Feed::<u32>::new();
        assert_eq!(*feed.state(), FeedState::Idle);
        feed.begin();
        assert_eq!(*feed.state(), FeedState::Loading);
        feed.apply(1, Ok(7));
        feed.begin();
        assert_eq!(*feed.state(), FeedState::Ready(7));
    }

    #[test]
    fn stale_sequence_is_ignored() {
        let mut feed = Feed::<&str>::new();
        assert!(feed.apply(2, Ok("newer")));
        assert!(!feed.apply(1, Ok("older")));
        assert_eq!(feed.snapshot(), Some(&"newer"));
    }

    #[test]
    fn failure_replaces_snapshot_for_this_feed_only() {
        let mut stats = Feed::<u32>::new();
        let mut blocks = Feed::<u32>::new();
        stats.apply(1, Ok(10));
        blocks.apply(1, Ok(20));
        stats.apply(2, Err("connection refused".to_string()));
        assert_eq!(stats.error(), Some("connection refused"));
        assert_eq!(blocks.snapshot(), Some(&20));
    }

    #[test]
    fn recovers_from_failure_on_next_tick() {
        let mut feed = Feed::<u32>::new();
        feed.apply(1, Err("timeout".to_string()));
        assert!(feed.apply(2, Ok(5)));
        assert_eq!(feed.snapshot(), Some(&5));
        assert_eq!(feed.error(), None);
    }
}
