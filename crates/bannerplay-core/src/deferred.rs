//! Deferred Actions
//!
//! One-shot actions that run after a delay, plus a virtual-clock queue used
//! by the headless backend.

use std::collections::BTreeMap;
use std::time::Duration;

/// Action to run once its delay has elapsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Show the muted banner after the video finished its first layout
    ShowMutedBanner,
}

/// Queued deferred entry
#[derive(Debug, Clone)]
struct Entry {
    action: DeferredAction,
    due: Duration,
}

/// One-shot timer queue driven by an explicit clock
///
/// Nothing is ever cancelled: an entry runs exactly once when the clock
/// passes its due time.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    now: Duration,
    next_id: u32,
    entries: BTreeMap<u32, Entry>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to run after `delay`
    pub fn schedule(&mut self, action: DeferredAction, delay: Duration) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, Entry { action, due: self.now + delay });
        id
    }

    /// Move the clock forward and take every action that became due, in
    /// scheduling order
    pub fn advance(&mut self, elapsed: Duration) -> Vec<DeferredAction> {
        self.now += elapsed;
        let now = self.now;

        let ready: Vec<u32> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.due <= now)
            .map(|(id, _)| *id)
            .collect();

        ready
            .into_iter()
            .filter_map(|id| self.entries.remove(&id))
            .map(|entry| entry.action)
            .collect()
    }

    /// Current clock value
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn has_pending(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Time until the next entry is due
    pub fn time_until_next(&self) -> Option<Duration> {
        self.entries
            .values()
            .map(|entry| entry.due.saturating_sub(self.now))
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot() {
        let mut queue = DeferredQueue::new();
        queue.schedule(DeferredAction::ShowMutedBanner, Duration::from_millis(1000));

        assert!(queue.advance(Duration::from_millis(999)).is_empty());
        assert_eq!(
            queue.advance(Duration::from_millis(1)),
            vec![DeferredAction::ShowMutedBanner]
        );
        assert!(!queue.has_pending());
        assert!(queue.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_time_until_next() {
        let mut queue = DeferredQueue::new();
        assert_eq!(queue.time_until_next(), None);

        queue.schedule(DeferredAction::ShowMutedBanner, Duration::from_millis(300));
        queue.advance(Duration::from_millis(100));

        assert_eq!(queue.time_until_next(), Some(Duration::from_millis(200)));
        assert_eq!(queue.now(), Duration::from_millis(100));
    }
}
