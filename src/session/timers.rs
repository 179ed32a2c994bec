use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPurpose {
    FiveMinuteWarning,
    WindowClose,
}

/// Delivered on the timer channel when a scheduled delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub purpose: TimerPurpose,
    pub token: u64,
}

struct ArmedTimer {
    token: u64,
    handle: JoinHandle<()>,
}

/// Single-shot timers keyed by purpose, at most one outstanding per purpose.
///
/// Each arm gets a fresh token. A firing already queued on the channel when
/// its timer was cancelled or replaced carries an old token and is rejected
/// by [`TimerSet::accept`].
pub struct TimerSet {
    tx: mpsc::UnboundedSender<TimerFired>,
    armed: HashMap<TimerPurpose, ArmedTimer>,
    next_token: u64,
}

impl TimerSet {
    pub fn new(tx: mpsc::UnboundedSender<TimerFired>) -> Self {
        Self {
            tx,
            armed: HashMap::new(),
            next_token: 0,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self, purpose: TimerPurpose, after: Duration) {
        self.cancel(purpose);

        self.next_token += 1;
        let token = self.next_token;
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = tx.send(TimerFired { purpose, token });
        });

        debug!(?purpose, ?after, token, "timer armed");
        self.armed.insert(purpose, ArmedTimer { token, handle });
    }

    pub fn cancel(&mut self, purpose: TimerPurpose) -> bool {
        match self.armed.remove(&purpose) {
            Some(timer) => {
                timer.handle.abort();
                debug!(?purpose, token = timer.token, "timer cancelled");
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        for (purpose, timer) in self.armed.drain() {
            timer.handle.abort();
            debug!(?purpose, token = timer.token, "timer cancelled");
        }
    }

    /// Claim a firing. Returns false for firings from cancelled or replaced timers.
    pub fn accept(&mut self, fired: TimerFired) -> bool {
        match self.armed.get(&fired.purpose) {
            Some(timer) if timer.token == fired.token => {
                self.armed.remove(&fired.purpose);
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self, purpose: TimerPurpose) -> bool {
        self.armed.contains_key(&purpose)
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }
}

impl Drop for TimerSet {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timer_fires_after_delay() {
        tokio::time::pause();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TimerSet::new(tx);

        timers.arm(TimerPurpose::WindowClose, Duration::from_secs(10));
        tokio::time::sleep(Duration::from_secs(9)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(2)).await;
        let fired = rx.try_recv().expect("timer should have fired");
        assert_eq!(fired.purpose, TimerPurpose::WindowClose);
        assert!(timers.accept(fired));
        assert!(!timers.is_armed(TimerPurpose::WindowClose));
    }

    #[tokio::test]
    async fn test_rearm_replaces_previous_timer() {
        tokio::time::pause();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TimerSet::new(tx);

        timers.arm(TimerPurpose::WindowClose, Duration::from_secs(5));
        timers.arm(TimerPurpose::WindowClose, Duration::from_secs(20));
        assert_eq!(timers.armed_count(), 1);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(11)).await;
        let fired = rx.try_recv().expect("replacement should fire");
        assert!(timers.accept(fired));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_cancel_all_stops_everything() {
        tokio::time::pause();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timers = TimerSet::new(tx);

        timers.arm(TimerPurpose::FiveMinuteWarning, Duration::from_secs(1));
        timers.arm(TimerPurpose::WindowClose, Duration::from_secs(2));
        timers.cancel_all();
        timers.cancel_all();
        assert_eq!(timers.armed_count(), 0);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_stale_firing_is_rejected() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut timers = TimerSet::new(tx);

        timers.arm(TimerPurpose::WindowClose, Duration::from_secs(60));
        let stale = TimerFired {
            purpose: TimerPurpose::WindowClose,
            token: 0,
        };
        assert!(!timers.accept(stale));
        assert!(timers.is_armed(TimerPurpose::WindowClose));

        timers.cancel(TimerPurpose::WindowClose);
        let cancelled = TimerFired {
            purpose: TimerPurpose::WindowClose,
            token: 1,
        };
        assert!(!timers.accept(cancelled));
    }
}
