//! Counting of emitted diagnostics.
//!
//! The loader reports through `tracing`. [`MessageCounter`] is a subscriber
//! layer that tallies events per level so callers (and tests) can check that
//! a failure was reported, or that it stayed silent.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Snapshot of event counts per level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageCounts {
    /// ERROR events
    pub errors: usize,
    /// WARN events
    pub warnings: usize,
    /// INFO events
    pub infos: usize,
    /// DEBUG and TRACE events
    pub others: usize,
}

impl MessageCounts {
    /// Whether at least one ERROR event was seen
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Total events seen
    #[must_use]
    pub const fn total(&self) -> usize {
        self.errors + self.warnings + self.infos + self.others
    }
}

#[derive(Debug, Default)]
struct Counters {
    errors: AtomicUsize,
    warnings: AtomicUsize,
    infos: AtomicUsize,
    others: AtomicUsize,
}

/// Tracing layer counting events per level. Clones share their counts.
#[derive(Debug, Clone, Default)]
pub struct MessageCounter {
    counters: Arc<Counters>,
}

impl MessageCounter {
    /// Create a counter with all counts at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counts
    #[must_use]
    pub fn counts(&self) -> MessageCounts {
        MessageCounts {
            errors: self.counters.errors.load(Ordering::Relaxed),
            warnings: self.counters.warnings.load(Ordering::Relaxed),
            infos: self.counters.infos.load(Ordering::Relaxed),
            others: self.counters.others.load(Ordering::Relaxed),
        }
    }

    /// Reset every count to zero
    pub fn reset(&self) {
        self.counters.errors.store(0, Ordering::Relaxed);
        self.counters.warnings.store(0, Ordering::Relaxed);
        self.counters.infos.store(0, Ordering::Relaxed);
        self.counters.others.store(0, Ordering::Relaxed);
    }

    /// Run `f` with a thread-local subscriber carrying a fresh counter and
    /// return its result with the counts it produced
    pub fn capture<T>(f: impl FnOnce() -> T) -> (T, MessageCounts) {
        let counter = Self::new();
        let subscriber = tracing_subscriber::registry().with(counter.clone());
        let value = tracing::subscriber::with_default(subscriber, f);
        (value, counter.counts())
    }

    fn record(&self, level: Level) {
        let slot = if level == Level::ERROR {
            &self.counters.errors
        } else if level == Level::WARN {
            &self.counters.warnings
        } else if level == Level::INFO {
            &self.counters.infos
        } else {
            &self.counters.others
        };
        slot.fetch_add(1, Ordering::Relaxed);
    }
}

impl<S: Subscriber> Layer<S> for MessageCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.record(*event.metadata().level());
    }
}
