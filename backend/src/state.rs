use crate::classifier::{ClassificationAdapter, ImageClassifier, RandomClassifier};
use shared::Processed;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Success,
    Fail,
}

/// Process-wide success/fail accounting. Monotone; never touched by probe
/// traffic.
#[derive(Default)]
pub struct UsageCounters {
    success: AtomicU64,
    fail: AtomicU64,
}

impl UsageCounters {
    pub fn record(&self, outcome: Outcome) {
        match outcome {
            Outcome::Success => self.success.fetch_add(1, Ordering::Relaxed),
            Outcome::Fail => self.fail.fetch_add(1, Ordering::Relaxed),
        };
    }

    pub fn snapshot(&self) -> Processed {
        Processed {
            success: self.success.load(Ordering::Relaxed),
            fail: self.fail.load(Ordering::Relaxed),
        }
    }
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub started: Instant,
    pub counters: Arc<UsageCounters>,
    pub adapter: ClassificationAdapter,
}

impl AppState {
    pub fn new(backend: Arc<dyn ImageClassifier>, budget: Duration) -> Self {
        Self {
            started: Instant::now(),
            counters: Arc::new(UsageCounters::default()),
            adapter: ClassificationAdapter::new(backend, budget),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(Arc::new(RandomClassifier), crate::classifier::DEFAULT_BUDGET)
    }

    /// Seconds since boot, rounded to 2 decimals for the wire.
    pub fn uptime(&self) -> f64 {
        (self.started.elapsed().as_secs_f64() * 100.0).round() / 100.0
    }
}
