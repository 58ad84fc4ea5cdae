use std::sync::Mutex;

use log::info;

/// Thin recorder kept by long-lived components so their per-frame notes all
/// flow through the `log` facade.
#[derive(Debug, Default)]
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }
}

/// Ingestion counters shared across request handlers.
pub struct MetricsRecorder {
    inner: Mutex<Counters>,
}

struct Counters {
    accepted: usize,
    rejected: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters {
                accepted: 0,
                rejected: 0,
            }),
        }
    }

    pub fn record_accepted(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.accepted += 1;
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.rejected += 1;
        }
    }

    /// `(accepted, rejected)` snapshot.
    pub fn snapshot(&self) -> (usize, usize) {
        match self.inner.lock() {
            Ok(counters) => (counters.accepted, counters.rejected),
            Err(_) => (0, 0),
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
