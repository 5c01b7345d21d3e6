use std::sync::atomic::{AtomicU64, Ordering};

/// Counters shown on the admin page. Owned by the shared state; handlers and
/// middleware reach it through `AppState`.
#[derive(Debug, Default)]
pub struct Metrics {
    fileserver_hits: AtomicU64,
}

impl Metrics {
    pub fn record_hit(&self) {
        self.fileserver_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.fileserver_hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.fileserver_hits.store(0, Ordering::Relaxed);
    }
}
