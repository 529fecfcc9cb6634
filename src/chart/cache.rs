//! Memoization of resolved charts.
//!
//! The catalog never changes after load, so the time-to-live only bounds
//! memory usage of long running processes.

use super::ChartEntry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// A resolution outcome: `None` is a month without a chart.
pub type ResolvedChart = Option<Arc<Vec<ChartEntry>>>;

struct CachedChart {
    inserted_at: Instant,
    chart: ResolvedChart,
}

pub struct ChartCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CachedChart>>,
}

impl ChartCache {
    /// A zero `ttl` disables memoization.
    pub fn new(ttl: Duration) -> ChartCache {
        ChartCache {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, CachedChart>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<ResolvedChart> {
        let mut entries = self.entries();
        let expired = match entries.get(key) {
            None => return None,
            Some(cached) => now.duration_since(cached.inserted_at) >= self.ttl,
        };
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|cached| cached.chart.clone())
    }

    fn insert_at(&self, key: &str, chart: ResolvedChart, now: Instant) {
        if !self.is_enabled() {
            return;
        }
        self.entries().insert(
            key.to_string(),
            CachedChart {
                inserted_at: now,
                chart,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<ResolvedChart> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&self, key: &str, chart: ResolvedChart) {
        self.insert_at(key, chart, Instant::now())
    }

    /// Returns the memoized chart for `key`, computing it with `resolve` when
    /// absent or expired.
    ///
    /// The lock is not held while resolving: two concurrent callers may both
    /// compute the same chart, the last insert wins.
    pub fn get_or_resolve<F>(&self, key: &str, resolve: F) -> ResolvedChart
    where
        F: FnOnce() -> ResolvedChart,
    {
        if let Some(chart) = self.get(key) {
            return chart;
        }
        let chart = resolve();
        self.insert(key, chart.clone());
        chart
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        let ttl = self.ttl;
        self.entries()
            .retain(|_, cached| now.duration_since(cached.inserted_at) < ttl);
    }
}
