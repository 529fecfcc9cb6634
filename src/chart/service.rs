use super::{resolve, ChartCache, ChartEntry, ResolvedChart};
use crate::chart_catalog::{ChartCatalog, DateWindow};
use crate::query::{chart_key, validate, ValidationError};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Outcome of a month lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartLookup {
    Found {
        key: String,
        entries: Arc<Vec<ChartEntry>>,
    },
    /// The requested month was rejected before touching the catalog.
    Invalid(ValidationError),
    /// The month is valid but the catalog has no chart for it.
    Missing { key: String },
}

/// Entry point of the chart core: validation, resolution and memoization
/// over a shared, immutable catalog.
pub struct ChartService {
    catalog: Arc<ChartCatalog>,
    cache: ChartCache,
}

impl ChartService {
    pub fn new(catalog: Arc<ChartCatalog>, cache_ttl: Duration) -> ChartService {
        ChartService {
            catalog,
            cache: ChartCache::new(cache_ttl),
        }
    }

    pub fn catalog(&self) -> &ChartCatalog {
        &self.catalog
    }

    pub fn window(&self) -> DateWindow {
        self.catalog.window()
    }

    pub fn coverage(&self) -> (i32, i32) {
        self.catalog.coverage()
    }

    /// Memoized [`resolve`] of an already canonical date.
    pub fn chart_for(&self, canonical_date: NaiveDate) -> ResolvedChart {
        let key = chart_key(canonical_date);
        self.cache.get_or_resolve(&key, || {
            debug!("Resolving chart {}", key);
            resolve(canonical_date, &self.catalog).map(Arc::new)
        })
    }

    pub fn lookup(&self, year: i32, month: u32) -> ChartLookup {
        let canonical_date = match validate(year, month, &self.catalog.window()) {
            Ok(date) => date,
            Err(err) => return ChartLookup::Invalid(err),
        };
        let key = chart_key(canonical_date);
        match self.chart_for(canonical_date) {
            Some(entries) => ChartLookup::Found { key, entries },
            None => ChartLookup::Missing { key },
        }
    }

    pub fn cached_charts_count(&self) -> usize {
        self.cache.len()
    }

    pub fn purge_expired_charts(&self) {
        self.cache.purge_expired()
    }
}
