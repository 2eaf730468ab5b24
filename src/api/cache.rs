//! Season report cache.
//!
//! Reports are keyed by the game log fingerprint and the as-of date, so a
//! changed log or a different date never reuses a stale report. Entries are
//! never invalidated one by one; at capacity the whole cache is cleared.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use crate::calculate::{analyze_season, SeasonReport, SeasonSettings, TieBreaker};
use crate::models::{GameLog, SnapshotId};

type CacheKey = (SnapshotId, NaiveDate);

pub struct ReportCache {
    capacity: usize,
    reports: RwLock<HashMap<CacheKey, Arc<SeasonReport>>>,
}

impl ReportCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            reports: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }

    /// Drop every cached report.
    pub async fn clear(&self) {
        self.reports.write().await.clear();
    }

    /// Return the cached report for this log and date, computing it on a miss.
    pub async fn get_or_compute(
        &self,
        log: &GameLog,
        settings: &SeasonSettings,
        tie_breaker: &dyn TieBreaker,
    ) -> Arc<SeasonReport> {
        let key = (log.fingerprint(), settings.as_of);

        if let Some(report) = self.reports.read().await.get(&key) {
            debug!("Report cache hit for {} as of {}", key.0, key.1);
            return Arc::clone(report);
        }

        let report = Arc::new(analyze_season(log, settings, tie_breaker));

        let mut reports = self.reports.write().await;
        if reports.len() >= self.capacity && !reports.contains_key(&key) {
            debug!("Report cache full ({}), clearing", reports.len());
            reports.clear();
        }
        Arc::clone(reports.entry(key).or_insert(report))
    }
}
