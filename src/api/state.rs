use std::sync::Arc;

use chrono::NaiveDate;

use crate::api::cache::ReportCache;
use crate::calculate::SeasonSettings;
use crate::config::SeasonConfig;
use crate::storage::StorageConfig;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub season: Arc<SeasonConfig>,
    pub cors_origin: String,
    pub cache: Arc<ReportCache>,
}

impl AppState {
    pub fn new(
        storage: StorageConfig,
        season: SeasonConfig,
        cors_origin: String,
        cache_capacity: usize,
    ) -> Self {
        Self {
            storage: Arc::new(storage),
            season: Arc::new(season),
            cors_origin,
            cache: Arc::new(ReportCache::new(cache_capacity)),
        }
    }

    pub fn settings(&self, as_of: NaiveDate) -> SeasonSettings {
        SeasonSettings {
            as_of,
            total_games_per_team: self.season.total_games_per_team,
            playoff_cutoff: self.season.playoff_cutoff,
        }
    }
}
