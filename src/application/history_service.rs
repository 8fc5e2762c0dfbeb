// History service - Use cases over the location log
use crate::application::clock::Clock;
use crate::application::location_log::LocationLogStore;
use crate::domain::grouping;
use crate::domain::location::{DailyLocationGroup, LocationPoint};
use crate::domain::zone::ZonePolicy;
use crate::error::LogError;
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Clone)]
pub struct HistoryService {
    store: Arc<LocationLogStore>,
    clock: Arc<dyn Clock>,
    zone: ZonePolicy,
}

impl HistoryService {
    pub fn new(store: Arc<LocationLogStore>, clock: Arc<dyn Clock>, zone: ZonePolicy) -> Self {
        Self { store, clock, zone }
    }

    pub fn store(&self) -> &Arc<LocationLogStore> {
        &self.store
    }

    pub fn zone(&self) -> ZonePolicy {
        self.zone
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Today's date in the configured zone
    pub fn today(&self) -> Option<NaiveDate> {
        self.zone.local_date(self.clock.now_ms())
    }

    pub fn append(&self, point: LocationPoint) -> Result<(), LogError> {
        self.store.append(point)
    }

    pub fn read_all(&self) -> Result<Vec<LocationPoint>, LogError> {
        self.store.read_all()
    }

    pub fn clear(&self) -> Result<(), LogError> {
        self.store.clear()
    }

    /// Points from the trailing `lookback_days`, grouped by calendar day,
    /// newest day first. Always reads the latest stored state
    pub fn group_by_day(&self, lookback_days: i64) -> Result<Vec<DailyLocationGroup>, LogError> {
        let history = self.store.read_all()?;
        let total = history.len();
        let groups = grouping::group_by_day(history, self.clock.now_ms(), lookback_days, self.zone)?;

        tracing::debug!(
            "Grouped {} of {} locations into {} days (last {} days)",
            groups.iter().map(DailyLocationGroup::len).sum::<usize>(),
            total,
            groups.len(),
            lookback_days
        );

        Ok(groups)
    }
}
