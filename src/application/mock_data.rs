// Mock data generator - Synthetic location history for demos and tests
use crate::application::clock::Clock;
use crate::application::location_log::LocationLogStore;
use crate::domain::location::{LocationPoint, DAY_MS};
use crate::error::LogError;
use crate::infrastructure::config::{MockSettings, Mode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

pub const MIN_POINTS_PER_DAY: usize = 3;
pub const MAX_POINTS_PER_DAY: usize = 10;
/// Maximum coordinate offset from the center, in degrees, on each axis
pub const MAX_OFFSET_DEGREES: f64 = 0.025;
pub const MIN_ACCURACY_METERS: f64 = 5.0;
pub const MAX_ACCURACY_METERS: f64 = 25.0;

pub struct MockDataGenerator {
    store: Arc<LocationLogStore>,
    clock: Arc<dyn Clock>,
    mode: Mode,
    settings: MockSettings,
}

impl MockDataGenerator {
    pub fn new(
        store: Arc<LocationLogStore>,
        clock: Arc<dyn Clock>,
        mode: Mode,
        settings: MockSettings,
    ) -> Self {
        Self {
            store,
            clock,
            mode,
            settings,
        }
    }

    /// Seed the log with synthetic history when running in development mode
    /// and nothing is stored yet, returning whether the log was seeded
    pub fn seed_if_empty(&self) -> Result<bool, LogError> {
        if !self.mode.is_development() {
            tracing::debug!("Skipping mock history outside development mode");
            return Ok(false);
        }

        let points = self.generate();
        if !self.store.replace_if_empty(&points)? {
            tracing::debug!("Location history already recorded, not seeding");
            return Ok(false);
        }
        tracing::info!(
            "Seeded '{}' with {} mock locations over {} days",
            self.store.key(),
            points.len(),
            self.settings.days
        );
        Ok(true)
    }

    /// Build `days` days of samples ending now, newest day first
    ///
    /// Day `d` gets 3..=10 points stamped somewhere in the 24 hours before
    /// `now - d days`, so no sample lies in the future
    pub fn generate(&self) -> Vec<LocationPoint> {
        let mut rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let now = self.clock.now_ms();
        let mut points = Vec::new();

        for day in 0..i64::from(self.settings.days) {
            let per_day = rng.gen_range(MIN_POINTS_PER_DAY..=MAX_POINTS_PER_DAY);
            let day_start = now - day * DAY_MS;

            for _ in 0..per_day {
                let timestamp = day_start - rng.gen_range(0..DAY_MS);
                let latitude = self.settings.center_latitude
                    + rng.gen_range(-MAX_OFFSET_DEGREES..=MAX_OFFSET_DEGREES);
                let longitude = self.settings.center_longitude
                    + rng.gen_range(-MAX_OFFSET_DEGREES..=MAX_OFFSET_DEGREES);
                let accuracy = rng.gen_range(MIN_ACCURACY_METERS..MAX_ACCURACY_METERS);

                let id = format!("mock-{}-{}", timestamp, points.len());
                points.push(LocationPoint::new(id, latitude, longitude, timestamp).with_accuracy(accuracy));
            }
        }

        points
    }
}
