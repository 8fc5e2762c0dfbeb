// Main entry point - Dependency injection and history report
use std::sync::Arc;

use wander_history::application::history_service::HistoryService;
use wander_history::application::location_log::LocationLogStore;
use wander_history::infrastructure::clock::SystemClock;
use wander_history::infrastructure::config::load_history_config;
use wander_history::presentation::history_view::{build_history_view, EMPTY_HISTORY_MESSAGE};
use wander_history::presentation::labels::range_label;
use wander_history::presentation::map_overlay::MapOverlay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wander_history=info".into()),
        )
        .init();

    // Load configuration
    let config = load_history_config()?;
    let zone = config.zone()?;

    // Create store (infrastructure layer)
    let storage = config.storage.open();
    let store = Arc::new(LocationLogStore::with_key(storage, config.storage.key.clone()));
    let clock = Arc::new(SystemClock);

    #[cfg(feature = "mock-data")]
    {
        use wander_history::application::mock_data::MockDataGenerator;

        MockDataGenerator::new(store.clone(), clock.clone(), config.mode, config.mock.clone())
            .seed_if_empty()?;
    }

    // Create services (application layer)
    let service = HistoryService::new(store, clock, zone);

    let days = config.default_range_days;
    let groups = service.group_by_day(days)?;
    let today = service
        .today()
        .ok_or_else(|| anyhow::anyhow!("Current time is outside the supported date range"))?;

    tracing::info!("Location history: {}", range_label(days));
    if groups.is_empty() {
        tracing::info!("{}", EMPTY_HISTORY_MESSAGE);
        return Ok(());
    }

    for section in build_history_view(&groups, today, zone) {
        tracing::info!("{} ({})", section.heading, section.count_label);
        for entry in section.entries {
            tracing::info!(
                "  {}  {}  {}",
                entry.time,
                entry.coordinates,
                entry.accuracy.unwrap_or_default()
            );
        }
    }

    let overlay = MapOverlay::from_groups(&groups, None);
    tracing::debug!("Map overlay: {}", overlay.to_json()?);

    Ok(())
}
