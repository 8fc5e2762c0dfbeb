// Application layer - Ports and use cases
pub mod clock;
pub mod history_service;
pub mod location_log;
#[cfg(any(test, feature = "mock-data"))]
pub mod mock_data;
pub mod storage_port;
pub mod tracking;
