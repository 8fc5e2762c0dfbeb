// Infrastructure layer - External dependencies and adapters
pub mod channel_source;
pub mod clock;
pub mod config;
pub mod file_storage;
pub mod memory_storage;
