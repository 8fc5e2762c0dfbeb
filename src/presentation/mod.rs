// Presentation layer - View models consumed by the UI
pub mod history_view;
pub mod labels;
pub mod map_overlay;
