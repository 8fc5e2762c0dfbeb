// Domain layer - Location models and pure transformations
pub mod grouping;
pub mod location;
pub mod zone;
