pub mod dimensions;
pub mod settings;

pub use dimensions::DimensionDefinition;
pub use settings::{AppConfig, ServerSettings, StatsSettings};
