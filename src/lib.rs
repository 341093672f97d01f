pub mod config;
pub mod presets;
pub mod identifier;
pub mod engine;
pub mod sink;
pub mod pipeline;
pub mod errors;
pub mod metrics;
pub mod logger;
