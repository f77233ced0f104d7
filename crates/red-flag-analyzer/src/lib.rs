pub mod analysis;
pub mod config;
pub mod error;
pub mod telemetry;
