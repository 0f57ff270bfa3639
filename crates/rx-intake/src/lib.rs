pub mod config;
pub mod error;
pub mod flows;
pub mod telemetry;
