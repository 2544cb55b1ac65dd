pub mod config;
pub mod error;
pub mod settings;
pub mod storage;
pub mod telemetry;
pub mod workflows;
