// Library for tests to access modules

pub mod alerts;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod sampler;
pub mod sink;
pub mod source;
pub mod telemetry;
pub mod version;
