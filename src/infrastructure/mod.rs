//! Infrastructure layer
//!
//! Configuration loading and logging setup.

mod config;
mod logging;

pub use config::{Config, ConfigError, ENV_TOKEN, ENV_URL, ENV_USER};
pub use logging::init_logging;
