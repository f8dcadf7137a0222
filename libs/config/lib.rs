mod config;

pub use config::{AiConfig, CoreConfig};
