//! Configuration loading

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileAgentsConfig, FileCacheConfig, FileConfig, FileGatewayConfig,
    FileLocalConfig, FileLoggingConfig, FilePublishConfig, FileRunConfig, FileSecretsConfig,
};
pub use loader::ConfigLoader;
