pub mod config;
pub mod error;
pub mod history;
pub mod templates;
pub mod toc;

pub use config::Config;
pub use error::ConfigError;
