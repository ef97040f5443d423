pub mod config;
pub mod loader;
pub mod resolve;

pub use config::{Config, Overrides, ResolvedConfig};
pub use loader::load_config;
pub use resolve::ConfigError;
