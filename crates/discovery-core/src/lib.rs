pub mod config;
pub mod error;

pub use config::{
    load_config, Config, CrawlerConfig, ParsingConfig, PostprocessConfig, SitemapConfig,
};
pub use error::ConfigError;
