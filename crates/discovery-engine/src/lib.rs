pub mod classify;
pub mod compression;
pub mod crawler;
pub mod error;
pub mod html;
mod http_client;
pub mod normalize;
pub mod orchestrator;
pub mod patterns;
pub mod postprocess;
pub mod queue;
pub mod sitemap;
pub mod sitemap_discovery;

pub use error::DiscoveryError;
pub use orchestrator::{discover, normalize_base_url};
pub use patterns::ParsingPatterns;
