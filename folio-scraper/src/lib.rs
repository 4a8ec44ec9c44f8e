pub mod aggregate;
pub mod artwork;
pub mod async_util;
pub mod cache;
pub mod client;
pub mod config;
pub mod enrich;
pub mod error;
pub mod github;
pub mod itunes;
pub mod sawthat;
pub mod youtube;

pub use aggregate::{BuildEvent, BuildOptions, collect};
pub use cache::CacheInfo;
pub use config::{
    ConfigSources, SiteConfig, ValueSource, config_sources, default_config_path,
};
pub use enrich::enrich_bands;
pub use error::FetchError;
