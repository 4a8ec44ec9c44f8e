use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cache;
use crate::error::FetchError;

pub const ENV_GITHUB_OWNER: &str = "FOLIO_GITHUB_OWNER";
pub const ENV_YOUTUBE_CHANNEL: &str = "FOLIO_YOUTUBE_CHANNEL";
pub const ENV_YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";
pub const ENV_SAWTHAT_ID: &str = "FOLIO_SAWTHAT_ID";

/// Site configuration: which accounts to aggregate and where to cache.
///
/// Every identifier is optional. A missing one is a normal state that leaves
/// its catalog empty, not an error.
#[derive(Debug, Clone, Default)]
pub struct SiteConfig {
    pub github: GithubConfig,
    pub youtube: YoutubeConfig,
    pub sawthat: SawthatConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Default)]
pub struct GithubConfig {
    /// Account whose profile and repositories are shown.
    pub owner: Option<String>,
    /// Featured repositories: plain names for the owner's own repos,
    /// `owner/name` for repos under other accounts.
    pub pins: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct YoutubeConfig {
    pub channel: Option<String>,
    /// Data API key. Usually supplied via `YOUTUBE_API_KEY` rather than the
    /// config file so it stays out of the repository.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SawthatConfig {
    pub id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub path: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(cache::DEFAULT_PATH),
        }
    }
}

/// TOML config file format.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    github: Option<GithubSection>,
    youtube: Option<YoutubeSection>,
    sawthat: Option<SawthatSection>,
    cache: Option<CacheSection>,
}

#[derive(Debug, Deserialize)]
struct GithubSection {
    owner: Option<String>,
    pins: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct YoutubeSection {
    channel: Option<String>,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SawthatSection {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CacheSection {
    path: Option<PathBuf>,
}

impl SiteConfig {
    /// Load configuration with env vars taking priority over the file.
    ///
    /// An explicitly passed path must exist and parse; the default
    /// `folio.toml` is allowed to be absent.
    pub fn load(path: Option<&Path>) -> Result<Self, FetchError> {
        let file = read_config_file(path)?;

        let github = GithubConfig {
            owner: std::env::var(ENV_GITHUB_OWNER)
                .ok()
                .or_else(|| file.github.as_ref().and_then(|g| g.owner.clone())),
            pins: file
                .github
                .as_ref()
                .and_then(|g| g.pins.clone())
                .unwrap_or_default(),
        };

        let youtube = YoutubeConfig {
            channel: std::env::var(ENV_YOUTUBE_CHANNEL)
                .ok()
                .or_else(|| file.youtube.as_ref().and_then(|y| y.channel.clone())),
            api_key: std::env::var(ENV_YOUTUBE_API_KEY)
                .ok()
                .or_else(|| file.youtube.as_ref().and_then(|y| y.api_key.clone())),
        };

        let sawthat = SawthatConfig {
            id: std::env::var(ENV_SAWTHAT_ID)
                .ok()
                .or_else(|| file.sawthat.as_ref().and_then(|s| s.id.clone())),
        };

        let cache = CacheConfig {
            path: file
                .cache
                .and_then(|c| c.path)
                .unwrap_or_else(|| PathBuf::from(cache::DEFAULT_PATH)),
        };

        Ok(Self {
            github,
            youtube,
            sawthat,
            cache,
        })
    }
}

/// Default config file location, relative to where the build runs.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("folio.toml")
}

fn read_config_file(path: Option<&Path>) -> Result<ConfigFile, FetchError> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (default_config_path(), false),
    };

    if !path.exists() {
        if required {
            return Err(FetchError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(ConfigFile::default());
    }

    let contents = std::fs::read_to_string(&path)?;
    toml::from_str(&contents)
        .map_err(|e| FetchError::config(format!("Invalid config {}: {e}", path.display())))
}

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Built-in default value.
    Default,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each configurable value, for `folio config show`.
#[derive(Debug)]
pub struct ConfigSources {
    pub github_owner: ValueSource,
    pub github_pins: ValueSource,
    pub youtube_channel: ValueSource,
    pub youtube_api_key: ValueSource,
    pub sawthat_id: ValueSource,
    pub cache_path: ValueSource,
}

/// Determine where each value is coming from without failing on a bad file.
pub fn config_sources(path: Option<&Path>) -> ConfigSources {
    let file = read_config_file(path).unwrap_or_default();

    let github_owner = if std::env::var(ENV_GITHUB_OWNER).is_ok() {
        ValueSource::EnvVar(ENV_GITHUB_OWNER)
    } else if file.github.as_ref().and_then(|g| g.owner.as_ref()).is_some() {
        ValueSource::ConfigFile
    } else {
        ValueSource::Missing
    };

    let github_pins = if file.github.as_ref().and_then(|g| g.pins.as_ref()).is_some() {
        ValueSource::ConfigFile
    } else {
        ValueSource::Default
    };

    let youtube_channel = if std::env::var(ENV_YOUTUBE_CHANNEL).is_ok() {
        ValueSource::EnvVar(ENV_YOUTUBE_CHANNEL)
    } else if file
        .youtube
        .as_ref()
        .and_then(|y| y.channel.as_ref())
        .is_some()
    {
        ValueSource::ConfigFile
    } else {
        ValueSource::Missing
    };

    let youtube_api_key = if std::env::var(ENV_YOUTUBE_API_KEY).is_ok() {
        ValueSource::EnvVar(ENV_YOUTUBE_API_KEY)
    } else if file
        .youtube
        .as_ref()
        .and_then(|y| y.api_key.as_ref())
        .is_some()
    {
        ValueSource::ConfigFile
    } else {
        ValueSource::Missing
    };

    let sawthat_id = if std::env::var(ENV_SAWTHAT_ID).is_ok() {
        ValueSource::EnvVar(ENV_SAWTHAT_ID)
    } else if file.sawthat.as_ref().and_then(|s| s.id.as_ref()).is_some() {
        ValueSource::ConfigFile
    } else {
        ValueSource::Missing
    };

    let cache_path = if file.cache.as_ref().and_then(|c| c.path.as_ref()).is_some() {
        ValueSource::ConfigFile
    } else {
        ValueSource::Default
    };

    ConfigSources {
        github_owner,
        github_pins,
        youtube_channel,
        youtube_api_key,
        sawthat_id,
        cache_path,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
