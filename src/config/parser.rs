use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Command-line values that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub seed: Option<String>,
    pub search_first: Option<String>,
    pub max_items: Option<u32>,
    pub max_breadth: Option<u32>,
    pub max_depth: Option<u32>,
    pub silent: bool,
    pub keep_endnodes: bool,
}

impl ConfigOverrides {
    /// Applies every set override to the configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(seed) = &self.seed {
            config.crawler.seed = seed.clone();
        }
        if let Some(order) = &self.search_first {
            config.crawler.search_first = order.clone();
        }
        if let Some(max_items) = self.max_items {
            config.crawler.max_items = max_items;
        }
        if let Some(max_breadth) = self.max_breadth {
            config.crawler.max_breadth = max_breadth;
        }
        if let Some(max_depth) = self.max_depth {
            config.crawler.max_depth = max_depth;
        }
        if self.silent {
            config.crawler.silent = true;
        }
        if self.keep_endnodes {
            config.output.keep_endnodes = true;
        }
    }
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use wiki_mapper::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Seed: {}", config.crawler.seed);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_overrides(path, &ConfigOverrides::default())
}

/// Loads a configuration, applies command-line overrides, then validates it
pub fn load_config_with_overrides(
    path: &Path,
    overrides: &ConfigOverrides,
) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;

    overrides.apply(&mut config);
    validate(&config)?;

    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// The hash identifies which configuration produced a given graph export.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(
    path: &Path,
    overrides: &ConfigOverrides,
) -> Result<(Config, String), ConfigError> {
    let config = load_config_with_overrides(path, overrides)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
