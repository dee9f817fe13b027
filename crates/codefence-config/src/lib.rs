//! Codefence Config
//!
//! This crate handles configuration loading and management
//! for codefence, supporting TOML configuration files.
//!
//! # Overview
//!
//! Configuration is loaded from platform-specific locations:
//! - Linux: `~/.config/codefence/config.toml`
//! - macOS: `~/Library/Application Support/codefence/config.toml`
//! - Windows: `%APPDATA%\codefence\config.toml`
//!
//! # Example
//!
//! ```no_run
//! use codefence_config::Config;
//!
//! // Load config with defaults
//! let config = Config::load().unwrap();
//!
//! // Or load with an override file
//! let config = Config::load_with_override(Some("./custom.toml")).unwrap();
//! ```

mod features;
mod output;
mod rewrite;

pub use features::FeaturesConfig;
pub use output::{OutputConfig, ResolverConfig};
pub use rewrite::{RewriteRule, RewriteScope};

use codefence_core::{CodefenceError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default TOML configuration string.
const DEFAULT_TOML: &str = r#"[features]
ChunkSize  = 0
Annotate   = false
ExpandTabs = false
TabWidth   = 4

[output]
Dir       = ""
Overwrite = false

[resolver]
Root             = "."
AllowOutsideRoot = false

# [[rewrite]]
# Prefix      = "$ "
# Replacement = ""
# Scope       = "code"
"#;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Feature flags configuration
    #[serde(default)]
    pub features: FeaturesConfig,

    /// Block output
    #[serde(default)]
    pub output: OutputConfig,

    /// Marker path resolution
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Line rewrite rules, applied in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rewrite: Vec<RewriteRule>,
}

impl Default for Config {
    fn default() -> Self {
        // Parse the default TOML to ensure consistency
        toml::from_str(DEFAULT_TOML).expect("Default TOML should be valid")
    }
}

impl Config {
    /// Returns the default TOML configuration string.
    ///
    /// # Example
    ///
    /// ```
    /// use codefence_config::Config;
    /// let toml = Config::default_toml();
    /// assert!(toml.contains("[features]"));
    /// assert!(toml.contains("[resolver]"));
    /// ```
    pub fn default_toml() -> &'static str {
        DEFAULT_TOML
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "codefence")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Load configuration from the default platform-specific path.
    ///
    /// If no config file exists, returns the default configuration.
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CodefenceError::Config(format!("Parse error in {}: {}", path.display(), e)))
    }

    /// Load configuration with an optional override file or string.
    ///
    /// 1. Load the base config from the default location
    /// 2. If `override_config` names an existing file, load and merge it;
    ///    otherwise parse it as inline TOML and merge that
    ///
    /// # Example
    ///
    /// ```no_run
    /// use codefence_config::Config;
    ///
    /// // Load with file override
    /// let config = Config::load_with_override(Some("./custom.toml")).unwrap();
    ///
    /// // Load with inline TOML override
    /// let config = Config::load_with_override(Some("[features]\nAnnotate = true")).unwrap();
    /// ```
    pub fn load_with_override(override_config: Option<&str>) -> Result<Self> {
        let mut config = Self::load()?;

        if let Some(override_str) = override_config {
            config.merge(&Self::parse_override(override_str)?);
        }

        Ok(config)
    }

    /// Parse an override given as a file path or inline TOML.
    pub fn parse_override(override_str: &str) -> Result<Self> {
        let override_path = Path::new(override_str);

        let override_toml = if override_path.is_file() {
            std::fs::read_to_string(override_path)?
        } else {
            override_str.to_string()
        };

        toml::from_str(&override_toml)
            .map_err(|e| CodefenceError::Config(format!("Override parse error: {}", e)))
    }

    /// Merge another config into this one.
    ///
    /// Values from `other` take precedence over values in `self`. Rewrite
    /// rules from `other` are appended.
    ///
    /// # Example
    ///
    /// ```
    /// use codefence_config::Config;
    ///
    /// let mut base = Config::default();
    /// let override_config: Config = toml::from_str(r#"
    ///     [features]
    ///     Annotate = true
    /// "#).unwrap();
    ///
    /// base.merge(&override_config);
    /// assert!(base.features.annotate);
    /// ```
    pub fn merge(&mut self, other: &Config) {
        self.features.merge(&other.features);
        self.output.merge(&other.output);
        self.resolver.merge(&other.resolver);
        self.rewrite.extend(other.rewrite.iter().cloned());
    }

    /// Render this configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CodefenceError::Config(format!("Serialization error: {}", e)))
    }
}
