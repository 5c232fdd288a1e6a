// Client configuration.
//
// The endpoint template is resolved in this order:
// 1. `TVAC_VARIANT_ENDPOINT` environment variable
// 2. `variant_endpoint` in `<config dir>/tvac/config.toml`
// 3. the public Ensembl VEP endpoint
//
// A missing or broken config file is not an error; we log and fall
// through to the next source.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const ENDPOINT_ENV_VAR: &str = "TVAC_VARIANT_ENDPOINT";
pub const DEFAULT_VARIANT_ENDPOINT: &str = "http://rest.ensembl.org/vep/human/hgvs/{variant}";

/// Placeholder substituted with the variant identifier.
pub const VARIANT_PLACEHOLDER: &str = "{variant}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL template containing exactly one `{variant}`.
    pub variant_endpoint: String,
}

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    variant_endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant_endpoint: DEFAULT_VARIANT_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    /// Resolve configuration from the process environment and the
    /// user's config directory.
    pub fn load() -> Self {
        Self::resolve(std::env::var(ENDPOINT_ENV_VAR).ok(), default_config_path().as_deref())
    }

    /// Resolution with explicit inputs, so callers and tests do not
    /// depend on the real environment.
    pub fn resolve(env_endpoint: Option<String>, config_path: Option<&Path>) -> Self {
        if let Some(endpoint) = env_endpoint.filter(|e| !e.trim().is_empty()) {
            debug!("Using variant endpoint from {}", ENDPOINT_ENV_VAR);
            return Self {
                variant_endpoint: endpoint,
            };
        }

        if let Some(path) = config_path {
            if let Some(config) = read_config_file(path) {
                debug!("Using variant endpoint from {}", path.display());
                return config;
            }
        }

        Self::default()
    }

    /// Parse a `config.toml` body. `None` when it sets no endpoint.
    pub fn from_toml_str(content: &str) -> Result<Option<Self>, toml::de::Error> {
        let parsed: TomlConfig = toml::from_str(content)?;
        Ok(parsed
            .variant_endpoint
            .map(|variant_endpoint| Self { variant_endpoint }))
    }
}

/// `~/.config/tvac/config.toml` on Linux, the platform equivalent elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tvac").join("config.toml"))
}

fn read_config_file(path: &Path) -> Option<Config> {
    if !path.exists() {
        return None;
    }
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Could not read config file {}: {}", path.display(), e);
            return None;
        }
    };
    match Config::from_toml_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring invalid config file {}: {}", path.display(), e);
            None
        }
    }
}
