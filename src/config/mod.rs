use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::cli::Cli;
use crate::generator::ExpandLimits;

/// Prefix for environment overrides, e.g. `FLAPI__SERVER__PORT=8080`.
const ENV_PREFIX: &str = "FLAPI";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Limits and defaults for `/gen` requests.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct GenerationSettings {
    /// Number of documents when the request does not say.
    #[serde(default = "default_amount")]
    pub default_amount: usize,
    /// Largest accepted `amount` query parameter.
    #[serde(default = "default_max_amount")]
    pub max_amount: usize,
    /// Largest honoured `_$amount` repetition.
    #[serde(default = "default_max_repeat")]
    pub max_repeat: usize,
    /// Largest honoured `amount` inside a `list-` directive.
    #[serde(default = "default_max_list_amount")]
    pub max_list_amount: usize,
    /// Largest honoured `len`/`words` size parameter.
    #[serde(default = "default_max_len")]
    pub max_len: usize,
    /// Repeated instances allowed per request across all nesting levels.
    #[serde(default = "default_max_repeated_objects")]
    pub max_repeated_objects: usize,
    /// Fixed seed for every request that does not pass its own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_amount() -> usize {
    1
}

fn default_max_amount() -> usize {
    100
}

fn default_max_repeat() -> usize {
    100
}

fn default_max_list_amount() -> usize {
    100
}

fn default_max_len() -> usize {
    1000
}

fn default_max_repeated_objects() -> usize {
    10_000
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            default_amount: default_amount(),
            max_amount: default_max_amount(),
            max_repeat: default_max_repeat(),
            max_list_amount: default_max_list_amount(),
            max_len: default_max_len(),
            max_repeated_objects: default_max_repeated_objects(),
            seed: None,
        }
    }
}

impl GenerationSettings {
    pub fn limits(&self) -> ExpandLimits {
        ExpandLimits {
            max_repeat: self.max_repeat,
            max_list_amount: self.max_list_amount,
            max_len: self.max_len,
            max_repeated_objects: self.max_repeated_objects,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub requests_per_second: u32,
    pub burst_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            generation: GenerationSettings::default(),
            rate_limit: None,
        }
    }
}

impl Settings {
    /// Create settings from CLI arguments (config file, env, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Load `<root>/flapi.{toml,yaml,json}` if present, plus env overrides.
    pub fn from_root(root: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let settings = Self::load(&root.as_ref().join("flapi"))?;
        settings.validate()?;
        Ok(settings)
    }

    fn load(config_path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .build()?;

        Ok(s.try_deserialize()?)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(seed) = cli.seed {
            self.generation.seed = Some(seed);
        }
        if let Some(max_amount) = cli.max_amount {
            self.generation.max_amount = max_amount;
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }
}
