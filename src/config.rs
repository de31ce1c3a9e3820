use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Index service connection
    pub elastic: ElasticConfig,

    /// Loader defaults
    #[serde(default)]
    pub loader: LoaderDefaults,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var("GENOMIC_SEARCH_CONFIG")
            .unwrap_or_else(|_| "config/genomic-search.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: GENOMIC_SEARCH__)
            .add_source(
                config::Environment::with_prefix("GENOMIC_SEARCH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            elastic: ElasticConfig::default(),
            loader: LoaderDefaults::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticConfig {
    /// Base URL of the index service
    #[serde(default = "default_elastic_url")]
    pub url: String,

    /// Index used when a command does not name one
    #[serde(default = "default_index")]
    pub default_index: String,

    /// Request timeout (seconds)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ElasticConfig {
    fn default() -> Self {
        Self {
            url: default_elastic_url(),
            default_index: default_index(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderDefaults {
    /// Column delimiter for input files
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Documents per bulk request; unset means the dataset's own default
    #[serde(default)]
    pub batch_size: Option<usize>,
}

impl Default for LoaderDefaults {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            batch_size: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Default log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON formatted logs
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_elastic_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_index() -> String {
    "genomic".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_delimiter() -> String {
    "\t".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
