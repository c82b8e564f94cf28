use kittens_bot::bot::DANGER_THRESHOLD;
use kittens_bot::{BotFeatures, BotParams, BotVariant};
use kittens_core::profile::ProfileRegistry;
use serde::Deserialize;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";
const DEFAULT_OUTPUT_DIR: &str = "bench/out/{run_id}";

/// Root harness configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BenchConfig {
    pub run_id: String,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BenchConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: BenchConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.bot.validate()?;
        self.logging.normalize();
        Ok(())
    }

    pub fn output_dir(&self) -> PathBuf {
        let template = self
            .logging
            .output_dir
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_DIR);
        resolve_template(&self.run_id, template)
    }
}

/// How the bot under test is built.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BotConfig {
    #[serde(default = "default_variant")]
    pub variant: String,
    #[serde(default)]
    pub seed: u64,
    /// Required before the harness hands the bot a state probe.
    #[serde(default)]
    pub trusted_debug_access: bool,
    #[serde(default)]
    pub params: ParamsConfig,
    /// Registry JSON written by `kittens-bench profile`.
    #[serde(default)]
    pub profiles: Option<PathBuf>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            seed: 0,
            trusted_debug_access: false,
            params: ParamsConfig::default(),
            profiles: None,
        }
    }
}

impl BotConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let variant = self.variant()?;
        if variant == BotVariant::Omniscient && !self.trusted_debug_access {
            return Err(ValidationError::InvalidField {
                field: "bot.variant".to_string(),
                message: "omniscient variant requires bot.trusted_debug_access".to_string(),
            });
        }
        self.params.validate()
    }

    pub fn variant(&self) -> Result<BotVariant, ValidationError> {
        self.variant
            .parse::<BotVariant>()
            .map_err(|err| ValidationError::InvalidField {
                field: "bot.variant".to_string(),
                message: err.to_string(),
            })
    }

    /// Features for the configured variant; unparsable variants fall back to fair.
    pub fn features(&self, decision_details: bool) -> BotFeatures {
        let threshold = self.params.danger_threshold.unwrap_or(DANGER_THRESHOLD);
        BotFeatures::new(self.variant().unwrap_or_default(), threshold)
            .with_decision_details(decision_details)
    }

    pub fn bot_params(&self) -> BotParams {
        self.params.apply(BotParams::default())
    }

    /// Empty registry when no profile file is configured.
    pub fn load_profiles(&self) -> Result<ProfileRegistry, ConfigError> {
        let Some(path) = self.profiles.as_ref() else {
            return Ok(ProfileRegistry::new());
        };
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            source,
            path: path.clone(),
        })?;
        ProfileRegistry::from_json(&raw).map_err(|source| ConfigError::Profiles {
            source,
            path: path.clone(),
        })
    }
}

fn default_variant() -> String {
    BotVariant::Fair.as_str().to_string()
}

/// Optional overrides on top of [`BotParams::default`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ParamsConfig {
    #[serde(default)]
    pub danger_threshold: Option<f32>,
    #[serde(default)]
    pub pair_min_target_cards: Option<usize>,
    #[serde(default)]
    pub veto_unlikely_below: Option<f32>,
    #[serde(default)]
    pub fragile_hand_size: Option<usize>,
    #[serde(default)]
    pub three_player_depth: Option<usize>,
    #[serde(default)]
    pub random_depth_min: Option<usize>,
    #[serde(default)]
    pub random_depth_max: Option<usize>,
}

impl ParamsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        for (label, value) in [
            ("bot.params.danger_threshold", self.danger_threshold),
            ("bot.params.veto_unlikely_below", self.veto_unlikely_below),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(ValidationError::InvalidField {
                        field: label.to_string(),
                        message: format!("threshold {value} must lie within [0, 1]"),
                    });
                }
            }
        }

        let params = self.apply(BotParams::default());
        if params.random_depth_min > params.random_depth_max {
            return Err(ValidationError::InvalidField {
                field: "bot.params.random_depth_min".to_string(),
                message: format!(
                    "random depth range {}..={} is empty",
                    params.random_depth_min, params.random_depth_max
                ),
            });
        }
        Ok(())
    }

    pub fn apply(&self, mut params: BotParams) -> BotParams {
        if let Some(value) = self.pair_min_target_cards {
            params.pair_min_target_cards = value;
        }
        if let Some(value) = self.veto_unlikely_below {
            params.veto_unlikely_below = value;
        }
        if let Some(value) = self.fragile_hand_size {
            params.fragile_hand_size = value;
        }
        if let Some(value) = self.three_player_depth {
            params.three_player_depth = value;
        }
        if let Some(value) = self.random_depth_min {
            params.random_depth_min = value;
        }
        if let Some(value) = self.random_depth_max {
            params.random_depth_max = value;
        }
        params
    }
}

/// Logging configuration defaults to human-readable stderr output.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    /// Directory for `telemetry.jsonl`; `{run_id}` is substituted.
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub decision_details: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            output_dir: None,
            decision_details: false,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self
            .output_dir
            .as_deref()
            .is_some_and(|dir| dir.trim().is_empty())
        {
            self.output_dir = None;
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

/// Errors surfaced when loading configuration, scenario or registry files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("failed to parse profile registry {path:?}: {source}")]
    Profiles {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Profiles { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
