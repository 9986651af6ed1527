//! Configuration for p2pkh-consensus
//!
//! Provides the few tunable parameters of script validation. Settings can be
//! deserialized from a config file, loaded from environment variables, or
//! passed programmatically.

use crate::constants::MAX_STACK_SIZE;
use serde::{Deserialize, Serialize};

/// Script interpreter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Maximum number of items on the script stack
    /// Default: 10
    #[serde(default = "default_max_stack_size")]
    pub max_stack_size: usize,
}

fn default_max_stack_size() -> usize {
    MAX_STACK_SIZE
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            max_stack_size: MAX_STACK_SIZE,
        }
    }
}

/// Input validation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ValidationConfig {
    /// Require the input's previous output hash to equal the txid of the
    /// supplied previous transaction
    /// Default: false
    #[serde(default = "default_false")]
    pub check_prevout_txid: bool,
}

/// Debug and development configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DebugConfig {
    /// Log every rejected input at WARN level
    /// Default: false
    #[serde(default = "default_false")]
    pub log_rejections: bool,
}

fn default_false() -> bool {
    false
}

/// Complete consensus configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConsensusConfig {
    #[serde(default)]
    pub script: ScriptConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

impl ConsensusConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables follow the pattern: `P2PKH_CONSENSUS_<SECTION>_<KEY>`
    ///
    /// Examples:
    /// - `P2PKH_CONSENSUS_SCRIPT_MAX_STACK_SIZE=32`
    /// - `P2PKH_CONSENSUS_VALIDATION_CHECK_PREVOUT_TXID=true`
    /// - `P2PKH_CONSENSUS_DEBUG_LOG_REJECTIONS=true`
    ///
    /// Unparseable values are ignored and leave the default in place.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("P2PKH_CONSENSUS_SCRIPT_MAX_STACK_SIZE") {
            if let Ok(size) = val.parse::<usize>() {
                config.script.max_stack_size = size;
            }
        }

        if let Ok(val) = std::env::var("P2PKH_CONSENSUS_VALIDATION_CHECK_PREVOUT_TXID") {
            if let Ok(enabled) = val.parse::<bool>() {
                config.validation.check_prevout_txid = enabled;
            }
        }

        if let Ok(val) = std::env::var("P2PKH_CONSENSUS_DEBUG_LOG_REJECTIONS") {
            if let Ok(enabled) = val.parse::<bool>() {
                config.debug.log_rejections = enabled;
            }
        }

        config
    }
}

/// Global consensus configuration instance
static GLOBAL_CONSENSUS_CONFIG: std::sync::OnceLock<ConsensusConfig> = std::sync::OnceLock::new();

/// Initialize global consensus configuration
///
/// Call once at startup, before any validation. Returns the rejected config
/// if one was already installed.
pub fn init_consensus_config(config: ConsensusConfig) -> Result<(), ConsensusConfig> {
    GLOBAL_CONSENSUS_CONFIG.set(config)
}

/// Get global consensus configuration
///
/// Returns the global config if initialized, otherwise loads it from the environment.
pub fn get_consensus_config() -> ConsensusConfig {
    GLOBAL_CONSENSUS_CONFIG
        .get()
        .cloned()
        .unwrap_or_else(ConsensusConfig::from_env)
}
