//! Classifier configuration.
//!
//! Defaults match a typical checkout lane: lines end with `Enter`, `Backspace`
//! edits, and weights above 100 kg are not plausible scale readings.

use std::collections::BTreeSet;
use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::CharClass;

/// Default upper plausibility bound for a weight reading.
pub const DEFAULT_MAX_WEIGHT_KG: f64 = 100.0;

const ENV_MAX_WEIGHT: &str = "PDV_SCANNER_MAX_WEIGHT_KG";
const ENV_IDLE_RESET: &str = "PDV_SCANNER_IDLE_RESET_MS";

/// Classifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Weights must be strictly below this many kg.
    pub max_weight_kg: f64,
    /// Keys that complete a line.
    pub terminator_keys: BTreeSet<String>,
    /// Keys that delete the last buffered character.
    pub edit_keys: BTreeSet<String>,
    /// Character classes accepted into the buffer.
    pub accepted_chars: CharClass,
    /// Clear a stale buffer when the gap between keystrokes exceeds this.
    /// `None` disables the timer entirely.
    #[serde(with = "millis")]
    pub idle_reset: Option<Duration>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_weight_kg: DEFAULT_MAX_WEIGHT_KG,
            terminator_keys: BTreeSet::from(["Enter".to_string()]),
            edit_keys: BTreeSet::from(["Backspace".to_string()]),
            accepted_chars: CharClass::default(),
            idle_reset: None,
        }
    }
}

impl ClassifierConfig {
    pub fn with_max_weight_kg(mut self, max_weight_kg: f64) -> Self {
        self.max_weight_kg = max_weight_kg;
        self
    }

    pub fn with_idle_reset(mut self, idle_reset: Duration) -> Self {
        self.idle_reset = Some(idle_reset);
        self
    }

    pub fn with_accepted_chars(mut self, accepted_chars: CharClass) -> Self {
        self.accepted_chars = accepted_chars;
        self
    }

    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables on top of the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_MAX_WEIGHT) {
            config.max_weight_kg = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_MAX_WEIGHT,
                value: value.clone(),
            })?;
        }

        if let Some(value) = lookup(ENV_IDLE_RESET) {
            let ms: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_IDLE_RESET,
                value: value.clone(),
            })?;
            // 0 disables the timer
            config.idle_reset = (ms > 0).then(|| Duration::from_millis(ms));
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the classifier relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_weight_kg.is_finite() || self.max_weight_kg <= 0.0 {
            return Err(ConfigError::InvalidMaxWeight(self.max_weight_kg));
        }
        if self.terminator_keys.is_empty() {
            return Err(ConfigError::NoTerminator);
        }
        if let Some(key) = self.terminator_keys.intersection(&self.edit_keys).next() {
            return Err(ConfigError::OverlappingKeys { key: key.clone() });
        }
        Ok(())
    }

    pub fn is_terminator(&self, key: &str) -> bool {
        self.terminator_keys.contains(key)
    }

    pub fn is_edit(&self, key: &str) -> bool {
        self.edit_keys.contains(key)
    }
}

/// `Option<Duration>` as an optional integer number of milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{ser, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(duration) => {
                let ms = u64::try_from(duration.as_millis()).map_err(|_| {
                    ser::Error::custom(format!("idle reset of {duration:?} overflows u64 ms"))
                })?;
                serializer.serialize_some(&ms)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ms = Option::<u64>::deserialize(deserializer)?;
        Ok(ms.filter(|ms| *ms > 0).map(Duration::from_millis))
    }
}

// =============================================================================
// TESTS
// =============================================================================
