//! Resolver configuration.
//!
//! Configuration is format-neutral; TOML parsing is provided for hosts that keep resolver
//! settings alongside their own config files:
//!
//! ```toml
//! max_depth = 64
//! default_algorithm = "dfs"
//! ```

use serde::Deserialize;

/// Depth at which resolution gives up and reports recursive inheritance.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Algorithm selected for classes that never called `set_algorithm`.
pub const DEFAULT_ALGORITHM: &str = "c3";

/// Tunables for a [`crate::ResolverContext`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MroConfig {
	/// Deepest ancestor level that may be resolved before failing.
	pub max_depth: usize,
	/// Algorithm name selected for new classes.
	pub default_algorithm: String,
}

impl Default for MroConfig {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			default_algorithm: DEFAULT_ALGORITHM.to_string(),
		}
	}
}

impl MroConfig {
	/// Parses and validates a TOML document. Missing keys take their defaults.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: MroConfig = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Rejects values no resolver can work with.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_depth == 0 {
			return Err(ConfigError::InvalidValue {
				key: "max_depth",
				reason: "must be at least 1".to_string(),
			});
		}
		if self.default_algorithm.trim().is_empty() {
			return Err(ConfigError::InvalidValue {
				key: "default_algorithm",
				reason: "must name a registered algorithm".to_string(),
			});
		}
		Ok(())
	}
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or types.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// A value parsed but is out of range.
	#[error("invalid value for '{key}': {reason}")]
	InvalidValue { key: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_uses_defaults() {
		let config = MroConfig::from_toml_str("").unwrap();
		assert_eq!(config, MroConfig::default());
		assert_eq!(config.max_depth, 100);
		assert_eq!(config.default_algorithm, "c3");
	}

	#[test]
	fn partial_document_overrides_keys() {
		let config = MroConfig::from_toml_str("default_algorithm = \"dfs\"").unwrap();
		assert_eq!(config.default_algorithm, "dfs");
		assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
	}

	#[test]
	fn unknown_keys_are_rejected() {
		let err = MroConfig::from_toml_str("max_dpeth = 3").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
	}

	#[test]
	fn zero_depth_is_invalid() {
		let err = MroConfig::from_toml_str("max_depth = 0").unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { key: "max_depth", .. }));
	}

	#[test]
	fn blank_algorithm_is_invalid() {
		let err = MroConfig::from_toml_str("default_algorithm = \"  \"").unwrap_err();
		assert!(matches!(
			err,
			ConfigError::InvalidValue {
				key: "default_algorithm",
				..
			}
		));
	}
}
