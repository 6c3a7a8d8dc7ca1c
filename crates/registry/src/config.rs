//! Registry configuration.
//!
//! ```toml
//! strategy = "eager"
//! max_depth = 32
//! max_sources = 1024
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// When resolution happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveStrategy {
	/// Resolve on first lookup or instantiation.
	#[default]
	Lazy,
	/// Resolve during registration; a failed resolution rolls the registration back.
	Eager,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	pub strategy: ResolveStrategy,
	/// Maximum ancestor nesting depth before resolution gives up.
	pub max_depth: usize,
	/// Maximum length of one linearized source list. Repeated ancestors are kept,
	/// so diamond-shaped graphs grow quickly without this bound.
	pub max_sources: usize,
}

impl RegistryConfig {
	pub const DEFAULT_MAX_DEPTH: usize = 64;
	pub const DEFAULT_MAX_SOURCES: usize = 4096;

	pub fn eager() -> Self {
		Self {
			strategy: ResolveStrategy::Eager,
			..Self::default()
		}
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	pub fn with_max_sources(mut self, max_sources: usize) -> Self {
		self.max_sources = max_sources;
		self
	}

	/// Parses and validates a TOML document. Missing keys take their defaults.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_depth == 0 {
			return Err(ConfigError::ZeroDepth);
		}
		if self.max_sources == 0 {
			return Err(ConfigError::ZeroSources);
		}
		Ok(())
	}
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			strategy: ResolveStrategy::Lazy,
			max_depth: Self::DEFAULT_MAX_DEPTH,
			max_sources: Self::DEFAULT_MAX_SOURCES,
		}
	}
}
