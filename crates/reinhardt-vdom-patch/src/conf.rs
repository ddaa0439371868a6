//! Patch settings.
//!
//! Settings are plain serde structs loaded from TOML. Every key is optional;
//! missing keys take their defaults.
//!
//! ```toml
//! silent = false
//! host-profile = "legacy-edge"
//! warn-unresolved-directives = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Host engine quirks the attribute and event modules compensate for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostProfile {
	/// A standards-compliant host.
	#[default]
	Standard,
	/// Internet Explorer 9-11.
	LegacyIe,
	/// EdgeHTML-based Edge.
	LegacyEdge,
}

impl HostProfile {
	/// Whether a changed `value` attribute has to be written again after the
	/// regular diff.
	pub fn forces_value_resync(self) -> bool {
		matches!(self, HostProfile::LegacyIe | HostProfile::LegacyEdge)
	}

	/// Event a range input reports value changes through.
	pub fn range_input_event(self) -> &'static str {
		match self {
			HostProfile::LegacyIe => "change",
			HostProfile::Standard | HostProfile::LegacyEdge => "input",
		}
	}
}

/// Settings consumed by the patch modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PatchSettings {
	/// Suppress warnings and error logs.
	pub silent: bool,
	pub host_profile: HostProfile,
	/// Warn when a bound directive has no registered definition.
	pub warn_unresolved_directives: bool,
}

impl Default for PatchSettings {
	fn default() -> Self {
		Self {
			silent: false,
			host_profile: HostProfile::Standard,
			warn_unresolved_directives: true,
		}
	}
}

impl PatchSettings {
	pub fn with_host_profile(mut self, profile: HostProfile) -> Self {
		self.host_profile = profile;
		self
	}

	pub fn with_silent(mut self, silent: bool) -> Self {
		self.silent = silent;
		self
	}

	/// Parses settings from TOML text.
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(content)?)
	}

	/// Loads settings from a TOML file.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read or parsed.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&content)
	}
}
