//! Transformer configuration

use crate::Error;

use amdeb_sync::{Operation, OperationBatch};

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const CONFIG_VERSION: u32 = 1;

/// How pending operations are turned into an [`OperationBatch`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderingPolicy {
	/// Operations must already be newest first; anything else is rejected
	#[default]
	Validate,
	/// Operations are sorted newest first before validation
	Sort,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransformerConfig {
	/// Config schema version
	pub version: u32,

	#[serde(default)]
	pub ordering: OrderingPolicy,
}

impl Default for TransformerConfig {
	fn default() -> Self {
		Self {
			version: CONFIG_VERSION,
			ordering: OrderingPolicy::default(),
		}
	}
}

impl TransformerConfig {
	/// Loads the config from a JSON file, falling back to defaults when the file
	/// doesn't exist.
	pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Error> {
		let path = path.as_ref();

		let json = match fs::read_to_string(path) {
			Ok(json) => json,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				warn!(path = %path.display(), "No transformer config found, using defaults");
				return Ok(Self::default());
			}
			Err(source) => {
				return Err(Error::ConfigIO {
					path: path.into(),
					source,
				})
			}
		};

		info!(path = %path.display(), "Loading transformer config");
		let config: Self = serde_json::from_str(&json)?;

		if config.version > CONFIG_VERSION {
			warn!(
				version = config.version,
				supported = CONFIG_VERSION,
				"Transformer config is newer than this build supports"
			);
		}

		Ok(config)
	}

	pub fn prepare_batch(&self, ops: Vec<Operation>) -> Result<OperationBatch, Error> {
		let batch = match self.ordering {
			OrderingPolicy::Validate => OperationBatch::new(ops),
			OrderingPolicy::Sort => OperationBatch::sorted(ops),
		}?;

		Ok(batch)
	}
}
