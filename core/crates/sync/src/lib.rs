#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::dbg_macro,
	deprecated
)]
#![forbid(deprecated_in_future)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

use std::path::Path;

mod config;
mod merge;
mod transformer;
mod transformers;

pub use config::{OrderingPolicy, TransformerConfig, CONFIG_VERSION};
pub use merge::merge_writes;
pub use transformer::{ProductOperationTransformer, TransformSummary};
pub use transformers::{CreateTransformer, Transformers, UnlinkTransformer, WriteTransformer};

pub use amdeb_product_access::{MemoryProductStore, ProductAccess, ProductRecord};
pub use amdeb_sync::{
	FieldValues, ModelName, Operation, OperationBatch, OperationFactory, OperationId,
	OperationType, ProductField, RecordId, RecordKey,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("sync error: {0}")]
	Sync(#[from] amdeb_sync::Error),
	#[error("config file I/O error: {source}; path: '{}'", .path.display())]
	ConfigIO {
		path: Box<Path>,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid config file: {0}")]
	ConfigParse(#[from] serde_json::Error),
}
