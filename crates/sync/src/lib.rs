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
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod batch;
mod factory;
mod fields;
mod operation;

pub use batch::*;
pub use factory::*;
pub use fields::*;
pub use operation::*;

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("serialization error: {0}")]
	Serialization(#[from] rmp_serde::encode::Error),
	#[error("deserialization error: {0}")]
	Deserialization(#[from] rmp_serde::decode::Error),
	#[error("write operation <id={id}> has no operation data")]
	MissingOperationData { id: OperationId },
	#[error("unknown model name: {0}")]
	UnknownModel(String),
	#[error("operations are not sorted newest first: <id={current}> follows <id={previous}>")]
	UnorderedBatch {
		previous: OperationId,
		current: OperationId,
	},
	#[error("duplicate operation id: {0}")]
	DuplicateOperationId(OperationId),
	#[error("more than one unlink operation for {0}")]
	MultipleUnlinks(RecordKey),
	#[error("unlink operation <id={unlink_id}> for {key} is older than operation <id={newer_id}>")]
	UnlinkNotMostRecent {
		key: RecordKey,
		unlink_id: OperationId,
		newer_id: OperationId,
	},
}
