use crate::{Error, FieldValues};

use std::fmt;

use serde::{Deserialize, Serialize};

pub type OperationId = i64;
pub type RecordId = i64;
pub type TemplateId = i64;

const CREATE_RECORD: i32 = 1;
const WRITE_RECORD: i32 = 2;
const UNLINK_RECORD: i32 = 3;

/// The product tables whose changes are recorded as operations.
#[derive(
	Serialize,
	Deserialize,
	Clone,
	Copy,
	Debug,
	PartialEq,
	Eq,
	Hash,
	PartialOrd,
	Ord,
	strum_macros::Display,
	strum_macros::EnumString,
	strum_macros::AsRefStr,
)]
pub enum ModelName {
	#[serde(rename = "product.template")]
	#[strum(serialize = "product.template")]
	ProductTemplate,
	#[serde(rename = "product.product")]
	#[strum(serialize = "product.product")]
	ProductProduct,
}

impl ModelName {
	pub fn parse(name: &str) -> Result<Self, Error> {
		name.parse()
			.map_err(|_: strum::ParseError| Error::UnknownModel(name.to_string()))
	}
}

/// Identifies one product record across operations.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
	pub model_name: ModelName,
	pub record_id: RecordId,
}

impl RecordKey {
	#[must_use]
	pub const fn new(model_name: ModelName, record_id: RecordId) -> Self {
		Self {
			model_name,
			record_id,
		}
	}

	#[must_use]
	pub const fn template(record_id: RecordId) -> Self {
		Self::new(ModelName::ProductTemplate, record_id)
	}

	#[must_use]
	pub const fn variant(record_id: RecordId) -> Self {
		Self::new(ModelName::ProductProduct, record_id)
	}
}

impl fmt::Display for RecordKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<model={}, record_id={}>", self.model_name, self.record_id)
	}
}

/// Kind of change recorded against a product.
///
/// Codes outside the known set are kept as [`OperationType::Unknown`] instead of
/// failing to load, so the transformer can report and drop them.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(from = "i32", into = "i32")]
pub enum OperationType {
	Create,
	Write,
	Unlink,
	Unknown(i32),
}

impl From<i32> for OperationType {
	fn from(code: i32) -> Self {
		match code {
			CREATE_RECORD => Self::Create,
			WRITE_RECORD => Self::Write,
			UNLINK_RECORD => Self::Unlink,
			other => Self::Unknown(other),
		}
	}
}

impl From<OperationType> for i32 {
	fn from(typ: OperationType) -> Self {
		match typ {
			OperationType::Create => CREATE_RECORD,
			OperationType::Write => WRITE_RECORD,
			OperationType::Unlink => UNLINK_RECORD,
			OperationType::Unknown(code) => code,
		}
	}
}

impl fmt::Display for OperationType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Create => f.write_str("create"),
			Self::Write => f.write_str("write"),
			Self::Unlink => f.write_str("unlink"),
			Self::Unknown(code) => write!(f, "unknown({code})"),
		}
	}
}

/// A single recorded change against a product template or variant.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Operation {
	pub id: OperationId,
	pub model_name: ModelName,
	pub record_id: RecordId,
	pub template_id: TemplateId,
	pub operation_type: OperationType,
	/// msgpack encoded [`FieldValues`], only meaningful for writes
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub operation_data: Option<Vec<u8>>,
}

impl Operation {
	#[must_use]
	pub const fn key(&self) -> RecordKey {
		RecordKey::new(self.model_name, self.record_id)
	}

	#[must_use]
	pub fn is_unlink(&self) -> bool {
		self.operation_type == OperationType::Unlink
	}

	#[must_use]
	pub fn is_create(&self) -> bool {
		self.operation_type == OperationType::Create
	}

	#[must_use]
	pub fn is_write(&self) -> bool {
		self.operation_type == OperationType::Write
	}

	/// Decodes the field values carried by this operation.
	///
	/// Writes must carry a payload; other operation types without one yield `None`.
	pub fn values(&self) -> Result<Option<FieldValues>, Error> {
		match &self.operation_data {
			Some(bytes) => FieldValues::decode(bytes).map(Some),
			None if self.is_write() => Err(Error::MissingOperationData { id: self.id }),
			None => Ok(None),
		}
	}

	/// Like [`Operation::values`], but a missing payload is always an error.
	pub fn write_values(&self) -> Result<FieldValues, Error> {
		self.values()?
			.ok_or(Error::MissingOperationData { id: self.id })
	}
}

impl fmt::Debug for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Operation")
			.field("id", &self.id)
			.field("model_name", &self.model_name.as_ref())
			.field("record_id", &self.record_id)
			.field("template_id", &self.template_id)
			.field("operation_type", &self.operation_type.to_string())
			.field(
				"operation_data",
				&self.operation_data.as_ref().map(Vec::len),
			)
			.finish()
	}
}
