use crate::{
	Error, FieldValues, ModelName, Operation, OperationId, OperationType, RecordId, RecordKey,
	TemplateId,
};

use std::sync::atomic::{AtomicI64, Ordering};

/// Builds product operations for the recording side.
///
/// Implementors only provide ids; ids must grow with every call so that batches
/// sorted by id are sorted by recency.
pub trait OperationFactory {
	fn next_id(&self) -> OperationId;

	fn new_op(
		&self,
		key: RecordKey,
		template_id: TemplateId,
		operation_type: OperationType,
		operation_data: Option<Vec<u8>>,
	) -> Operation {
		Operation {
			id: self.next_id(),
			model_name: key.model_name,
			record_id: key.record_id,
			template_id,
			operation_type,
			operation_data,
		}
	}

	fn create_op(&self, key: RecordKey, template_id: TemplateId) -> Operation {
		self.new_op(key, template_id, OperationType::Create, None)
	}

	fn write_op(
		&self,
		key: RecordKey,
		template_id: TemplateId,
		values: &FieldValues,
	) -> Result<Operation, Error> {
		Ok(self.new_op(
			key,
			template_id,
			OperationType::Write,
			Some(values.encode()?),
		))
	}

	fn unlink_op(&self, key: RecordKey, template_id: TemplateId) -> Operation {
		self.new_op(key, template_id, OperationType::Unlink, None)
	}

	/// Template operations reference themselves as their own template.
	fn template_write_op(
		&self,
		record_id: RecordId,
		values: &FieldValues,
	) -> Result<Operation, Error> {
		self.write_op(
			RecordKey::new(ModelName::ProductTemplate, record_id),
			record_id,
			values,
		)
	}
}

/// Hands out increasing operation ids starting after `last`.
#[derive(Debug, Default)]
pub struct SequentialIds {
	last: AtomicI64,
}

impl SequentialIds {
	#[must_use]
	pub const fn starting_after(last: OperationId) -> Self {
		Self {
			last: AtomicI64::new(last),
		}
	}
}

impl OperationFactory for SequentialIds {
	fn next_id(&self) -> OperationId {
		self.last.fetch_add(1, Ordering::Relaxed) + 1
	}
}
