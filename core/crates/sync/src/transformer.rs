use crate::{merge::merge_writes, Error, Transformers};

use amdeb_product_access::ProductAccess;
use amdeb_sync::{Operation, OperationBatch, OperationType, RecordKey};

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, dispatcher, error, instrument, trace, Dispatch};

/// What happened to each operation of a batch.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TransformSummary {
	pub unlinked: usize,
	pub created: usize,
	pub written: usize,
	/// Operations for a record that was already decided
	pub duplicates: usize,
	/// Create or write operations for a record that no longer exists
	pub missing: usize,
	/// Creates for records with Amazon sync turned off
	pub inactive: usize,
	/// Operations with an unknown operation type
	pub invalid: usize,
}

impl TransformSummary {
	/// Number of operations handed to a downstream transformer.
	#[must_use]
	pub const fn dispatched(&self) -> usize {
		self.unlinked + self.created + self.written
	}

	fn record(&mut self, outcome: Outcome) {
		match outcome {
			Outcome::Unlinked => self.unlinked += 1,
			Outcome::Created => self.created += 1,
			Outcome::Written => self.written += 1,
			Outcome::Missing => self.missing += 1,
			Outcome::Inactive => self.inactive += 1,
			Outcome::Invalid => self.invalid += 1,
		}
	}
}

#[derive(Debug, Clone, Copy)]
enum Outcome {
	Unlinked,
	Created,
	Written,
	Missing,
	Inactive,
	Invalid,
}

/// Transforms product operations into sync operations.
///
/// Each record gets at most one decision for the lifetime of the transformer:
/// 1. an unlink always wins, it's the newest operation of its record
/// 2. a create is forwarded directly; writes are dropped when the record also has a create
/// 3. all writes of a record are merged into one
///
/// A product may have been unlinked after its create or write was recorded, so
/// those are checked against the product tables before being forwarded.
pub struct ProductOperationTransformer<'a, P: ProductAccess + ?Sized> {
	products: &'a P,
	transformers: Transformers<'a>,
	// model name + record id pairs that were already transformed
	transformed: HashSet<RecordKey>,
	dispatch: Dispatch,
}

impl<'a, P: ProductAccess + ?Sized> ProductOperationTransformer<'a, P> {
	/// Logs go to the dispatcher that is current when the transformer is built.
	pub fn new(products: &'a P, transformers: Transformers<'a>) -> Self {
		Self {
			products,
			transformers,
			transformed: HashSet::new(),
			dispatch: dispatcher::get_default(Dispatch::clone),
		}
	}

	#[must_use]
	pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
		self.dispatch = dispatch;
		self
	}

	#[must_use]
	pub fn is_transformed(&self, key: &RecordKey) -> bool {
		self.transformed.contains(key)
	}

	/// Forgets every decided record, so the next batch is transformed from scratch.
	pub fn reset(&mut self) {
		self.transformed.clear();
	}

	/// Decides and dispatches one sync action per record of `batch`.
	///
	/// Records decided by an earlier call are skipped. Undecodable write payloads
	/// abort the pass; the records decided before the failure stay decided.
	pub fn transform(&mut self, batch: &OperationBatch) -> Result<TransformSummary, Error> {
		let dispatch = self.dispatch.clone();

		dispatcher::with_default(&dispatch, || self.transform_batch(batch))
	}

	#[instrument(skip_all, fields(operations_count = %batch.len()), err)]
	fn transform_batch(&mut self, batch: &OperationBatch) -> Result<TransformSummary, Error> {
		trace!("Enter product operation transform");

		let mut summary = TransformSummary::default();

		for operation in batch {
			if !self.transformed.insert(operation.key()) {
				// process each record only once
				summary.duplicates += 1;
				continue;
			}

			summary.record(self.transform_operation(batch, operation)?);
		}

		debug!(?summary, "Transformed product operations");

		Ok(summary)
	}

	fn transform_operation(
		&mut self,
		batch: &OperationBatch,
		operation: &Operation,
	) -> Result<Outcome, Error> {
		if operation.is_unlink() {
			self.transformers.unlink.transform(operation);
			return Ok(Outcome::Unlinked);
		}

		// only transform a create or write for an existing product
		if self.products.exists(&operation.key()) {
			self.transform_create_write(batch, operation)
		} else {
			debug!(
				model = %operation.model_name,
				record_id = operation.record_id,
				"Ignore operation for unlinked product"
			);
			Ok(Outcome::Missing)
		}
	}

	fn transform_create_write(
		&mut self,
		batch: &OperationBatch,
		operation: &Operation,
	) -> Result<Outcome, Error> {
		match operation.operation_type {
			OperationType::Create => {
				if self.products.is_sync_active(&operation.key()) {
					self.transformers.create.transform(operation);
					Ok(Outcome::Created)
				} else {
					debug!(
						model = %operation.model_name,
						record_id = operation.record_id,
						"Amazon sync is inactive for create operation"
					);
					Ok(Outcome::Inactive)
				}
			}
			OperationType::Write => self.transform_write(batch, operation),
			other => {
				error!(
					operation_type = %other,
					model = %operation.model_name,
					record_id = operation.record_id,
					"Invalid product operation type"
				);
				Ok(Outcome::Invalid)
			}
		}
	}

	fn transform_write(
		&mut self,
		batch: &OperationBatch,
		operation: &Operation,
	) -> Result<Outcome, Error> {
		let key = operation.key();

		// a write for a record created in the same batch is part of the create
		if let Some(creation) = batch.find_create(&key) {
			self.transformers.create.transform(creation);
			debug!(
				model = %operation.model_name,
				record_id = operation.record_id,
				create_id = creation.id,
				"Found a create operation, ignore write operation"
			);
			return Ok(Outcome::Created);
		}

		let write_values = operation.write_values()?;
		debug!(
			model = %operation.model_name,
			record_id = operation.record_id,
			template_id = operation.template_id,
			?write_values,
			"Transform write operation"
		);

		let merged_values = merge_writes(batch, operation, write_values)?;
		let sync_active = self.products.is_sync_active(&key);

		self.transformers
			.write
			.transform(operation, merged_values, sync_active);

		Ok(Outcome::Written)
	}
}
