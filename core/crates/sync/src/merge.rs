use amdeb_sync::{Error, FieldValues, Operation, OperationBatch};

use tracing::debug;

/// Merges the values of every other operation on the same record into
/// `write_values`, which belong to `operation`.
///
/// The batch is newest first, so each fold brings in an older write and the
/// values accumulated so far take precedence.
pub fn merge_writes(
	batch: &OperationBatch,
	operation: &Operation,
	write_values: FieldValues,
) -> Result<FieldValues, Error> {
	let mut merged = write_values;

	for other in batch.others_for(operation) {
		if let Some(other_values) = other.values()? {
			merged.merge_older(other_values);
			debug!(other_id = other.id, ?merged, "Merged write values");
		}
	}

	Ok(merged)
}

#[cfg(test)]
mod tests {
	use super::*;
	use amdeb_sync::{OperationFactory, ProductField, RecordKey, SequentialIds};

	#[test]
	fn folds_older_writes_under_newer_ones() {
		let factory = SequentialIds::default();
		let key = RecordKey::variant(1);
		let elsewhere = RecordKey::variant(2);

		let oldest = factory
			.write_op(
				key,
				1,
				&FieldValues::from_iter([
					(ProductField::Name, rmpv::Value::from("first")),
					(ProductField::Weight, rmpv::Value::from(2)),
				]),
			)
			.unwrap();
		let older = factory
			.write_op(
				key,
				1,
				&FieldValues::from_iter([
					(ProductField::ListPrice, rmpv::Value::from(8)),
					(ProductField::QtyAvailable, rmpv::Value::from(5)),
					(ProductField::Name, rmpv::Value::from("second")),
				]),
			)
			.unwrap();
		let unrelated = factory
			.write_op(
				elsewhere,
				2,
				&FieldValues::from_iter([(ProductField::Barcode, "0001")]),
			)
			.unwrap();
		let newest_values = FieldValues::from_iter([
			(ProductField::ListPrice, rmpv::Value::from(10)),
			(ProductField::Name, rmpv::Value::from("x")),
		]);
		let newest = factory.write_op(key, 1, &newest_values).unwrap();

		let batch =
			OperationBatch::sorted(vec![oldest, older, unrelated, newest.clone()]).unwrap();

		let merged = merge_writes(&batch, &newest, newest_values).unwrap();

		assert_eq!(
			merged,
			FieldValues::from_iter([
				(ProductField::ListPrice, rmpv::Value::from(10)),
				(ProductField::Name, rmpv::Value::from("x")),
				(ProductField::QtyAvailable, rmpv::Value::from(5)),
				(ProductField::Weight, rmpv::Value::from(2)),
			])
		);
	}

	#[test]
	fn malformed_older_payload_aborts_the_merge() {
		let factory = SequentialIds::default();
		let key = RecordKey::template(3);

		let mut broken = factory
			.write_op(key, 3, &FieldValues::from_iter([(ProductField::Active, true)]))
			.unwrap();
		broken.operation_data = Some(vec![0xc1]);

		let values = FieldValues::from_iter([(ProductField::Active, false)]);
		let newest = factory.write_op(key, 3, &values).unwrap();

		let batch = OperationBatch::sorted(vec![broken, newest.clone()]).unwrap();

		assert!(matches!(
			merge_writes(&batch, &newest, values),
			Err(Error::Deserialization(_))
		));
	}
}
