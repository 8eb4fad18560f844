use crate::{Error, Operation, OperationId, RecordKey};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Pending product operations, ordered newest first by operation id.
///
/// Construction checks the ordering contract the transformer depends on:
/// - ids are unique and strictly descending
/// - a record has at most one unlink, and it is the newest operation of that record
#[derive(Serialize, Debug, Clone, Default)]
pub struct OperationBatch(Vec<Operation>);

impl OperationBatch {
	/// Validates operations that are expected to already be sorted newest first.
	pub fn new(ops: Vec<Operation>) -> Result<Self, Error> {
		for pair in ops.windows(2) {
			let (previous, current) = (&pair[0], &pair[1]);

			if previous.id == current.id {
				return Err(Error::DuplicateOperationId(current.id));
			}

			if previous.id < current.id {
				return Err(Error::UnorderedBatch {
					previous: previous.id,
					current: current.id,
				});
			}
		}

		let batch = Self(ops);
		batch.check_unlinks()?;

		Ok(batch)
	}

	/// Sorts operations newest first and validates them.
	pub fn sorted(mut ops: Vec<Operation>) -> Result<Self, Error> {
		ops.sort_by(|a, b| b.id.cmp(&a.id));

		Self::new(ops)
	}

	fn check_unlinks(&self) -> Result<(), Error> {
		for (key, ops) in self.per_record() {
			let mut unlinks = ops.iter().filter(|op| op.is_unlink());

			if let Some(unlink) = unlinks.next() {
				if unlinks.next().is_some() {
					return Err(Error::MultipleUnlinks(key));
				}

				// newest first, so the unlink must lead its group
				if let Some(newest) = ops.first().filter(|newest| newest.id != unlink.id) {
					return Err(Error::UnlinkNotMostRecent {
						key,
						unlink_id: unlink.id,
						newer_id: newest.id,
					});
				}
			}
		}

		Ok(())
	}

	/// Groups operations by record, keeping batch order inside each group.
	#[must_use]
	pub fn per_record(&self) -> BTreeMap<RecordKey, Vec<&Operation>> {
		let mut grouped = BTreeMap::<_, Vec<_>>::new();

		for op in &self.0 {
			grouped.entry(op.key()).or_default().push(op);
		}

		grouped
	}

	/// Finds a create operation recorded for `key`.
	#[must_use]
	pub fn find_create(&self, key: &RecordKey) -> Option<&Operation> {
		self.0
			.iter()
			.find(|op| op.is_create() && op.key() == *key)
	}

	/// Operations for the same record as `op`, excluding `op` itself.
	pub fn others_for<'a>(&'a self, op: &Operation) -> impl Iterator<Item = &'a Operation> {
		let (key, id) = (op.key(), op.id);

		self.0
			.iter()
			.filter(move |other| other.key() == key && other.id != id)
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
		self.0.iter()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	#[must_use]
	pub fn into_ops(self) -> Vec<Operation> {
		self.0
	}
}

impl<'de> Deserialize<'de> for OperationBatch {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Self::new(Vec::<Operation>::deserialize(deserializer)?).map_err(serde::de::Error::custom)
	}
}

impl<'a> IntoIterator for &'a OperationBatch {
	type Item = &'a Operation;
	type IntoIter = std::slice::Iter<'a, Operation>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.iter()
	}
}
