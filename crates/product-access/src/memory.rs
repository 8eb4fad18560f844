use crate::{ProductAccess, ProductRecord};

use amdeb_sync::RecordKey;

use std::{collections::HashMap, fmt};

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Product tables held in memory, keyed by model and record id.
#[derive(Serialize, Deserialize, Default, Clone)]
#[serde(from = "Vec<(RecordKey, ProductRecord)>", into = "Vec<(RecordKey, ProductRecord)>")]
pub struct MemoryProductStore {
	products: HashMap<RecordKey, ProductRecord>,
}

impl MemoryProductStore {
	pub fn insert(&mut self, key: RecordKey, record: ProductRecord) -> Option<ProductRecord> {
		self.products.insert(key, record)
	}

	/// Removes a record, as unlinking it in the database would.
	pub fn unlink(&mut self, key: &RecordKey) -> Option<ProductRecord> {
		trace!(%key, "Unlinking product");
		self.products.remove(key)
	}

	/// Returns `false` when there is no such record.
	pub fn set_sync_active(&mut self, key: &RecordKey, active: bool) -> bool {
		self.products
			.get_mut(key)
			.map(|record| record.amazon_sync_active = active)
			.is_some()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.products.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.products.is_empty()
	}
}

impl ProductAccess for MemoryProductStore {
	fn browse(&self, key: &RecordKey) -> Option<&ProductRecord> {
		self.products.get(key)
	}
}

impl From<Vec<(RecordKey, ProductRecord)>> for MemoryProductStore {
	fn from(products: Vec<(RecordKey, ProductRecord)>) -> Self {
		Self {
			products: products.into_iter().collect(),
		}
	}
}

impl From<MemoryProductStore> for Vec<(RecordKey, ProductRecord)> {
	fn from(store: MemoryProductStore) -> Self {
		let mut products = store.products.into_iter().collect::<Vec<_>>();
		products.sort_by_key(|(key, _)| *key);
		products
	}
}

impl fmt::Debug for MemoryProductStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut keys = self.products.keys().collect::<Vec<_>>();
		keys.sort();

		f.debug_struct("MemoryProductStore")
			.field("products", &keys)
			.finish()
	}
}
