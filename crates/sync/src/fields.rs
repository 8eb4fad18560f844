use crate::Error;

use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};

/// Product fields that may appear in a write payload.
///
/// Payloads naming any other field fail to decode.
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
	strum_macros::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductField {
	Name,
	DefaultCode,
	ListPrice,
	StandardPrice,
	QtyAvailable,
	Description,
	DescriptionSale,
	Barcode,
	Weight,
	ImageMedium,
	AttributeValueIds,
	ProductTmplId,
	AmazonSyncActive,
	Active,
}

/// Field values written by one or more operations.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<ProductField, rmpv::Value>);

impl FieldValues {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
		Ok(rmp_serde::from_slice(bytes)?)
	}

	pub fn encode(&self) -> Result<Vec<u8>, Error> {
		Ok(rmp_serde::to_vec_named(self)?)
	}

	pub fn insert(
		&mut self,
		field: ProductField,
		value: impl Into<rmpv::Value>,
	) -> Option<rmpv::Value> {
		self.0.insert(field, value.into())
	}

	#[must_use]
	pub fn get(&self, field: ProductField) -> Option<&rmpv::Value> {
		self.0.get(&field)
	}

	#[must_use]
	pub fn contains(&self, field: ProductField) -> bool {
		self.0.contains_key(&field)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> btree_map::Iter<'_, ProductField, rmpv::Value> {
		self.0.iter()
	}

	/// Folds in values from an older write. Fields already present here win.
	pub fn merge_older(&mut self, older: Self) {
		for (field, value) in older.0 {
			self.0.entry(field).or_insert(value);
		}
	}
}

impl<V: Into<rmpv::Value>> FromIterator<(ProductField, V)> for FieldValues {
	fn from_iter<I: IntoIterator<Item = (ProductField, V)>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|(field, value)| (field, value.into()))
				.collect(),
		)
	}
}

impl IntoIterator for FieldValues {
	type Item = (ProductField, rmpv::Value);
	type IntoIter = btree_map::IntoIter<ProductField, rmpv::Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}
