use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue {
	/// Name of the attribute, e.g. "Color"
	pub attribute: String,
	/// Name of the value, e.g. "Red"
	pub value: String,
}

/// The product columns the sync reads.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRecord {
	pub name: String,
	#[serde(default)]
	pub default_code: Option<String>,
	#[serde(default)]
	pub amazon_sync_active: bool,
	#[serde(default)]
	pub is_product_variant: bool,
	#[serde(default)]
	pub product_variant_count: u32,
	#[serde(default)]
	pub attribute_values: Vec<AttributeValue>,
}

impl ProductRecord {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}

	#[must_use]
	pub fn with_default_code(mut self, sku: impl Into<String>) -> Self {
		self.default_code = Some(sku.into());
		self
	}

	#[must_use]
	pub fn with_sync_active(mut self, active: bool) -> Self {
		self.amazon_sync_active = active;
		self
	}

	/// Marks the record as a variant of a template with `variant_count` variants.
	#[must_use]
	pub fn as_variant(mut self, variant_count: u32) -> Self {
		self.is_product_variant = true;
		self.product_variant_count = variant_count;
		self
	}

	#[must_use]
	pub fn with_attribute(
		mut self,
		attribute: impl Into<String>,
		value: impl Into<String>,
	) -> Self {
		self.attribute_values.push(AttributeValue {
			attribute: attribute.into(),
			value: value.into(),
		});
		self
	}

	/// (attribute name, value name) pairs in stored order.
	#[must_use]
	pub fn attributes(&self) -> Vec<(String, String)> {
		self.attribute_values
			.iter()
			.map(|AttributeValue { attribute, value }| (attribute.clone(), value.clone()))
			.collect()
	}
}
