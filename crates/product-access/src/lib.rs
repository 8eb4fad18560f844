//! Read access to product templates and variants.
//!
//! The transformer only needs a handful of lookups against the product tables:
//! existence, the Amazon sync flag, the SKU and the attribute values of a
//! variant. All of them are answered from a single [`ProductAccess::browse`].

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
#![allow(clippy::module_name_repetitions)]

use amdeb_sync::{ModelName, RecordId, RecordKey};

mod memory;
mod record;

pub use memory::MemoryProductStore;
pub use record::{AttributeValue, ProductRecord};

/// Prefix of the generated SKU for templates with multiple variants.
pub const TEMPLATE_SKU_PREFIX: &str = "Template_";

pub trait ProductAccess {
	/// Looks up a product template or variant. `None` when it was unlinked.
	fn browse(&self, key: &RecordKey) -> Option<&ProductRecord>;

	fn exists(&self, key: &RecordKey) -> bool {
		self.browse(key).is_some()
	}

	fn is_sync_active(&self, key: &RecordKey) -> bool {
		self.browse(key)
			.is_some_and(|record| record.amazon_sync_active)
	}

	fn get_sku(&self, key: &RecordKey) -> Option<String> {
		self.browse(key)
			.and_then(|record| record.default_code.clone())
	}

	fn get_attributes(&self, key: &RecordKey) -> Vec<(String, String)> {
		self.browse(key)
			.map(ProductRecord::attributes)
			.unwrap_or_default()
	}

	/// A variant without attribute values is not an independent variant; it only
	/// stands in for its template.
	fn is_partial_variant(&self, key: &RecordKey) -> bool {
		key.model_name == ModelName::ProductProduct
			&& self
				.browse(key)
				.is_some_and(|record| record.attribute_values.is_empty())
	}
}

#[must_use]
pub const fn is_product_variant(product: &ProductRecord) -> bool {
	product.is_product_variant
}

#[must_use]
pub const fn has_multi_variants(product: &ProductRecord) -> bool {
	is_product_variant(product) && product.product_variant_count > 1
}

/// SKU for a product template that has multiple variants.
#[must_use]
pub fn generate_sku(record_id: RecordId) -> String {
	format!("{TEMPLATE_SKU_PREFIX}{record_id}")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store() -> MemoryProductStore {
		let mut store = MemoryProductStore::default();

		store.insert(
			RecordKey::template(1),
			ProductRecord::new("T-shirt")
				.with_default_code("TEE")
				.with_sync_active(true),
		);
		store.insert(
			RecordKey::variant(10),
			ProductRecord::new("T-shirt")
				.with_default_code("TEE-RED-M")
				.as_variant(2)
				.with_attribute("Color", "Red")
				.with_attribute("Size", "M"),
		);
		store.insert(
			RecordKey::variant(11),
			ProductRecord::new("Mug").as_variant(1),
		);

		store
	}

	#[test]
	fn lookups_go_through_browse() {
		let store = store();

		assert!(store.exists(&RecordKey::template(1)));
		assert!(!store.exists(&RecordKey::template(99)));

		assert!(store.is_sync_active(&RecordKey::template(1)));
		assert!(!store.is_sync_active(&RecordKey::variant(10)));
		assert!(!store.is_sync_active(&RecordKey::variant(99)));

		assert_eq!(
			store.get_sku(&RecordKey::variant(10)).as_deref(),
			Some("TEE-RED-M")
		);
		assert_eq!(store.get_sku(&RecordKey::variant(11)), None);

		assert_eq!(
			store.get_attributes(&RecordKey::variant(10)),
			vec![
				("Color".to_string(), "Red".to_string()),
				("Size".to_string(), "M".to_string()),
			]
		);
		assert!(store.get_attributes(&RecordKey::variant(99)).is_empty());
	}

	#[test]
	fn partial_variants_are_variants_without_attributes() {
		let store = store();

		assert!(store.is_partial_variant(&RecordKey::variant(11)));
		assert!(!store.is_partial_variant(&RecordKey::variant(10)));
		// templates never are, even without attributes
		assert!(!store.is_partial_variant(&RecordKey::template(1)));
		assert!(!store.is_partial_variant(&RecordKey::variant(99)));
	}

	#[test]
	fn multi_variant_detection_and_generated_sku() {
		let store = store();
		let red_m = store.browse(&RecordKey::variant(10)).unwrap();
		let mug = store.browse(&RecordKey::variant(11)).unwrap();
		let template = store.browse(&RecordKey::template(1)).unwrap();

		assert!(has_multi_variants(red_m));
		assert!(!has_multi_variants(mug));
		assert!(!has_multi_variants(template));
		assert!(is_product_variant(mug));

		assert_eq!(generate_sku(1), "Template_1");
	}
}
