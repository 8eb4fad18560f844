use amdeb_sync::{FieldValues, Operation};

/// Receives records that were unlinked.
pub trait UnlinkTransformer {
	fn transform(&mut self, operation: &Operation);
}

/// Receives records to create on the marketplace.
pub trait CreateTransformer {
	fn transform(&mut self, operation: &Operation);
}

/// Receives the merged writes of a record. It decides how they split into
/// price, inventory, image and metadata syncs.
pub trait WriteTransformer {
	fn transform(&mut self, operation: &Operation, values: FieldValues, sync_active: bool);
}

impl<F: FnMut(&Operation)> UnlinkTransformer for F {
	fn transform(&mut self, operation: &Operation) {
		self(operation);
	}
}

impl<F: FnMut(&Operation)> CreateTransformer for F {
	fn transform(&mut self, operation: &Operation) {
		self(operation);
	}
}

impl<F: FnMut(&Operation, FieldValues, bool)> WriteTransformer for F {
	fn transform(&mut self, operation: &Operation, values: FieldValues, sync_active: bool) {
		self(operation, values, sync_active);
	}
}

/// The downstream transformers a decided operation is dispatched to.
pub struct Transformers<'a> {
	pub unlink: &'a mut dyn UnlinkTransformer,
	pub create: &'a mut dyn CreateTransformer,
	pub write: &'a mut dyn WriteTransformer,
}
