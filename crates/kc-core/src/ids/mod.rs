//! Identifier newtypes.

mod collection_id;
mod product_id;

pub use collection_id::CollectionId;
pub use product_id::ProductId;
