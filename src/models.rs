pub mod audit;
pub mod carts;
pub mod config;
pub mod context;
pub mod errors;
pub mod products;

/// Entities kept in a JSON collection, identified by a store assigned integer.
pub trait Identified {
  fn id(&self) -> u64;
}

/// Next id for a collection: one past the highest id in use, or 1 when empty.
/// `None` once the highest id is `u64::MAX`.
///
/// Ids freed by deleting the highest entity are handed out again.
pub fn next_id<T: Identified>(items: &[T]) -> Option<u64> {
  items.iter().map(Identified::id).max().unwrap_or(0).checked_add(1)
}
