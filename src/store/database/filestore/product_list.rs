use std::sync::Arc;

use crate::{
  models::{context::Context, products::Product},
  store::database::{errors::StoreError, filestore::ProductsStoreImpl},
};

/// The whole catalog in insertion order, or its first `limit` entries.
pub(super) async fn product_list(
  s: &ProductsStoreImpl,
  _ctx: Arc<Context>,
  limit: Option<usize>,
) -> Result<Vec<Product>, StoreError> {
  let products = s.products.lock().await;
  let limit = limit.unwrap_or(products.len());

  Ok(products.iter().take(limit).cloned().collect())
}
