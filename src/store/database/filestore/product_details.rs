use std::sync::Arc;

use crate::{
  models::{context::Context, products::Product},
  store::database::{errors::StoreError, filestore::ProductsStoreImpl},
};

pub(super) async fn product_details(
  s: &ProductsStoreImpl,
  _ctx: Arc<Context>,
  id: u64,
) -> Result<Product, StoreError> {
  let products = s.products.lock().await;

  products
    .iter()
    .find(|p| p.id == id)
    .cloned()
    .ok_or_else(|| StoreError::not_found("Product", id, "storefront.store.product_details"))
}
