use std::sync::Arc;

use crate::{
  models::{carts::Cart, context::Context},
  store::database::{errors::StoreError, filestore::CartsStoreImpl},
};

pub(super) async fn cart_details(
  s: &CartsStoreImpl,
  _ctx: Arc<Context>,
  id: u64,
) -> Result<Cart, StoreError> {
  let carts = s.carts.lock().await;

  carts
    .iter()
    .find(|c| c.id == id)
    .cloned()
    .ok_or_else(|| StoreError::not_found("Cart", id, "storefront.store.cart_details"))
}
