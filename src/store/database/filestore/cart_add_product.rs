use std::sync::Arc;

use tracing::debug;

use crate::{
  events::StoreEvent,
  models::{carts::Cart, context::Context, errors::ErrorType},
  store::database::{
    errors::StoreError,
    filestore::{CartsStoreImpl, commit},
  },
};

pub(super) async fn cart_add_product(
  s: &CartsStoreImpl,
  ctx: Arc<Context>,
  cart_id: u64,
  product_id: u64,
  quantity: u64,
) -> Result<Cart, StoreError> {
  let path = "storefront.store.cart_add_product";

  if quantity == 0 {
    return Err(StoreError::new(
      ErrorType::InvalidQuantity,
      None,
      "Quantity must be a positive integer",
      path,
      format!("cart_id={}, product_id={}", cart_id, product_id),
    ));
  }

  let mut carts = s.carts.lock().await;

  let Some(idx) = carts.iter().position(|c| c.id == cart_id) else {
    return Err(StoreError::not_found("Cart", cart_id, path));
  };

  let mut next = carts.clone();
  next[idx].add_product(product_id, quantity);
  let cart = next[idx].clone();
  commit(&s.file, &mut *carts, next).await?;
  drop(carts);

  debug!(request_id = %ctx.request_id, cart_id, product_id, quantity, "product added to cart");
  s.notifier.notify(StoreEvent::CartUpdated(cart.clone()));

  Ok(cart)
}
