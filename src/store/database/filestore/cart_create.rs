use std::sync::Arc;

use tracing::debug;

use crate::{
  events::StoreEvent,
  models::{carts::Cart, context::Context, errors::ErrorType, next_id},
  store::database::{
    errors::StoreError,
    filestore::{CartsStoreImpl, commit},
  },
};

pub(super) async fn cart_create(s: &CartsStoreImpl, ctx: Arc<Context>) -> Result<Cart, StoreError> {
  let path = "storefront.store.cart_create";

  let mut carts = s.carts.lock().await;

  let Some(id) = next_id(carts.as_slice()) else {
    return Err(StoreError::new(ErrorType::Internal, None, "id space exhausted", path, ""));
  };

  let cart = Cart::new(id);
  let mut next = carts.clone();
  next.push(cart.clone());
  commit(&s.file, &mut *carts, next).await?;
  drop(carts);

  debug!(request_id = %ctx.request_id, id = cart.id, "cart created");
  s.notifier.notify(StoreEvent::CartCreated(cart.clone()));

  Ok(cart)
}
