use std::sync::Arc;

use tracing::debug;

use crate::{
  events::StoreEvent,
  models::context::Context,
  store::database::{
    errors::StoreError,
    filestore::{ProductsStoreImpl, commit},
  },
};

pub(super) async fn product_delete(
  s: &ProductsStoreImpl,
  ctx: Arc<Context>,
  id: u64,
) -> Result<(), StoreError> {
  let mut products = s.products.lock().await;

  let Some(idx) = products.iter().position(|p| p.id == id) else {
    return Err(StoreError::not_found("Product", id, "storefront.store.product_delete"));
  };

  let mut next = products.clone();
  next.remove(idx);
  commit(&s.file, &mut *products, next).await?;
  drop(products);

  debug!(request_id = %ctx.request_id, id, "product deleted");
  s.notifier.notify(StoreEvent::ProductDeleted { id });

  Ok(())
}
