use std::sync::Arc;

use tracing::debug;

use crate::{
  events::StoreEvent,
  models::{
    context::Context,
    errors::ErrorType,
    products::{Product, ProductPatch, product_patch_is_valid},
  },
  store::database::{
    errors::StoreError,
    filestore::{ProductsStoreImpl, commit},
  },
};

pub(super) async fn product_update(
  s: &ProductsStoreImpl,
  ctx: Arc<Context>,
  id: u64,
  patch: ProductPatch,
) -> Result<Product, StoreError> {
  let path = "storefront.store.product_update";

  if let Some(requested) = &patch.id {
    let details = format!("id={}, requested={}", id, requested);
    return Err(StoreError::new(
      ErrorType::ImmutableField,
      None,
      "Cannot update product ID",
      path,
      details,
    ));
  }

  let mut products = s.products.lock().await;

  let Some(idx) = products.iter().position(|p| p.id == id) else {
    return Err(StoreError::not_found("Product", id, path));
  };

  product_patch_is_valid(id, &patch, &products, s.require_thumbnail).map_err(|e| {
    let msg = e.to_string();
    StoreError::new(ErrorType::InvalidProduct, Some(Box::new(e)), msg, path, format!("id={}", id))
  })?;

  let mut next = products.clone();
  next[idx].apply(patch);
  let product = next[idx].clone();
  commit(&s.file, &mut *products, next).await?;
  drop(products);

  debug!(request_id = %ctx.request_id, id, "product updated");
  s.notifier.notify(StoreEvent::ProductUpdated(product.clone()));

  Ok(product)
}
