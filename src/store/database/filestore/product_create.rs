use std::sync::Arc;

use tracing::debug;

use crate::{
  events::StoreEvent,
  models::{
    context::Context,
    errors::ErrorType,
    next_id,
    products::{Product, ProductCreate, product_create_is_valid, product_create_pre_save},
  },
  store::database::{
    errors::StoreError,
    filestore::{ProductsStoreImpl, commit},
  },
};

pub(super) async fn product_create(
  s: &ProductsStoreImpl,
  ctx: Arc<Context>,
  payload: ProductCreate,
) -> Result<Product, StoreError> {
  let path = "storefront.store.product_create";

  let mut products = s.products.lock().await;

  product_create_is_valid(&payload, &products, s.require_thumbnail).map_err(|e| {
    let msg = e.to_string();
    StoreError::new(ErrorType::InvalidProduct, Some(Box::new(e)), msg, path, "")
  })?;

  let Some(id) = next_id(products.as_slice()) else {
    return Err(StoreError::new(ErrorType::Internal, None, "id space exhausted", path, ""));
  };

  let product = product_create_pre_save(id, payload);
  let mut next = products.clone();
  next.push(product.clone());
  commit(&s.file, &mut *products, next).await?;
  drop(products);

  debug!(request_id = %ctx.request_id, id = product.id, code = %product.code, "product created");
  s.notifier.notify(StoreEvent::ProductCreated(product.clone()));

  Ok(product)
}
