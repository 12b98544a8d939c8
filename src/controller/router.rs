use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};

use crate::controller::{
  Controller, cart_add_product::cart_add_product, cart_create::cart_create,
  cart_details::cart_details, product_create::product_create, product_delete::product_delete,
  product_details::product_details, product_list::product_list, product_update::product_update,
};

pub(super) fn routes() -> Router<Arc<Controller>> {
  Router::new()
    .route("/api/products", get(product_list).post(product_create))
    .route(
      "/api/products/{pid}",
      get(product_details).put(product_update).delete(product_delete),
    )
    .route("/api/carts", post(cart_create))
    .route("/api/carts/{cid}", get(cart_details))
    .route("/api/carts/{cid}/product/{pid}", post(cart_add_product))
    // legacy read-only aliases
    .route("/products", get(product_list))
    .route("/products/{pid}", get(product_details))
}
