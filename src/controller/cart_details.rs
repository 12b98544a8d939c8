use std::sync::Arc;

use axum::{
  Extension, Json,
  extract::{Path, State},
  http::StatusCode,
};

use crate::{
  controller::{
    Controller,
    helpers::{parse_id, store_err},
  },
  models::{carts::Cart, context::Context, errors::AppError},
};

pub(super) async fn cart_details(
  State(c): State<Arc<Controller>>,
  Extension(ctx): Extension<Arc<Context>>,
  Path(cid): Path<String>,
) -> Result<Json<Cart>, AppError> {
  let path = "storefront.controller.cart_details";
  let id = parse_id(ctx.clone(), path, &cid, "Invalid cart ID")?;

  let cart = c
    .carts
    .cart_details(ctx.clone(), id)
    .await
    .map_err(|e| store_err(ctx.clone(), path, e, StatusCode::NOT_FOUND))?;

  Ok(Json(cart))
}
