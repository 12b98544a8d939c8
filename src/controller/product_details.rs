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
  models::{context::Context, errors::AppError, products::Product},
};

pub(super) async fn product_details(
  State(c): State<Arc<Controller>>,
  Extension(ctx): Extension<Arc<Context>>,
  Path(pid): Path<String>,
) -> Result<Json<Product>, AppError> {
  let path = "storefront.controller.product_details";
  let id = parse_id(ctx.clone(), path, &pid, "Invalid product ID")?;

  let product = c
    .products
    .product_details(ctx.clone(), id)
    .await
    .map_err(|e| store_err(ctx.clone(), path, e, StatusCode::NOT_FOUND))?;

  Ok(Json(product))
}
