use std::sync::Arc;

use axum::{
  Extension, Json,
  extract::{Query, State},
  http::StatusCode,
};
use serde::Deserialize;

use crate::{
  controller::{
    Controller,
    helpers::{parse_limit, store_err},
  },
  models::{context::Context, errors::AppError, products::Product},
};

#[derive(Debug, Default, Deserialize)]
pub(super) struct ProductListQuery {
  limit: Option<String>,
}

pub(super) async fn product_list(
  State(c): State<Arc<Controller>>,
  Extension(ctx): Extension<Arc<Context>>,
  Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
  let path = "storefront.controller.product_list";
  let limit = parse_limit(query.limit.as_deref());

  let products = c
    .products
    .product_list(ctx.clone(), limit)
    .await
    .map_err(|e| store_err(ctx.clone(), path, e, StatusCode::NOT_FOUND))?;

  Ok(Json(products))
}
