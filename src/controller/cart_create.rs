use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode};
use scopeguard::guard;
use serde_json::json;

use crate::{
  controller::{
    Controller,
    helpers::{audit_fail, store_err},
  },
  models::{
    audit::{AuditRecord, EventName::CartCreate, EventParameterKey::CartId, EventStatus::Fail},
    carts::Cart,
    context::Context,
    errors::AppError,
  },
};

pub(super) async fn cart_create(
  State(c): State<Arc<Controller>>,
  Extension(ctx): Extension<Arc<Context>>,
) -> Result<(StatusCode, Json<Cart>), AppError> {
  let path = "storefront.controller.cart_create";
  let mut audit = guard(AuditRecord::new(ctx.clone(), CartCreate, Fail), |a| a.log());

  let cart = c
    .carts
    .cart_create(ctx.clone())
    .await
    .map_err(|e| audit_fail(&mut audit, store_err(ctx.clone(), path, e, StatusCode::NOT_FOUND)))?;

  audit.set_event_parameter(CartId, json!(cart.id));
  audit.set_resulting_state("cart", serde_json::to_value(&cart).unwrap_or_default());
  audit.success();

  Ok((StatusCode::CREATED, Json(cart)))
}
