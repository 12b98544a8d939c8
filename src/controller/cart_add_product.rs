use std::sync::Arc;

use axum::{
  Extension, Json,
  body::Bytes,
  extract::{Path, State},
  http::StatusCode,
};
use scopeguard::guard;
use serde_json::json;

use crate::{
  controller::{
    Controller,
    helpers::{audit_fail, parse_body, parse_id, store_err},
  },
  models::{
    audit::{
      AuditRecord,
      EventName::CartProductAdd,
      EventParameterKey::{CartId, Payload, ProductId},
      EventStatus::Fail,
    },
    carts::{Cart, CartAddProduct},
    context::Context,
    errors::AppError,
  },
};

/// The body is optional; without one a single unit is added.
pub(super) async fn cart_add_product(
  State(c): State<Arc<Controller>>,
  Extension(ctx): Extension<Arc<Context>>,
  Path((cid, pid)): Path<(String, String)>,
  body: Bytes,
) -> Result<Json<Cart>, AppError> {
  let path = "storefront.controller.cart_add_product";
  let mut audit = guard(AuditRecord::new(ctx.clone(), CartProductAdd, Fail), |a| a.log());
  let invalid = "Invalid cart or product ID";

  let cart_id =
    parse_id(ctx.clone(), path, &cid, invalid).map_err(|e| audit_fail(&mut audit, e))?;
  let product_id =
    parse_id(ctx.clone(), path, &pid, invalid).map_err(|e| audit_fail(&mut audit, e))?;
  audit.set_event_parameter(CartId, json!(cart_id));
  audit.set_event_parameter(ProductId, json!(product_id));

  let req: CartAddProduct =
    parse_body(ctx.clone(), path, &body).map_err(|e| audit_fail(&mut audit, e))?;
  audit.set_event_parameter(Payload, serde_json::to_value(req).unwrap_or_default());

  let cart = c
    .carts
    .cart_add_product(ctx.clone(), cart_id, product_id, req.quantity)
    .await
    .map_err(|e| audit_fail(&mut audit, store_err(ctx.clone(), path, e, StatusCode::NOT_FOUND)))?;

  audit.set_resulting_state("cart", serde_json::to_value(&cart).unwrap_or_default());
  audit.success();

  Ok(Json(cart))
}
