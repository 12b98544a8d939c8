use std::sync::Arc;

use axum::{
  Extension, Json,
  extract::{Path, State},
  http::StatusCode,
};
use scopeguard::guard;
use serde_json::{Value, json};

use crate::{
  controller::{
    Controller,
    helpers::{audit_fail, parse_id, store_err},
  },
  models::{
    audit::{AuditRecord, EventName::ProductDelete, EventParameterKey::ProductId, EventStatus::Fail},
    context::Context,
    errors::AppError,
  },
};

pub(super) async fn product_delete(
  State(c): State<Arc<Controller>>,
  Extension(ctx): Extension<Arc<Context>>,
  Path(pid): Path<String>,
) -> Result<Json<Value>, AppError> {
  let path = "storefront.controller.product_delete";
  let mut audit = guard(AuditRecord::new(ctx.clone(), ProductDelete, Fail), |a| a.log());

  let id = parse_id(ctx.clone(), path, &pid, "Invalid product ID")
    .map_err(|e| audit_fail(&mut audit, e))?;
  audit.set_event_parameter(ProductId, json!(id));

  c.products
    .product_delete(ctx.clone(), id)
    .await
    .map_err(|e| audit_fail(&mut audit, store_err(ctx.clone(), path, e, StatusCode::NOT_FOUND)))?;

  audit.success();

  Ok(Json(json!({ "message": "Product deleted successfully" })))
}
