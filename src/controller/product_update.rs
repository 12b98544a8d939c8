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
      EventName::ProductUpdate,
      EventParameterKey::{Payload, ProductId},
      EventStatus::Fail,
    },
    context::Context,
    errors::AppError,
    products::{Product, ProductPatch},
  },
};

/// Every rejection here, an unknown id included, is answered with 400.
pub(super) async fn product_update(
  State(c): State<Arc<Controller>>,
  Extension(ctx): Extension<Arc<Context>>,
  Path(pid): Path<String>,
  body: Bytes,
) -> Result<Json<Product>, AppError> {
  let path = "storefront.controller.product_update";
  let mut audit = guard(AuditRecord::new(ctx.clone(), ProductUpdate, Fail), |a| a.log());

  let id = parse_id(ctx.clone(), path, &pid, "Invalid product ID")
    .map_err(|e| audit_fail(&mut audit, e))?;
  audit.set_event_parameter(ProductId, json!(id));

  let patch: ProductPatch =
    parse_body(ctx.clone(), path, &body).map_err(|e| audit_fail(&mut audit, e))?;
  audit.set_event_parameter(Payload, serde_json::to_value(&patch).unwrap_or_default());

  let updated = c
    .products
    .product_update(ctx.clone(), id, patch)
    .await
    .map_err(|e| audit_fail(&mut audit, store_err(ctx.clone(), path, e, StatusCode::BAD_REQUEST)))?;

  audit.set_resulting_state("product", serde_json::to_value(&updated).unwrap_or_default());
  audit.success();

  Ok(Json(updated))
}
