use std::sync::Arc;

use axum::{
  Extension, Json,
  body::Bytes,
  extract::State,
  http::StatusCode,
};
use scopeguard::guard;
use serde_json::json;

use crate::{
  controller::{
    Controller,
    helpers::{audit_fail, parse_body, store_err},
  },
  models::{
    audit::{
      AuditRecord,
      EventName::ProductCreate,
      EventParameterKey::{Payload, ProductId},
      EventStatus::Fail,
    },
    context::Context,
    errors::AppError,
    products::{self, Product},
  },
};

pub(super) async fn product_create(
  State(c): State<Arc<Controller>>,
  Extension(ctx): Extension<Arc<Context>>,
  body: Bytes,
) -> Result<(StatusCode, Json<Product>), AppError> {
  let path = "storefront.controller.product_create";
  let mut audit = guard(AuditRecord::new(ctx.clone(), ProductCreate, Fail), |a| a.log());

  let pro: products::ProductCreate =
    parse_body(ctx.clone(), path, &body).map_err(|e| audit_fail(&mut audit, e))?;
  audit.set_event_parameter(Payload, serde_json::to_value(&pro).unwrap_or_default());

  let created = c
    .products
    .product_create(ctx.clone(), pro)
    .await
    .map_err(|e| audit_fail(&mut audit, store_err(ctx.clone(), path, e, StatusCode::NOT_FOUND)))?;

  audit.set_event_parameter(ProductId, json!(created.id));
  audit.set_resulting_state("product", serde_json::to_value(&created).unwrap_or_default());
  audit.success();

  Ok((StatusCode::CREATED, Json(created)))
}
