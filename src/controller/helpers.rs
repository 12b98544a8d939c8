use std::sync::Arc;

use axum::{body::Bytes, http::StatusCode};
use serde::de::DeserializeOwned;

use crate::{
  models::{audit::AuditRecord, context::Context, errors::AppError, errors::ErrorType},
  store::database::errors::StoreError,
};

/// Parses a path segment as a numeric id. Anything that is not an unsigned
/// integer is answered with 400 and `message`.
pub(super) fn parse_id(
  ctx: Arc<Context>,
  where_: &str,
  raw: &str,
  message: &str,
) -> Result<u64, AppError> {
  raw.trim().parse::<u64>().map_err(|e| {
    AppError::new(
      ctx,
      where_,
      "request.id.invalid",
      message,
      format!("value={raw}"),
      StatusCode::BAD_REQUEST,
      Some(Box::new(e)),
    )
  })
}

/// Decodes a JSON body. An empty body decodes to `T::default()`.
pub(super) fn parse_body<T: DeserializeOwned + Default>(
  ctx: Arc<Context>,
  where_: &str,
  body: &Bytes,
) -> Result<T, AppError> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(T::default());
  }

  serde_json::from_slice(body).map_err(|e| {
    AppError::new(
      ctx,
      where_,
      "request.body.invalid",
      "Malformed request body",
      e.to_string(),
      StatusCode::BAD_REQUEST,
      None,
    )
  })
}

/// Maps a store failure to a response. Rejections keep the store message,
/// storage failures become a plain 500.
pub(super) fn store_err(
  ctx: Arc<Context>,
  where_: &str,
  err: StoreError,
  not_found: StatusCode,
) -> AppError {
  let status_code = match err.err_type {
    ErrorType::NotFound => not_found,
    ErrorType::InvalidProduct | ErrorType::ImmutableField | ErrorType::InvalidQuantity => {
      StatusCode::BAD_REQUEST
    }
    _ => return AppError::internal(ctx, where_, Box::new(err)),
  };

  AppError::new(
    ctx,
    where_,
    format!("store.{}", err.err_type),
    err.msg,
    err.details,
    status_code,
    None,
  )
}

pub(super) fn audit_fail(audit: &mut AuditRecord, err: AppError) -> AppError {
  audit.fail(err.message.clone(), Some(err.status_code.as_u16()));
  err
}

/// Positive integer limits apply, anything else means no limit.
pub(super) fn parse_limit(raw: Option<&str>) -> Option<usize> {
  raw.and_then(|l| l.trim().parse::<usize>().ok()).filter(|l| *l > 0)
}
