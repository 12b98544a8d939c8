use std::{error::Error, fmt, sync::Arc};

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use derive_more::Display;
use serde_json::json;
use tracing::{error, warn};

use crate::models::context::Context;

pub type BoxedErr = Box<dyn Error + Send + Sync>;

const MAX_ERROR_LENGTH: usize = 1024;

pub const MSG_ID_ERR_INTERNAL: &str = "error.internal";
const MSG_ERR_INTERNAL: &str = "internal server error";

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
  #[display("not_found")]
  NotFound,
  #[display("invalid_product")]
  InvalidProduct,
  #[display("immutable_field")]
  ImmutableField,
  #[display("invalid_quantity")]
  InvalidQuantity,
  #[display("json_marshal")]
  JsonMarshal,
  #[display("json_unmarshal")]
  JsonUnmarshal,
  #[display("io")]
  Io,
  #[display("config")]
  Config,
  #[display("internal_error")]
  Internal,
}

#[derive(Debug, Display)]
#[display("InternalError: {} {} {} {} {}", err_type, temp, err, msg, path)]
pub struct InternalError {
  pub err_type: ErrorType,
  pub temp: bool,
  pub err: BoxedErr,
  pub msg: String,
  pub path: String,
}

impl Error for InternalError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    Some(&*self.err)
  }
}

/// Error returned by the HTTP handlers. `message` goes to the client, the rest
/// is kept for the logs.
#[derive(Debug)]
pub struct AppError {
  pub id: String,
  pub message: String,
  pub detailed_error: String,
  pub request_id: Option<String>,
  pub status_code: StatusCode,
  pub where_: String,
  pub wrapped: Option<BoxedErr>,
}

impl AppError {
  pub fn new(
    ctx: Arc<Context>,
    where_: impl Into<String>,
    id: impl Into<String>,
    message: impl Into<String>,
    details: impl Into<String>,
    status_code: StatusCode,
    wrapped: Option<BoxedErr>,
  ) -> Self {
    let request_id = if ctx.request_id.is_empty() { None } else { Some(ctx.request_id.clone()) };

    Self {
      id: id.into(),
      message: message.into(),
      detailed_error: details.into(),
      request_id,
      status_code,
      where_: where_.into(),
      wrapped,
    }
  }

  pub fn internal(ctx: Arc<Context>, where_: impl Into<String>, err: BoxedErr) -> Self {
    Self::new(
      ctx,
      where_,
      MSG_ID_ERR_INTERNAL,
      MSG_ERR_INTERNAL,
      "",
      StatusCode::INTERNAL_SERVER_ERROR,
      Some(err),
    )
  }

  pub fn error_string(&self) -> String {
    let mut s = String::new();

    if !self.where_.is_empty() {
      s.push_str(&self.where_);
      s.push_str(": ");
    }

    s.push_str(&self.message);

    if !self.detailed_error.is_empty() {
      s.push_str(", ");
      s.push_str(&self.detailed_error);
    }

    if let Some(ref wrapped) = self.wrapped {
      s.push_str(", ");
      s.push_str(&wrapped.to_string());
    }

    if s.len() > MAX_ERROR_LENGTH {
      let mut end = MAX_ERROR_LENGTH;
      while !s.is_char_boundary(end) {
        end -= 1;
      }
      s.truncate(end);
      s.push_str("...");
    }

    s
  }

  pub fn wipe_detailed(&mut self) {
    self.wrapped = None;
    self.detailed_error.clear();
  }
}

impl fmt::Display for AppError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.error_string())
  }
}

impl Error for AppError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    self.wrapped.as_ref().map(|e| e.as_ref() as &(dyn Error + 'static))
  }
}

impl IntoResponse for AppError {
  fn into_response(mut self) -> Response {
    let request_id = self.request_id.clone().unwrap_or_default();
    if self.status_code.is_server_error() {
      error!(request_id = %request_id, error = %self, "request failed");
      self.wipe_detailed();
    } else {
      warn!(request_id = %request_id, error = %self, "request rejected");
    }

    let body = json!({ "error": self.message, "id": self.id });
    (self.status_code, Json(body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_string_joins_parts() {
    let err = AppError::new(
      Arc::new(Context::default()),
      "storefront.controller.product_details",
      "products.not_found",
      "Product not found",
      "id=7",
      StatusCode::NOT_FOUND,
      None,
    );
    assert_eq!(err.error_string(), "storefront.controller.product_details: Product not found, id=7");
    assert!(err.request_id.is_none());
  }

  #[test]
  fn test_error_string_is_truncated() {
    let long = "x".repeat(MAX_ERROR_LENGTH * 2);
    let err = AppError::new(
      Arc::new(Context::default()),
      "",
      "id",
      long,
      "",
      StatusCode::BAD_REQUEST,
      None,
    );
    assert_eq!(err.error_string().len(), MAX_ERROR_LENGTH + 3);
  }

  #[test]
  fn test_error_type_names() {
    assert_eq!(ErrorType::JsonUnmarshal.to_string(), "json_unmarshal");
    assert_eq!(ErrorType::InvalidProduct.to_string(), "invalid_product");
  }
}
