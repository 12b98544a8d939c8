use std::error::Error;
use std::fmt;

use crate::models::errors::{BoxedErr, ErrorType};

#[derive(Debug)]
pub struct StoreError {
  pub err_type: ErrorType,
  pub err: Option<BoxedErr>,
  pub msg: String,
  pub path: String,
  pub details: String,
}

impl fmt::Display for StoreError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut parts = Vec::new();

    if !self.path.is_empty() {
      parts.push(format!("path: {}", self.path));
    }

    parts.push(format!("err_type: {}", self.err_type));

    if !self.msg.is_empty() {
      parts.push(format!("msg: {}", self.msg));
    }

    if !self.details.is_empty() {
      parts.push(format!("details: {}", self.details));
    }

    if let Some(ref err) = self.err {
      parts.push(format!("err: {}", err));
    }

    write!(f, "{}", parts.join(", "))
  }
}

impl Error for StoreError {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    self.err.as_ref().map(|e| &**e as &dyn Error)
  }
}

impl StoreError {
  pub fn new(
    err_type: ErrorType,
    err: Option<BoxedErr>,
    msg: impl Into<String>,
    path: impl Into<String>,
    details: impl Into<String>,
  ) -> Self {
    Self { err_type, err, msg: msg.into(), path: path.into(), details: details.into() }
  }

  pub fn not_found(entity: &str, id: u64, path: impl Into<String>) -> Self {
    let msg = format!("{} not found", entity);
    Self::new(ErrorType::NotFound, None, msg, path, format!("id={}", id))
  }
}
