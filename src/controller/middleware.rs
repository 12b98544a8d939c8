use std::{net::SocketAddr, sync::Arc};

use axum::{
  extract::{ConnectInfo, Request},
  middleware::Next,
  response::Response,
};
use http::{
  HeaderName, HeaderValue,
  header::{ACCEPT_LANGUAGE, USER_AGENT},
};
use ulid::Ulid;

use crate::models::context::Context;

pub(super) const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");
const X_REAL_IP: HeaderName = HeaderName::from_static("x-real-ip");
const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Builds the request [`Context`] and echoes the request id on the response.
/// A request id is generated when the client did not send one.
pub(super) async fn context_middleware(mut req: Request, next: Next) -> Response {
  let context = {
    let headers = req.headers();
    let get_string =
      |key: &HeaderName| headers.get(key).and_then(|v| v.to_str().ok()).unwrap_or("").to_string();

    let mut request_id = get_string(&X_REQUEST_ID);
    if request_id.is_empty() {
      request_id = Ulid::new().to_string();
    }

    let mut ip_address = get_string(&X_REAL_IP);
    if ip_address.is_empty() {
      ip_address = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default();
    }

    Context::new(
      request_id,
      ip_address,
      get_string(&X_FORWARDED_FOR),
      req.uri().path().to_string(),
      get_string(&USER_AGENT),
      get_string(&ACCEPT_LANGUAGE),
    )
  };

  let request_id = HeaderValue::from_str(&context.request_id).ok();
  req.extensions_mut().insert(Arc::new(context));

  let mut res = next.run(req).await;
  if let Some(id) = request_id {
    res.headers_mut().insert(X_REQUEST_ID, id);
  }
  res
}
