use std::{path::Path, sync::Arc};

use axum::{
  Router,
  body::{Body, to_bytes},
  http::{HeaderMap, Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{
  controller::{Controller, ControllerArgs},
  events::{Notifier, TracingNotifier},
  models::config::ServiceConfig,
  store::database::filestore::{
    CartsStoreImpl, CartsStoreImplArgs, ProductsStoreImpl, ProductsStoreImplArgs,
  },
};

async fn app_at(products_file: &Path, carts_file: &Path) -> Router {
  let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
  let products = ProductsStoreImpl::open(ProductsStoreImplArgs {
    file_path: products_file.to_path_buf(),
    require_thumbnail: false,
    notifier: notifier.clone(),
  })
  .await;
  let carts = CartsStoreImpl::open(CartsStoreImplArgs {
    file_path: carts_file.to_path_buf(),
    notifier,
  })
  .await;

  Controller::new(ControllerArgs {
    cfg: ServiceConfig::default(),
    products: Arc::new(products),
    carts: Arc::new(carts),
  })
  .router()
}

async fn app(dir: &TempDir) -> Router {
  app_at(&dir.path().join("products.json"), &dir.path().join("carts.json")).await
}

async fn send(
  app: &Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
  let mut req = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(value) => {
      req = req.header(CONTENT_TYPE, "application/json");
      Body::from(value.to_string())
    }
    None => Body::empty(),
  };

  let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
  let status = res.status();
  let headers = res.headers().clone();
  let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
  let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };

  (status, headers, value)
}

fn product(code: &str) -> Value {
  json!({
    "title": "Pen",
    "description": "Blue",
    "price": 10,
    "thumbnail": "p.png",
    "code": code,
    "stock": 5
  })
}

#[tokio::test]
async fn test_create_then_fetch_product() {
  let dir = TempDir::new().unwrap();
  let app = app(&dir).await;

  let (status, _, created) = send(&app, "POST", "/api/products", Some(product("P1"))).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(created["id"], json!(1));
  assert_eq!(created["status"], json!(true));
  assert_eq!(created["code"], json!("P1"));
  assert_eq!(created["price"], json!(10));

  let (status, _, fetched) = send(&app, "GET", "/api/products/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched, created);

  let (status, _, legacy) = send(&app, "GET", "/products/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(legacy, created);
}

#[tokio::test]
async fn test_create_rejects_invalid_product() {
  let dir = TempDir::new().unwrap();
  let app = app(&dir).await;

  let mut body = product("P1");
  body.as_object_mut().unwrap().remove("price");
  let (status, _, err) = send(&app, "POST", "/api/products", Some(body)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err["error"], json!("missing required field: price"));

  send(&app, "POST", "/api/products", Some(product("P1"))).await;
  let (status, _, err) = send(&app, "POST", "/api/products", Some(product("P1"))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err["error"], json!("code 'P1' is already in use"));

  let (status, _, _) = send(&app, "POST", "/api/products", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (_, _, all) = send(&app, "GET", "/api/products", None).await;
  assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_body() {
  let dir = TempDir::new().unwrap();
  let app = app(&dir).await;

  let req = Request::builder()
    .method("POST")
    .uri("/api/products")
    .header(CONTENT_TYPE, "application/json")
    .body(Body::from("{not json"))
    .unwrap();
  let res = app.clone().oneshot(req).await.unwrap();
  assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_with_limit() {
  let dir = TempDir::new().unwrap();
  let app = app(&dir).await;
  for code in ["A", "B", "C"] {
    send(&app, "POST", "/api/products", Some(product(code))).await;
  }

  let (status, _, two) = send(&app, "GET", "/api/products?limit=2", None).await;
  assert_eq!(status, StatusCode::OK);
  let codes: Vec<&str> = two.as_array().unwrap().iter().map(|p| p["code"].as_str().unwrap()).collect();
  assert_eq!(codes, ["A", "B"]);

  let (_, _, all) = send(&app, "GET", "/api/products?limit=abc", None).await;
  assert_eq!(all.as_array().unwrap().len(), 3);

  let (_, _, legacy) = send(&app, "GET", "/products?limit=1", None).await;
  assert_eq!(legacy.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_product_lookup_errors() {
  let dir = TempDir::new().unwrap();
  let app = app(&dir).await;

  let (status, _, err) = send(&app, "GET", "/api/products/abc", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err["error"], json!("Invalid product ID"));

  let (status, _, err) = send(&app, "GET", "/api/products/99", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(err["error"], json!("Product not found"));
  assert_eq!(err["id"], json!("store.not_found"));
}

#[tokio::test]
async fn test_update_product() {
  let dir = TempDir::new().unwrap();
  let app = app(&dir).await;
  send(&app, "POST", "/api/products", Some(product("P1"))).await;

  let (status, _, updated) =
    send(&app, "PUT", "/api/products/1", Some(json!({ "price": 12.5, "stock": 0 }))).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["price"], json!(12.5));
  assert_eq!(updated["stock"], json!(0));
  assert_eq!(updated["title"], json!("Pen"));

  let (status, _, err) = send(&app, "PUT", "/api/products/1", Some(json!({ "id": 5 }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err["error"], json!("Cannot update product ID"));

  let (status, _, _) = send(&app, "PUT", "/api/products/42", Some(json!({ "price": 1 }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);

  let (status, _, err) = send(&app, "PUT", "/api/products/x", Some(json!({ "price": 1 }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err["error"], json!("Invalid product ID"));

  let (status, _, err) = send(&app, "PUT", "/api/products/1", Some(json!({ "title": null }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err["error"], json!("field title cannot be null"));

  let (status, _, cleared) =
    send(&app, "PUT", "/api/products/1", Some(json!({ "thumbnail": null }))).await;
  assert_eq!(status, StatusCode::OK);
  assert!(cleared.get("thumbnail").is_none());

  let (_, _, fetched) = send(&app, "GET", "/api/products/1", None).await;
  assert_eq!(fetched["price"], json!(12.5));
  assert_eq!(fetched["title"], json!("Pen"));
}

#[tokio::test]
async fn test_delete_product() {
  let dir = TempDir::new().unwrap();
  let app = app(&dir).await;
  send(&app, "POST", "/api/products", Some(product("P1"))).await;

  let (status, _, body) = send(&app, "DELETE", "/api/products/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "message": "Product deleted successfully" }));

  let (status, _, _) = send(&app, "DELETE", "/api/products/1", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _, _) = send(&app, "GET", "/api/products/1", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cart_flow() {
  let dir = TempDir::new().unwrap();
  let app = app(&dir).await;

  let (status, _, cart) = send(&app, "POST", "/api/carts", None).await;
  assert_eq!(status, StatusCode::CREATED);
  assert_eq!(cart, json!({ "id": 1, "products": [] }));

  let (status, _, cart) = send(&app, "POST", "/api/carts/1/product/7", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(cart["products"], json!([{ "id": 7, "quantity": 1 }]));

  let (_, _, cart) =
    send(&app, "POST", "/api/carts/1/product/7", Some(json!({ "quantity": 2 }))).await;
  assert_eq!(cart["products"], json!([{ "id": 7, "quantity": 3 }]));

  let (status, _, fetched) = send(&app, "GET", "/api/carts/1", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched, cart);
}

#[tokio::test]
async fn test_cart_errors() {
  let dir = TempDir::new().unwrap();
  let app = app(&dir).await;
  send(&app, "POST", "/api/carts", None).await;

  let (status, _, err) = send(&app, "GET", "/api/carts/9", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert_eq!(err["error"], json!("Cart not found"));

  let (status, _, err) = send(&app, "GET", "/api/carts/one", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err["error"], json!("Invalid cart ID"));

  let (status, _, err) = send(&app, "POST", "/api/carts/x/product/1", None).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err["error"], json!("Invalid cart or product ID"));

  let (status, _, _) = send(&app, "POST", "/api/carts/9/product/1", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);

  let (status, _, err) =
    send(&app, "POST", "/api/carts/1/product/1", Some(json!({ "quantity": 0 }))).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert_eq!(err["error"], json!("Quantity must be a positive integer"));

  let (_, _, cart) = send(&app, "GET", "/api/carts/1", None).await;
  assert_eq!(cart["products"], json!([]));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
  let dir = TempDir::new().unwrap();
  let app = app(&dir).await;

  let req = Request::builder().uri("/api/products").header("x-request-id", "req-42");
  let res = app.clone().oneshot(req.body(Body::empty()).unwrap()).await.unwrap();
  assert_eq!(res.headers()["x-request-id"], "req-42");

  let (_, headers, _) = send(&app, "GET", "/api/products", None).await;
  let generated = headers["x-request-id"].to_str().unwrap();
  assert_eq!(generated.len(), 26);
}

#[tokio::test]
async fn test_storage_failure_is_internal() {
  let dir = TempDir::new().unwrap();
  let missing = dir.path().join("missing");
  let app = app_at(&missing.join("products.json"), &missing.join("carts.json")).await;

  let (status, _, err) = send(&app, "POST", "/api/products", Some(product("P1"))).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  assert_eq!(err["error"], json!("internal server error"));

  let (status, _, _) = send(&app, "POST", "/api/carts", None).await;
  assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

  let (_, _, all) = send(&app, "GET", "/api/products", None).await;
  assert_eq!(all, json!([]));
}
