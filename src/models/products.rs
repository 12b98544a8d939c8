use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::models::Identified;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: u64,
  #[serde(default = "status_default")]
  pub status: bool,
  pub title: String,
  pub description: String,
  /// Kept as the number the client sent, so `10` stays `10`.
  pub price: Number,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub thumbnail: Option<String>,
  pub code: String,
  pub stock: u64,
  /// Client supplied fields outside the catalog schema, stored as-is.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

fn status_default() -> bool {
  true
}

impl Identified for Product {
  fn id(&self) -> u64 {
    self.id
  }
}

/// Body of a product creation request. Every known field is optional here so
/// that a missing one is reported as a validation error, not a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCreate {
  pub title: Option<String>,
  pub description: Option<String>,
  pub price: Option<Number>,
  pub thumbnail: Option<String>,
  pub code: Option<String>,
  pub stock: Option<u64>,
  pub status: Option<bool>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Partial update. `id` is captured only to reject it.
///
/// Known fields are `Some(None)` when the body holds an explicit `null`, so a
/// null can be told apart from an absent field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<Value>,
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub title: Option<Option<String>>,
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub description: Option<Option<String>>,
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub price: Option<Option<Number>>,
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub thumbnail: Option<Option<String>>,
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub code: Option<Option<String>>,
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub stock: Option<Option<u64>>,
  #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
  pub status: Option<Option<bool>>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductValidationError {
  #[error("missing required field: {0}")]
  MissingField(&'static str),
  #[error("field {0} must be a positive number")]
  NotPositive(&'static str),
  #[error("field {0} cannot be null")]
  NullField(&'static str),
  #[error("code '{0}' is already in use")]
  DuplicateCode(String),
}

fn is_blank(value: &Option<String>) -> bool {
  value.as_deref().map(str::trim).is_none_or(str::is_empty)
}

fn is_positive(price: &Number) -> bool {
  price.as_f64().is_some_and(|p| p > 0.0 && p.is_finite())
}

fn code_taken(products: &[Product], code: &str, except: Option<u64>) -> bool {
  products.iter().any(|p| p.code == code && Some(p.id) != except)
}

pub fn product_create_is_valid(
  product: &ProductCreate,
  existing: &[Product],
  require_thumbnail: bool,
) -> Result<(), ProductValidationError> {
  use ProductValidationError::*;

  if is_blank(&product.title) {
    return Err(MissingField("title"));
  }
  if is_blank(&product.description) {
    return Err(MissingField("description"));
  }
  match &product.price {
    None => return Err(MissingField("price")),
    Some(price) if !is_positive(price) => return Err(NotPositive("price")),
    Some(_) => {}
  }
  if is_blank(&product.code) {
    return Err(MissingField("code"));
  }
  match product.stock {
    None => return Err(MissingField("stock")),
    Some(0) => return Err(NotPositive("stock")),
    Some(_) => {}
  }
  if require_thumbnail && is_blank(&product.thumbnail) {
    return Err(MissingField("thumbnail"));
  }

  let code = product.code.as_deref().unwrap_or_default();
  if code_taken(existing, code, None) {
    return Err(DuplicateCode(code.to_string()));
  }

  Ok(())
}

/// Builds the stored product once `product_create_is_valid` has passed.
pub fn product_create_pre_save(id: u64, product: ProductCreate) -> Product {
  let mut extra = product.extra;
  extra.remove("id");

  Product {
    id,
    status: product.status.unwrap_or(true),
    title: product.title.unwrap_or_default(),
    description: product.description.unwrap_or_default(),
    price: product.price.unwrap_or_else(|| Number::from(0)),
    thumbnail: product.thumbnail,
    code: product.code.unwrap_or_default(),
    stock: product.stock.unwrap_or_default(),
    extra,
  }
}

/// Checks the fields a patch touches. Stock may drop to zero. Null is only accepted for
/// `thumbnail`, where it clears the field, and not when thumbnails are required.
pub fn product_patch_is_valid(
  id: u64,
  patch: &ProductPatch,
  existing: &[Product],
  require_thumbnail: bool,
) -> Result<(), ProductValidationError> {
  use ProductValidationError::*;

  let nulls = [
    ("title", patch.title.as_ref().is_some_and(Option::is_none)),
    ("description", patch.description.as_ref().is_some_and(Option::is_none)),
    ("price", patch.price.as_ref().is_some_and(Option::is_none)),
    ("code", patch.code.as_ref().is_some_and(Option::is_none)),
    ("stock", patch.stock.as_ref().is_some_and(Option::is_none)),
    ("status", patch.status.as_ref().is_some_and(Option::is_none)),
  ];
  if let Some((field, _)) = nulls.into_iter().find(|(_, null)| *null) {
    return Err(NullField(field));
  }

  let blank = |v: &Option<Option<String>>| matches!(v, Some(inner) if is_blank(inner));
  if blank(&patch.title) {
    return Err(MissingField("title"));
  }
  if blank(&patch.description) {
    return Err(MissingField("description"));
  }
  if blank(&patch.code) {
    return Err(MissingField("code"));
  }
  if require_thumbnail && blank(&patch.thumbnail) {
    return Err(MissingField("thumbnail"));
  }
  if let Some(Some(price)) = &patch.price {
    if !is_positive(price) {
      return Err(NotPositive("price"));
    }
  }
  if let Some(Some(code)) = &patch.code {
    if code_taken(existing, code, Some(id)) {
      return Err(DuplicateCode(code.to_string()));
    }
  }

  Ok(())
}

impl Product {
  /// Shallow merge: every field present in the patch overwrites the stored one.
  /// A null `thumbnail` removes it.
  pub fn apply(&mut self, patch: ProductPatch) {
    if let Some(Some(title)) = patch.title {
      self.title = title;
    }
    if let Some(Some(description)) = patch.description {
      self.description = description;
    }
    if let Some(Some(price)) = patch.price {
      self.price = price;
    }
    if let Some(thumbnail) = patch.thumbnail {
      self.thumbnail = thumbnail;
    }
    if let Some(Some(code)) = patch.code {
      self.code = code;
    }
    if let Some(Some(stock)) = patch.stock {
      self.stock = stock;
    }
    if let Some(Some(status)) = patch.status {
      self.status = status;
    }
    self.extra.extend(patch.extra);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn payload(code: &str) -> ProductCreate {
    serde_json::from_value(json!({
      "title": "God of War",
      "description": "juego de dioses",
      "price": 5000,
      "code": code,
      "stock": 10,
    }))
    .unwrap()
  }

  #[test]
  fn test_valid_payload() {
    assert_eq!(product_create_is_valid(&payload("P001"), &[], false), Ok(()));
  }

  #[test]
  fn test_missing_fields_are_reported_in_order() {
    let mut p = payload("P001");
    p.title = None;
    p.stock = None;
    assert_eq!(product_create_is_valid(&p, &[], false), Err(ProductValidationError::MissingField("title")));

    let mut p = payload("P001");
    p.code = Some("   ".into());
    assert_eq!(product_create_is_valid(&p, &[], false), Err(ProductValidationError::MissingField("code")));
  }

  #[test]
  fn test_non_positive_values() {
    let mut p = payload("P001");
    p.price = Some(Number::from(0));
    assert_eq!(product_create_is_valid(&p, &[], false), Err(ProductValidationError::NotPositive("price")));

    let mut p = payload("P001");
    p.stock = Some(0);
    assert_eq!(product_create_is_valid(&p, &[], false), Err(ProductValidationError::NotPositive("stock")));
  }

  #[test]
  fn test_thumbnail_only_required_when_configured() {
    let p = payload("P001");
    assert!(product_create_is_valid(&p, &[], false).is_ok());
    assert_eq!(
      product_create_is_valid(&p, &[], true),
      Err(ProductValidationError::MissingField("thumbnail"))
    );
  }

  #[test]
  fn test_duplicate_code() {
    let existing = vec![product_create_pre_save(1, payload("P001"))];
    assert_eq!(
      product_create_is_valid(&payload("P001"), &existing, false),
      Err(ProductValidationError::DuplicateCode("P001".into()))
    );
    assert!(product_create_is_valid(&payload("P002"), &existing, false).is_ok());
  }

  #[test]
  fn test_pre_save_defaults_status_and_drops_client_id() {
    let mut p = payload("P001");
    p.extra.insert("id".into(), json!(42));
    p.extra.insert("category".into(), json!("games"));

    let product = product_create_pre_save(3, p);
    assert_eq!(product.id, 3);
    assert!(product.status);
    assert_eq!(product.extra.get("category"), Some(&json!("games")));
    assert!(!product.extra.contains_key("id"));

    let value = serde_json::to_value(&product).unwrap();
    assert_eq!(value["id"], json!(3));
    assert_eq!(value["category"], json!("games"));
  }

  #[test]
  fn test_patch_keeps_code_unique_except_for_self() {
    let existing =
      vec![product_create_pre_save(1, payload("P001")), product_create_pre_save(2, payload("P002"))];
    let patch = ProductPatch { code: Some(Some("P002".into())), ..Default::default() };
    assert_eq!(
      product_patch_is_valid(1, &patch, &existing, false),
      Err(ProductValidationError::DuplicateCode("P002".into()))
    );
    assert!(product_patch_is_valid(2, &patch, &existing, false).is_ok());
  }

  #[test]
  fn test_apply_merges_known_and_extra_fields() {
    let mut product = product_create_pre_save(1, payload("P001"));
    let patch: ProductPatch =
      serde_json::from_value(json!({ "price": 4500, "status": false, "color": "red" })).unwrap();
    product.apply(patch);

    assert_eq!(product.price, Number::from(4500));
    assert!(!product.status);
    assert_eq!(product.title, "God of War");
    assert_eq!(product.extra.get("color"), Some(&json!("red")));
  }

  #[test]
  fn test_patch_captures_id() {
    let patch: ProductPatch = serde_json::from_value(json!({ "id": 99 })).unwrap();
    assert_eq!(patch.id, Some(json!(99)));
    assert!(patch.extra.is_empty());
  }

  #[test]
  fn test_patch_rejects_null_on_required_fields() {
    let existing = vec![product_create_pre_save(1, payload("P001"))];
    for field in ["title", "description", "price", "code", "stock", "status"] {
      let patch: ProductPatch = serde_json::from_str(&format!(r#"{{"{field}": null}}"#)).unwrap();
      assert_eq!(
        product_patch_is_valid(1, &patch, &existing, false),
        Err(ProductValidationError::NullField(field))
      );
    }
  }

  #[test]
  fn test_patch_null_thumbnail_clears_it() {
    let mut p = payload("P001");
    p.thumbnail = Some("a.png".into());
    let mut product = product_create_pre_save(1, p);

    let patch: ProductPatch = serde_json::from_value(json!({ "thumbnail": null })).unwrap();
    assert_eq!(patch.thumbnail, Some(None));
    assert!(product_patch_is_valid(1, &patch, &[], false).is_ok());
    assert_eq!(
      product_patch_is_valid(1, &patch, &[], true),
      Err(ProductValidationError::MissingField("thumbnail"))
    );

    product.apply(patch);
    assert!(product.thumbnail.is_none());
    assert!(serde_json::to_value(&product).unwrap().get("thumbnail").is_none());
  }

  #[test]
  fn test_price_keeps_the_number_sent() {
    let product = product_create_pre_save(1, payload("P001"));
    assert_eq!(serde_json::to_string(&product.price).unwrap(), "5000");

    let mut p = payload("P002");
    p.price = Some(Number::from_f64(12.5).unwrap());
    let product = product_create_pre_save(2, p);
    assert_eq!(serde_json::to_value(&product).unwrap()["price"], json!(12.5));
  }
}
