use serde::{Deserialize, Serialize};

use crate::models::Identified;

/// A product reference inside a cart. `id` is the product id; it is not
/// checked against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
  pub id: u64,
  pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
  pub id: u64,
  #[serde(default)]
  pub products: Vec<CartItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartAddProduct {
  #[serde(default = "quantity_default")]
  pub quantity: u64,
}

fn quantity_default() -> u64 {
  1
}

impl Default for CartAddProduct {
  fn default() -> Self {
    Self { quantity: quantity_default() }
  }
}

impl Identified for Cart {
  fn id(&self) -> u64 {
    self.id
  }
}

impl Cart {
  pub fn new(id: u64) -> Self {
    Self { id, products: vec![] }
  }

  /// Adds `quantity` units of `product_id`, merging into an existing entry.
  pub fn add_product(&mut self, product_id: u64, quantity: u64) {
    match self.products.iter_mut().find(|item| item.id == product_id) {
      Some(item) => item.quantity = item.quantity.saturating_add(quantity),
      None => self.products.push(CartItem { id: product_id, quantity }),
    }
  }
}
