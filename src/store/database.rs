pub mod errors;
pub mod filestore;

use std::{fmt, sync::Arc};

use async_trait::async_trait;

use crate::{
  models::{
    carts::Cart,
    context::Context,
    products::{Product, ProductCreate, ProductPatch},
  },
  store::database::errors::StoreError,
};

/// Product catalog. Implementations serialize mutations so a
/// read-modify-persist cycle is never interleaved with another one.
#[async_trait]
pub trait ProductsStore: fmt::Debug + Send + Sync {
  /// Reloads the collection from the backing store. Failures are logged and
  /// leave the current collection untouched.
  async fn products_load(&self);
  async fn products_save(&self) -> Result<(), StoreError>;

  async fn product_create(
    &self,
    ctx: Arc<Context>,
    product: ProductCreate,
  ) -> Result<Product, StoreError>;
  async fn product_list(
    &self,
    ctx: Arc<Context>,
    limit: Option<usize>,
  ) -> Result<Vec<Product>, StoreError>;
  async fn product_details(&self, ctx: Arc<Context>, id: u64) -> Result<Product, StoreError>;
  async fn product_update(
    &self,
    ctx: Arc<Context>,
    id: u64,
    patch: ProductPatch,
  ) -> Result<Product, StoreError>;
  async fn product_delete(&self, ctx: Arc<Context>, id: u64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait CartsStore: fmt::Debug + Send + Sync {
  async fn carts_load(&self);
  async fn carts_save(&self) -> Result<(), StoreError>;

  async fn cart_create(&self, ctx: Arc<Context>) -> Result<Cart, StoreError>;
  async fn cart_details(&self, ctx: Arc<Context>, id: u64) -> Result<Cart, StoreError>;
  /// Adds `quantity` of `product_id` to the cart. The product id is an opaque
  /// reference and is not looked up in the catalog.
  async fn cart_add_product(
    &self,
    ctx: Arc<Context>,
    cart_id: u64,
    product_id: u64,
    quantity: u64,
  ) -> Result<Cart, StoreError>;
}
