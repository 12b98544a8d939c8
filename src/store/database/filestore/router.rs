use std::sync::Arc;

use async_trait::async_trait;

use crate::{
  models::{
    carts::Cart,
    context::Context,
    products::{Product, ProductCreate, ProductPatch},
  },
  store::database::{
    CartsStore, ProductsStore,
    errors::StoreError,
    filestore::{
      CartsStoreImpl, ProductsStoreImpl, cart_add_product::cart_add_product,
      cart_create::cart_create, cart_details::cart_details, persist, product_create::product_create,
      product_delete::product_delete, product_details::product_details,
      product_list::product_list, product_update::product_update,
    },
  },
};

#[async_trait]
impl ProductsStore for ProductsStoreImpl {
  async fn products_load(&self) {
    persist::products_load(self).await
  }
  async fn products_save(&self) -> Result<(), StoreError> {
    persist::products_save(self).await
  }
  async fn product_create(
    &self,
    ctx: Arc<Context>,
    product: ProductCreate,
  ) -> Result<Product, StoreError> {
    product_create(self, ctx, product).await
  }
  async fn product_list(
    &self,
    ctx: Arc<Context>,
    limit: Option<usize>,
  ) -> Result<Vec<Product>, StoreError> {
    product_list(self, ctx, limit).await
  }
  async fn product_details(&self, ctx: Arc<Context>, id: u64) -> Result<Product, StoreError> {
    product_details(self, ctx, id).await
  }
  async fn product_update(
    &self,
    ctx: Arc<Context>,
    id: u64,
    patch: ProductPatch,
  ) -> Result<Product, StoreError> {
    product_update(self, ctx, id, patch).await
  }
  async fn product_delete(&self, ctx: Arc<Context>, id: u64) -> Result<(), StoreError> {
    product_delete(self, ctx, id).await
  }
}

#[async_trait]
impl CartsStore for CartsStoreImpl {
  async fn carts_load(&self) {
    persist::carts_load(self).await
  }
  async fn carts_save(&self) -> Result<(), StoreError> {
    persist::carts_save(self).await
  }
  async fn cart_create(&self, ctx: Arc<Context>) -> Result<Cart, StoreError> {
    cart_create(self, ctx).await
  }
  async fn cart_details(&self, ctx: Arc<Context>, id: u64) -> Result<Cart, StoreError> {
    cart_details(self, ctx, id).await
  }
  async fn cart_add_product(
    &self,
    ctx: Arc<Context>,
    cart_id: u64,
    product_id: u64,
    quantity: u64,
  ) -> Result<Cart, StoreError> {
    cart_add_product(self, ctx, cart_id, product_id, quantity).await
  }
}
