use std::sync::Arc;

use crate::{
  events::{Notifier, TracingNotifier},
  models::config::Config,
  server::Server,
  store::database::{
    CartsStore, ProductsStore,
    filestore::{CartsStoreImpl, CartsStoreImplArgs, ProductsStoreImpl, ProductsStoreImplArgs},
  },
};

impl Server {
  /// Opens both stores. An unreadable data file leaves that store empty.
  pub(super) async fn init_stores(
    &self,
    cfg: &Config,
  ) -> (Arc<dyn ProductsStore>, Arc<dyn CartsStore>) {
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);

    let products = ProductsStoreImpl::open(ProductsStoreImplArgs {
      file_path: cfg.products.file_path.clone(),
      require_thumbnail: cfg.products.require_thumbnail,
      notifier: notifier.clone(),
    })
    .await;

    let carts = CartsStoreImpl::open(CartsStoreImplArgs {
      file_path: cfg.carts.file_path.clone(),
      notifier,
    })
    .await;

    (Arc::new(products), Arc::new(carts))
  }
}
