use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::{
  models::errors::ErrorType,
  store::database::{
    errors::StoreError,
    filestore::{CartsStoreImpl, JsonFile, ProductsStoreImpl},
  },
};

/// Replaces `live` with the file contents. On failure the collection is kept,
/// and a file that exists but does not parse is moved out of the way so the
/// next write cannot destroy it.
async fn load<T: DeserializeOwned>(file: &JsonFile, live: &Mutex<Vec<T>>, entity: &str) {
  match file.read().await {
    Ok(loaded) => {
      let mut items = live.lock().await;
      *items = loaded;
      info!(file = %file.path().display(), count = items.len(), "{entity} loaded");
    }
    Err(err) if err.err_type == ErrorType::JsonUnmarshal => match file.set_aside().await {
      Ok(moved) => warn!(
        error = %err,
        moved_to = %moved.display(),
        "{entity} file unreadable, moved aside and keeping the current collection"
      ),
      Err(e) => error!(
        error = %err,
        set_aside_error = %e,
        "{entity} file unreadable and left in place, writes are refused"
      ),
    },
    Err(err) => {
      warn!(error = %err, "{entity} not loaded, keeping the current collection");
    }
  }
}

pub(super) async fn products_load(s: &ProductsStoreImpl) {
  load(&s.file, &s.products, "products").await
}

pub(super) async fn products_save(s: &ProductsStoreImpl) -> Result<(), StoreError> {
  let products = s.products.lock().await;
  s.file
    .write(products.as_slice())
    .await
    .inspect_err(|err| error!(error = %err, "failed to save products"))
}

pub(super) async fn carts_load(s: &CartsStoreImpl) {
  load(&s.file, &s.carts, "carts").await
}

pub(super) async fn carts_save(s: &CartsStoreImpl) -> Result<(), StoreError> {
  let carts = s.carts.lock().await;
  s.file
    .write(carts.as_slice())
    .await
    .inspect_err(|err| error!(error = %err, "failed to save carts"))
}
