//! Flat-file stores. Each collection lives in memory and is mirrored to one
//! JSON array on disk, rewritten in full after every mutation.
//!
//! Mutations run under the collection lock against a copy of the collection.
//! The copy replaces the live collection only once it has been written, so a
//! failed write leaves memory and disk in agreement.
//!
//! A backing file that exists but does not parse is never overwritten: loading
//! moves it to `<name>.corrupt-<ulid>`, and if that fails the file refuses
//! writes until a later load succeeds.

mod cart_add_product;
mod cart_create;
mod cart_details;
mod persist;
mod product_create;
mod product_delete;
mod product_details;
mod product_list;
mod product_update;
mod router;


use std::{
  ffi::OsString,
  path::{Path, PathBuf},
  sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
  },
};

use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, sync::Mutex};
use ulid::Ulid;

use crate::{
  events::Notifier,
  models::{
    carts::Cart,
    errors::{BoxedErr, ErrorType},
    products::Product,
  },
  store::database::errors::StoreError,
};

/// One JSON array on disk.
#[derive(Debug)]
pub struct JsonFile {
  path: PathBuf,
  /// Set while the target holds unparsed data that could not be moved aside.
  blocked: AtomicBool,
}

impl JsonFile {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into(), blocked: AtomicBool::new(false) }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub async fn read<T: DeserializeOwned>(&self) -> Result<Vec<T>, StoreError> {
    let mk_err = |err_type: ErrorType, msg: &str, err: BoxedErr| StoreError {
      err_type,
      err: Some(err),
      msg: msg.into(),
      path: "storefront.store.json_file.read".into(),
      details: format!("file={}", self.path.display()),
    };

    let data = fs::read(&self.path)
      .await
      .map_err(|e| mk_err(ErrorType::Io, "failed to read the backing file", Box::new(e)))?;

    let items = serde_json::from_slice(&data).map_err(|e| {
      mk_err(ErrorType::JsonUnmarshal, "failed to parse the backing file", Box::new(e))
    })?;

    self.blocked.store(false, Ordering::SeqCst);
    Ok(items)
  }

  /// Renames the target to `<name>.corrupt-<ulid>` and returns the new path.
  /// On failure the file refuses writes until the next successful read.
  pub async fn set_aside(&self) -> Result<PathBuf, StoreError> {
    let mut name = self.file_name();
    name.push(format!(".corrupt-{}", Ulid::new()));
    let target = self.path.with_file_name(name);

    match fs::rename(&self.path, &target).await {
      Ok(()) => {
        self.blocked.store(false, Ordering::SeqCst);
        Ok(target)
      }
      Err(e) => {
        self.blocked.store(true, Ordering::SeqCst);
        Err(StoreError::new(
          ErrorType::Io,
          Some(Box::new(e)),
          "failed to move the unreadable backing file aside",
          "storefront.store.json_file.set_aside",
          format!("file={}", self.path.display()),
        ))
      }
    }
  }

  /// Writes `items` as pretty-printed JSON. The data goes to a sibling
  /// temporary file first and is renamed over the target.
  pub async fn write<T: Serialize>(&self, items: &[T]) -> Result<(), StoreError> {
    let mk_err = |err_type: ErrorType, msg: &str, err: BoxedErr| StoreError {
      err_type,
      err: Some(err),
      msg: msg.into(),
      path: "storefront.store.json_file.write".into(),
      details: format!("file={}", self.path.display()),
    };

    if self.blocked.load(Ordering::SeqCst) {
      return Err(StoreError::new(
        ErrorType::Io,
        None,
        "the backing file holds data that could not be parsed",
        "storefront.store.json_file.write",
        format!("file={}", self.path.display()),
      ));
    }

    let data = serde_json::to_vec_pretty(items).map_err(|e| {
      mk_err(ErrorType::JsonMarshal, "failed to serialize the collection", Box::new(e))
    })?;

    let tmp = self.tmp_path();
    fs::write(&tmp, data)
      .await
      .map_err(|e| mk_err(ErrorType::Io, "failed to write the backing file", Box::new(e)))?;

    if let Err(e) = fs::rename(&tmp, &self.path).await {
      let _ = fs::remove_file(&tmp).await;
      return Err(mk_err(ErrorType::Io, "failed to replace the backing file", Box::new(e)));
    }

    Ok(())
  }

  fn tmp_path(&self) -> PathBuf {
    let mut name = self.file_name();
    name.push(".tmp");
    self.path.with_file_name(name)
  }

  fn file_name(&self) -> OsString {
    self.path.file_name().map(OsString::from).unwrap_or_else(|| "store".into())
  }
}

/// Writes `next` and, on success, makes it the live collection.
async fn commit<T: Serialize>(
  file: &JsonFile,
  live: &mut Vec<T>,
  next: Vec<T>,
) -> Result<(), StoreError> {
  file.write(&next).await?;
  *live = next;
  Ok(())
}

#[derive(Debug)]
pub struct ProductsStoreImpl {
  pub(crate) file: JsonFile,
  pub(crate) products: Mutex<Vec<Product>>,
  pub(crate) notifier: Arc<dyn Notifier>,
  pub(crate) require_thumbnail: bool,
}

#[derive(Debug)]
pub struct ProductsStoreImplArgs {
  pub file_path: PathBuf,
  pub require_thumbnail: bool,
  pub notifier: Arc<dyn Notifier>,
}

impl ProductsStoreImpl {
  pub fn new(args: ProductsStoreImplArgs) -> Self {
    Self {
      file: JsonFile::new(args.file_path),
      products: Mutex::new(vec![]),
      notifier: args.notifier,
      require_thumbnail: args.require_thumbnail,
    }
  }

  /// Creates the store and loads whatever the backing file holds.
  pub async fn open(args: ProductsStoreImplArgs) -> Self {
    let store = Self::new(args);
    persist::products_load(&store).await;
    store
  }
}

#[derive(Debug)]
pub struct CartsStoreImpl {
  pub(crate) file: JsonFile,
  pub(crate) carts: Mutex<Vec<Cart>>,
  pub(crate) notifier: Arc<dyn Notifier>,
}

#[derive(Debug)]
pub struct CartsStoreImplArgs {
  pub file_path: PathBuf,
  pub notifier: Arc<dyn Notifier>,
}

impl CartsStoreImpl {
  pub fn new(args: CartsStoreImplArgs) -> Self {
    Self { file: JsonFile::new(args.file_path), carts: Mutex::new(vec![]), notifier: args.notifier }
  }

  pub async fn open(args: CartsStoreImplArgs) -> Self {
    let store = Self::new(args);
    persist::carts_load(&store).await;
    store
  }
}
