//! Change notifications published by the stores after a mutation has been
//! written to disk.
//!
//! Stores receive an `Arc<dyn Notifier>` at construction. Nothing is published
//! for rejected requests or for writes that failed.

use std::fmt;

use derive_more::Display;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::models::{carts::Cart, products::Product};

#[derive(Debug, Clone, PartialEq, Serialize, Display)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum StoreEvent {
  #[display("product_created {}", _0.id)]
  ProductCreated(Product),
  #[display("product_updated {}", _0.id)]
  ProductUpdated(Product),
  #[display("product_deleted {id}")]
  ProductDeleted { id: u64 },
  #[display("cart_created {}", _0.id)]
  CartCreated(Cart),
  #[display("cart_updated {}", _0.id)]
  CartUpdated(Cart),
}

pub trait Notifier: fmt::Debug + Send + Sync {
  fn notify(&self, event: StoreEvent);
}

/// Writes every event to the log.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
  fn notify(&self, event: StoreEvent) {
    info!(target: "events", %event, "store changed");
  }
}

/// Fans events out to any number of in-process subscribers. Subscribers that
/// fall behind the channel capacity miss the oldest events.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
  sender: broadcast::Sender<StoreEvent>,
}

impl BroadcastNotifier {
  pub fn new(capacity: usize) -> Self {
    let (sender, _) = broadcast::channel(capacity.max(1));
    Self { sender }
  }

  pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
    self.sender.subscribe()
  }
}

impl Notifier for BroadcastNotifier {
  fn notify(&self, event: StoreEvent) {
    debug!(%event, "broadcasting store event");
    // no receivers is not an error
    let _ = self.sender.send(event);
  }
}
