mod config;
mod store;

use std::{error::Error, path::PathBuf, sync::Arc};

use tokio::{
  spawn,
  sync::{
    Mutex,
    mpsc::{self, Receiver},
  },
};
use tracing::{error, info, warn};

use crate::{
  controller::{Controller, ControllerArgs},
  models::{config::Config, errors::InternalError},
};

pub struct Server {
  pub(crate) errors: mpsc::Sender<InternalError>,
  pub(crate) service_config: Arc<Mutex<Config>>,
  pub(crate) config_path: PathBuf,
}

#[derive(Debug)]
pub struct ServerArgs {
  pub config_path: PathBuf,
}

impl Server {
  pub async fn new(args: ServerArgs) -> Result<Self, Box<dyn Error>> {
    let (tx, rx) = mpsc::channel::<InternalError>(100);

    spawn(async move {
      Server::errors_listener(rx).await;
    });

    let server = Self {
      errors: tx,
      service_config: Arc::new(Mutex::new(Config::default())),
      config_path: args.config_path,
    };

    server.init_service_config().await?;

    Ok(server)
  }

  pub async fn run(&mut self) -> Result<(), Box<dyn Error>> {
    let cfg = self.service_config.lock().await.clone();
    info!(env = %cfg.service.env, address = %cfg.service.http_address(), "starting storefront");

    let (products, carts) = self.init_stores(&cfg).await;

    let ctr_args = ControllerArgs { cfg: cfg.service, products, carts };
    let controller = Controller::new(ctr_args);
    controller.run().await
  }

  async fn errors_listener(mut receiver: Receiver<InternalError>) {
    while let Some(err) = receiver.recv().await {
      if err.temp {
        warn!(path = %err.path, error = %err.err, "{}", err.msg);
      } else {
        error!(path = %err.path, error = %err.err, "{}", err.msg);
      }
    }
  }
}
