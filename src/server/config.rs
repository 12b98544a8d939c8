use std::{error::Error, io::ErrorKind, path::Path};

use tokio::fs;
use tracing::info;

use crate::{
  models::{
    config::Config,
    errors::{BoxedErr, ErrorType, InternalError},
  },
  server::Server,
};

/// Reads the service configuration. A missing file yields `Ok(None)`.
pub(super) async fn read_service_config(path: &Path) -> Result<Option<Config>, InternalError> {
  let mk_err = |msg: &str, err_type: ErrorType, err: BoxedErr| InternalError {
    err_type,
    temp: false,
    err,
    msg: msg.into(),
    path: "storefront.server.read_service_config".into(),
  };

  let yaml = match fs::read_to_string(path).await {
    Ok(s) => s,
    Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
    Err(e) => return Err(mk_err("failed to read the config file", ErrorType::Io, Box::new(e))),
  };

  serde_yaml::from_str(&yaml)
    .map(Some)
    .map_err(|e| mk_err("failed to parse the config file", ErrorType::Config, Box::new(e)))
}

impl Server {
  pub(super) async fn init_service_config(&self) -> Result<(), Box<dyn Error>> {
    let parsed = match read_service_config(&self.config_path).await? {
      Some(cfg) => cfg,
      None => {
        let _ = self
          .errors
          .send(InternalError {
            err_type: ErrorType::Config,
            temp: true,
            err: format!("{} does not exist", self.config_path.display()).into(),
            msg: "config file not found, using defaults".into(),
            path: "storefront.server.init_service_config".into(),
          })
          .await;
        Config::default()
      }
    };

    info!(file = %self.config_path.display(), "service config loaded");
    let mut config = self.service_config.lock().await;
    *config = parsed;

    Ok(())
  }
}
