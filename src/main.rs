use std::{env, error::Error, path::PathBuf};

use storefront::{
  server::{Server, ServerArgs},
  telemetry::init_tracing,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
  init_tracing()?;

  let config_path = env::var("STOREFRONT_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
  let args = ServerArgs { config_path: PathBuf::from(config_path) };

  let mut server = Server::new(args).await?;
  server.run().await
}
