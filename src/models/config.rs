use std::path::PathBuf;

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  pub service: ServiceConfig,
  pub products: ProductsConfig,
  pub carts: CartsConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
  pub env: String,
  pub http_host: String,
  pub http_port: u16,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ProductsConfig {
  pub file_path: PathBuf,
  pub require_thumbnail: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CartsConfig {
  pub file_path: PathBuf,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    ServiceConfig { env: "local".to_string(), http_host: "0.0.0.0".to_string(), http_port: 8080 }
  }
}

impl Default for ProductsConfig {
  fn default() -> Self {
    ProductsConfig { file_path: PathBuf::from("products.json"), require_thumbnail: false }
  }
}

impl Default for CartsConfig {
  fn default() -> Self {
    CartsConfig { file_path: PathBuf::from("carts.json") }
  }
}

impl ServiceConfig {
  pub fn http_address(&self) -> String {
    format!("{}:{}", self.http_host, self.http_port)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_partial_yaml_keeps_defaults() {
    let yaml = r#"
service:
  http_port: 9090
products:
  require_thumbnail: true
"#;
    let cfg: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.service.http_port, 9090);
    assert_eq!(cfg.service.http_address(), "0.0.0.0:9090");
    assert!(cfg.products.require_thumbnail);
    assert_eq!(cfg.products.file_path, PathBuf::from("products.json"));
    assert_eq!(cfg.carts.file_path, PathBuf::from("carts.json"));
  }
}
