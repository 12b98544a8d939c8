use derive_more::Display;

/// Per-request data collected by the context middleware.
#[derive(Debug, Clone, Default, Display)]
#[display("Context: {request_id} {ip_address} {path}")]
pub struct Context {
  pub request_id: String,
  pub ip_address: String,
  pub x_forwarded_for: String,
  pub path: String,
  pub user_agent: String,
  pub accept_language: String,
}

impl Context {
  pub fn new(
    request_id: String,
    ip_address: String,
    x_forwarded_for: String,
    path: String,
    user_agent: String,
    accept_language: String,
  ) -> Self {
    Self { request_id, ip_address, x_forwarded_for, path, user_agent, accept_language }
  }

  pub fn accept_language(&self) -> &str {
    if self.accept_language.is_empty() { "en" } else { &self.accept_language }
  }
}
