use tracing_subscriber::{
  EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

/// Installs the global subscriber. The filter comes from `RUST_LOG` and falls
/// back to `info`.
pub fn init_tracing() -> Result<(), TryInitError> {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::registry().with(env_filter).with(fmt::layer()).try_init()
}
