mod cart_add_product;
mod cart_create;
mod cart_details;
mod helpers;
mod middleware;
mod product_create;
mod product_delete;
mod product_details;
mod product_list;
mod product_update;
mod router;

#[cfg(test)]
mod tests;

use std::{error::Error, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
  Router,
  http::{Method, header::CONTENT_TYPE},
  middleware::from_fn,
};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower::ServiceBuilder;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};
use tracing::{error, info};

use crate::{
  models::{
    config::ServiceConfig,
    errors::{ErrorType, InternalError},
  },
  store::database::{CartsStore, ProductsStore},
};

#[derive(Debug)]
pub struct Controller {
  pub(super) cfg: ServiceConfig,
  pub(super) products: Arc<dyn ProductsStore>,
  pub(super) carts: Arc<dyn CartsStore>,
}

#[derive(Debug)]
pub struct ControllerArgs {
  pub cfg: ServiceConfig,
  pub products: Arc<dyn ProductsStore>,
  pub carts: Arc<dyn CartsStore>,
}

impl Controller {
  pub fn new(args: ControllerArgs) -> Controller {
    Controller { cfg: args.cfg, products: args.products, carts: args.carts }
  }

  /// The full HTTP application: routes, CORS, tracing and request context.
  pub fn router(self) -> Router {
    let cors = CorsLayer::new()
      .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
      .allow_headers([CONTENT_TYPE])
      .allow_origin(Any)
      .max_age(Duration::from_secs(60 * 60));

    let layer_stack = ServiceBuilder::new()
      .layer(TraceLayer::new_for_http())
      .layer(cors)
      .layer(from_fn(middleware::context_middleware));

    router::routes().layer(layer_stack).with_state(Arc::new(self))
  }

  pub async fn run(self) -> Result<(), Box<dyn Error>> {
    let address = self.cfg.http_address();

    let listener = TcpListener::bind(&address).await.map_err(|e| {
      Box::new(InternalError {
        err_type: ErrorType::Internal,
        err: Box::new(e),
        temp: false,
        msg: format!("failed to bind the http listener on {address}"),
        path: "storefront.controller.run".into(),
      })
    })?;

    let app = self.router();
    info!("storefront listening on {address}");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
      .with_graceful_shutdown(shutdown_signal())
      .await?;

    info!("storefront stopped");
    Ok(())
  }
}

async fn shutdown_signal() {
  let interrupt = async {
    match ctrl_c().await {
      Ok(()) => info!("received ctrl+c, shutting down"),
      Err(err) => {
        error!(error = %err, "failed to listen for ctrl+c");
        std::future::pending::<()>().await
      }
    }
  };

  #[cfg(unix)]
  let terminate = async {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
        info!("received terminate signal, shutting down");
      }
      Err(err) => {
        error!(error = %err, "failed to install the terminate handler");
        std::future::pending::<()>().await
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = interrupt => {},
    _ = terminate => {},
  }
}
