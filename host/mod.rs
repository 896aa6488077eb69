use crate::*;

mod shutdown;
pub use shutdown::*;

mod traces;
pub use traces::*;

use axum::extract::DefaultBodyLimit;
use std::net::{Ipv6Addr, SocketAddr};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

/// Assembles the whole service around an explicitly passed store
pub fn app(store: Store, config: &AppConfig) -> Router {
    Router::new()
        .merge(api_routes())
        .merge(page_routes())
        .fallback(crate::api::no_route)
        .with_state(store)
        .add_utility_layers(config.request_body_limit)
        .add_tracing()
}

/// Utility trait to layer the app router as the host
pub trait HostUtils {
    fn add_tracing(self) -> Self;
    fn add_utility_layers(self, request_body_limit: usize) -> Self;
}

impl HostUtils for Router {
    fn add_tracing(self) -> Self {
        self.layer(trace_layer())
    }
    fn add_utility_layers(self, request_body_limit: usize) -> Self {
        let host_services = ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(DefaultBodyLimit::max(request_body_limit));
        #[cfg(not(debug_assertions))]
        let host_services = host_services.layer(tower_http::compression::CompressionLayer::new());
        self.layer(host_services)
    }
}

/// Binds to `PORT` and serves until a shutdown signal arrives
pub async fn serve(router: Router, config: &AppConfig) -> Result {
    let addr = SocketAddr::from((Ipv6Addr::UNSPECIFIED, config.port));
    let handle = server_handle();
    #[cfg(debug_assertions)]
    info!(target: "server", "Starting serving {} at {}", config.name, config.localhost());
    #[cfg(not(debug_assertions))]
    info!(target: "server", "Starting serving {} at {addr}", config.name);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;
    Ok(())
}

fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    error!("Panic occured: {details}");

    failure(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
}
