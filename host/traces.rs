use crate::*;

use axum::body::Body;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::TraceLayer,
};
use tracing::{Level, Span};
pub use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

#[cfg(debug_assertions)]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::DEBUG;
#[cfg(not(debug_assertions))]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

fn pretty_filter() -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(DEFAULT_LEVEL.into())
        .from_env_lossy();
    ["sqlx=warn", "h2=info", "hyper=info", "tower_http=info"]
        .into_iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(filter, |filter, directive| filter.add_directive(directive))
}

/// Initializes log printing, `RUST_LOG` overrides the default level
pub fn init_tracing_subscriber() {
    let shell_layer = fmt::layer()
        .with_timer(ChronoUtc::new("%k:%M:%S".to_owned()))
        .with_filter(pretty_filter());

    tracing_subscriber::registry().with(shell_layer).init()
}

/// Health checks and static assets are traced one level lower than API calls
fn is_quiet(path: &str) -> bool {
    path == "/health" || path.starts_with("/assets/")
}

pub fn trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl Fn(&Request<Body>) -> Span + Clone + Copy,
    (),
    impl Fn(&Response<Body>, std::time::Duration, &Span) + Clone + Copy,
    (),
    (),
> {
    TraceLayer::new_for_http()
        .on_eos(())
        .on_body_chunk(())
        .on_request(())
        .on_response(
            |resp: &Response<Body>, latency: std::time::Duration, span: &Span| {
                let millis = latency.as_secs_f64() * 1000.0;
                let status = resp.status();
                match span.metadata().map(|metadata| *metadata.level()) {
                    Some(Level::DEBUG) => tracing::debug!("'{status}' in {millis:.1}ms"),
                    Some(Level::TRACE) => tracing::trace!("'{status}' in {millis:.1}ms"),
                    _ => {}
                }
            },
        )
        .make_span_with(|request: &Request<Body>| {
            let method = request.method().as_str();
            let uri = request.uri().to_string();

            if is_quiet(request.uri().path()) {
                return tracing::trace_span!("->", method, uri);
            }

            match *request.method() {
                Method::GET => tracing::debug_span!("-> GET   ", uri),
                Method::POST => tracing::debug_span!("-> POST  ", uri),
                Method::PUT => tracing::debug_span!("-> PUT   ", uri),
                Method::PATCH => tracing::debug_span!("-> PATCH ", uri),
                Method::DELETE => tracing::debug_span!("-> DELETE", uri),
                _ => tracing::debug_span!("->", method, uri),
            }
        })
}
