//! JSON endpoints over the task table. Every response is an envelope
//! `{ success, message?, ...payload }`, failures included.

use crate::*;

mod tasks;
pub use tasks::*;

use serde::Serialize;

/// Routes of the JSON API, wrong verbs answer 405 with an envelope
pub fn api_routes() -> Router<Store> {
    Router::new()
        .route("/api/add", post(add_task).fallback(method_not_allowed))
        .route("/api/get", get(get_tasks).fallback(method_not_allowed))
        .route("/api/update", post(update_task).fallback(method_not_allowed))
        .route("/api/delete", post(delete_task).fallback(method_not_allowed))
        .route("/health", get(health).fallback(method_not_allowed))
}

async fn method_not_allowed() -> Error {
    Error::MethodNotAllowed
}

pub(crate) async fn no_route() -> Error {
    Error::NoRoute
}

async fn health(State(store): State<Store>) -> Result<Success<Message>> {
    store.ping().await.map_err(Error::Unavailable)?;
    ok(Success::message("ok"))
}

/// Successful envelope, `payload` fields are flattened next to `success`
#[derive(Debug, Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    payload: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(payload: T) -> Self {
        Self {
            success: true,
            payload,
        }
    }
}

impl Success<Message> {
    pub fn message(message: &'static str) -> Self {
        Self::new(Message { message })
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}
