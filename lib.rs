//! Single-table task tracker: a JSON API over SQLite plus a small browser client.
//!
//! The [`Store`] handle is passed to every handler as router state, see [`app`].

mod api;
mod config;
mod db;
mod host;
mod html;
mod result;
mod vals;

pub use api::*;
pub use config::*;
pub use db::*;
pub use host::*;
pub use html::*;
pub use result::*;
pub use vals::*;

pub use async_trait::async_trait;
pub use axum::{
    self,
    body::Body,
    extract::{Form, Request, State},
    http::{self, header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
pub use serde_json::json;
pub use tracing::{debug, error, info, trace, warn};
