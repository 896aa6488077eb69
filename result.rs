use crate::*;

use axum::extract::rejection::{FormRejection, QueryRejection};
use std::fmt;
use thiserror::Error;

/// Basic Result alias with [`enum@Error`]
pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Utility for type inference that allows using `?` operator in closure handlers
pub const fn ok<T: IntoResponse>(resp: T) -> Result<T, Error> {
    Ok(resp)
}

/// Store operation that failed, shown to the caller as "Failed to ..."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Fetch,
    Update,
    Delete,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Op::Add => "add task",
            Op::Fetch => "fetch tasks",
            Op::Update => "update task",
            Op::Delete => "delete task",
        })
    }
}

/// Error type used across the crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Invalid task ID")]
    InvalidId,
    #[error("Task cannot be empty")]
    EmptyTask,
    #[error("Task is too long (max {} characters)", MAX_TASK_CHARS)]
    TaskTooLong,
    #[error("No update data provided")]
    NoUpdateData,
    #[error("Task not found")]
    NotFound,
    #[error("Not found")]
    NoRoute,
    #[error("Invalid request")]
    FormRejection(#[from] FormRejection),
    #[error("Invalid request")]
    QueryRejection(#[from] QueryRejection),
    #[error("Failed to {op}")]
    Store {
        op: Op,
        #[source]
        source: sqlx::Error,
    },
    #[error("Store unavailable")]
    Unavailable(#[source] sqlx::Error),
    #[error(transparent)]
    IO(#[from] std::io::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::InvalidId | Error::EmptyTask | Error::TaskTooLong | Error::NoUpdateData => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound | Error::NoRoute => StatusCode::NOT_FOUND,
            Error::FormRejection(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => e.status(),
            Error::FormRejection(_) | Error::QueryRejection(_) => StatusCode::BAD_REQUEST,
            Error::Store { .. } | Error::Unavailable(_) | Error::IO(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Error::Store { source, .. } | Error::Unavailable(source) => {
                error!(error = %source, "{self}");
                self.to_string()
            }
            Error::IO(_) => {
                error!("{self}");
                "Internal error".to_owned()
            }
            Error::FormRejection(e) => {
                debug!("rejected form: {e}");
                self.to_string()
            }
            Error::QueryRejection(e) => {
                debug!("rejected query: {e}");
                self.to_string()
            }
            _ => self.to_string(),
        };
        failure(status, message)
    }
}

/// Builds the `{ success: false, message }` body every failed call returns
pub fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    let body = json!({ "success": false, "message": message.into() });
    (status, Json(body)).into_response()
}

/// Provides shorthand to tag store errors with the failed operation using `.failed_to(op)`
pub trait StoreContext<T> {
    fn failed_to(self, op: Op) -> Result<T>;
}

impl<T> StoreContext<T> for std::result::Result<T, sqlx::Error> {
    fn failed_to(self, op: Op) -> Result<T> {
        self.map_err(|source| Error::Store { op, source })
    }
}
