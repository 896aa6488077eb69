use crate::*;

use std::{env, str::FromStr};

pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db?mode=rwc";
pub const DEFAULT_REQUEST_BODY_LIMIT: usize = 1_000_000;

/// Holds basic information about the app and its runtime settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: &'static str,
    pub version: &'static str,
    pub port: u16,
    pub database_url: String,
    pub request_body_limit: usize,
}

impl AppConfig {
    /// Reads `PORT`, `DATABASE_URL` and `REQUEST_BODY_LIMIT`, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            port: env_or("PORT", DEFAULT_PORT),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
            request_body_limit: env_or("REQUEST_BODY_LIMIT", DEFAULT_REQUEST_BODY_LIMIT),
            ..Default::default()
        }
    }

    pub fn localhost(&self) -> String {
        format!(
            "http://localhost{}",
            if self.port == 80 {
                "".to_owned()
            } else {
                format!(":{}", self.port)
            }
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            request_body_limit: DEFAULT_REQUEST_BODY_LIMIT,
        }
    }
}

/// Loads `.env` into the process environment, returns the reason when it wasn't used
pub fn check_dot_env() -> Option<String> {
    dotenvy::dotenv().err().map(|e| e.to_string())
}

fn env_or<T: FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(v) => v.trim().parse::<T>().unwrap_or_else(|_| {
            warn!("{key}={v:?} is not valid, using {default}");
            default
        }),
        Err(_) => default,
    }
}
