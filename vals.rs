use crate::*;

use axum::extract::{FromRequest, FromRequestParts, Query, Request};

/// Utility that deserializes from either [`Query`] or [`Form`] based on request method
pub struct Vals<T>(pub T);
#[async_trait]
impl<T, S> FromRequest<S> for Vals<T>
where
    T: serde::de::DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        if req.method() == Method::GET {
            let (mut parts, _) = req.into_parts();
            match Query::<T>::from_request_parts(&mut parts, state).await {
                Ok(Query(params)) => Ok(Vals(params)),
                Err(e) => Err(e.into()),
            }
        } else {
            match Form::<T>::from_request(req, state).await {
                Ok(Form(params)) => Ok(Vals(params)),
                Err(e) => Err(e.into()),
            }
        }
    }
}

impl<T> std::ops::Deref for Vals<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> std::ops::DerefMut for Vals<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Reads a form value as an integer the way browsers' loose forms expect:
/// leading whitespace, an optional sign and the leading digits. Anything else reads as 0.
pub fn lenient_int(raw: &str) -> i64 {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Reads a checkbox-like form value
pub fn lenient_flag(raw: &str) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" => true,
        other => lenient_int(other) != 0,
    }
}
