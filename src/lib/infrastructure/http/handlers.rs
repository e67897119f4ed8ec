//! API handler modules

use std::any::Any;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
};
use tracing::error;

pub mod greeting;
pub mod send_email;

/// Catch panics, log them and return a generic 500 error
pub fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };

    error!("handler panicked: {details}");

    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}
