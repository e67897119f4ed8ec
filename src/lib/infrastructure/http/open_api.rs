//! OpenAPI module

use utoipa::OpenApi;

use crate::infrastructure::http::handlers::{greeting, send_email};

/// The OpenAPI document served at `/openapi.json`
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Resume Mailer"),
    paths(greeting::handler, send_email::handler),
    components(schemas(send_email::SendEmailForm))
)]
pub struct ApiDocs;
