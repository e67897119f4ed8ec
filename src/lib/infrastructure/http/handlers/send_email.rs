//! Send application email handler

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
};
use tracing::debug;
use utoipa::ToSchema;

use crate::{
    domain::{
        applications::{ApplicationForm, ApplicationService},
        uploads::FileStore,
    },
    infrastructure::http::{errors::ApiError, state::AppState},
};

/// Returned when the application was sent
pub const SENT_MESSAGE: &str = "Email sent successfully";

/// Multipart body accepted by `POST /send-email`
#[derive(Debug, ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct SendEmailForm {
    /// Name used to greet the recruiter
    #[schema(example = "Dana")]
    pub recruiter_name: String,

    /// Comma-separated recipient addresses, display names allowed
    #[schema(example = "Dana Scully <dana@example.com>")]
    pub email_to: String,

    /// Company applied to
    #[schema(example = "Initech")]
    pub company_name: String,

    /// Position applied for
    #[schema(example = "Backend Engineer")]
    pub profile: String,

    /// Comma-separated carbon copy addresses
    pub cc: Option<String>,

    /// Comma-separated blind carbon copy addresses
    pub bcc: Option<String>,

    /// The resume file
    #[schema(value_type = String, format = Binary)]
    pub resume: Vec<u8>,
}

/// Email a job application with the uploaded resume attached
#[utoipa::path(
    post,
    operation_id = "send_email",
    tag = "Applications",
    path = "/send-email",
    request_body(content = SendEmailForm, content_type = "multipart/form-data"),
    responses(
        (status = StatusCode::OK, description = "Email sent", body = String, content_type = "text/plain"),
        (status = StatusCode::BAD_REQUEST, description = "A field or the resume is missing", body = String, content_type = "text/plain"),
        (status = StatusCode::UNPROCESSABLE_ENTITY, description = "Malformed email address", body = String, content_type = "text/plain"),
        (status = StatusCode::INTERNAL_SERVER_ERROR, description = "The email could not be sent", body = String, content_type = "text/plain"),
    )
)]
pub async fn handler<A: ApplicationService, S: FileStore>(
    State(state): State<AppState<A, S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, &'static str), ApiError> {
    let mut multipart = multipart?;
    let mut form = ApplicationForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            ApplicationForm::RESUME if form.resume.is_some() => {
                debug!("ignoring additional resume file");
            }
            ApplicationForm::RESUME => {
                let Some(file_name) = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .map(str::to_owned)
                else {
                    debug!("ignoring resume field without a file");
                    continue;
                };

                let bytes = field.bytes().await?;

                form.resume = Some(state.uploads.store(&file_name, bytes).await?);
            }
            ApplicationForm::RECRUITER_NAME => form.recruiter_name = Some(field.text().await?),
            ApplicationForm::EMAIL_TO => form.email_to = Some(field.text().await?),
            ApplicationForm::COMPANY_NAME => form.company_name = Some(field.text().await?),
            ApplicationForm::PROFILE => form.profile = Some(field.text().await?),
            ApplicationForm::CC => form.cc = Some(field.text().await?),
            ApplicationForm::BCC => form.bcc = Some(field.text().await?),
            other => debug!(field = other, "ignoring unexpected form field"),
        }
    }

    state.applications.send_application(form).await?;

    Ok((StatusCode::OK, SENT_MESSAGE))
}
