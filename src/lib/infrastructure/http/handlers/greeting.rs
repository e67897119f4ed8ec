//! Greeting handler

/// Confirms the server is up
#[utoipa::path(
    get,
    operation_id = "greeting",
    tag = "System",
    path = "/",
    responses(
        (status = 200, description = "Greeting", body = String, content_type = "text/plain"),
    )
)]
pub async fn handler() -> &'static str {
    "Hello world"
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use testresult::TestResult;

    use crate::{
        domain::communication::mailer::MockMailer,
        infrastructure::http::state::tests::test_router,
    };

    #[tokio::test]
    async fn test_greeting_handler() -> TestResult {
        let dir = tempfile::tempdir()?;

        let response = TestServer::new(test_router(MockMailer::new(), dir.path()))?
            .get("/")
            .await;

        response.assert_status_ok();
        response.assert_text("Hello world");

        Ok(())
    }
}
