//! Application dispatch service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

#[cfg(test)]
use mockall::mock;

use crate::domain::communication::mailer::{Delivery, Mailer};

use super::{compose_message, ApplicationError, ApplicationForm};

/// Sends job applications
#[async_trait]
pub trait ApplicationService: Clone + Send + Sync + 'static {
    /// Validates `form` and emails the application with the resume attached.
    ///
    /// A single delivery attempt is made.
    ///
    /// # Returns
    /// - [`Ok`] with the provider's [`Delivery`] receipt.
    /// - [`Err`] with [`ApplicationError::Validation`] if the form is incomplete, in which case
    ///   nothing is sent, or [`ApplicationError::Transport`] if delivery failed.
    async fn send_application(&self, form: ApplicationForm)
        -> Result<Delivery, ApplicationError>;
}

#[cfg(test)]
mock! {
    pub ApplicationService {}

    impl Clone for ApplicationService {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl ApplicationService for ApplicationService {
        async fn send_application(&self, form: ApplicationForm) -> Result<Delivery, ApplicationError>;
    }
}

/// Application service implementation
#[derive(Debug, Clone)]
pub struct ApplicationServiceImpl<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
}

impl<M> ApplicationServiceImpl<M>
where
    M: Mailer,
{
    /// Creates a new application service.
    pub fn new(mailer: Arc<M>) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl<M> ApplicationService for ApplicationServiceImpl<M>
where
    M: Mailer,
{
    async fn send_application(
        &self,
        form: ApplicationForm,
    ) -> Result<Delivery, ApplicationError> {
        let request = form.validate().inspect_err(|err| debug!("rejected application: {err}"))?;

        let message = compose_message(&request).map_err(|err| {
            ApplicationError::Transport(anyhow::Error::from(err).into())
        })?;

        let to = request
            .email_to
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        match self.mailer.send(&message).await {
            Ok(delivery) => {
                info!(
                    to = %to,
                    company = %request.company_name,
                    response = %delivery.provider_response,
                    "application sent"
                );

                Ok(delivery)
            }
            Err(err) => {
                error!(
                    to = %to,
                    company = %request.company_name,
                    "failed to send application: {err:#}"
                );

                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::{
        applications::{form::tests::complete_form, ValidationError},
        communication::mailer::{MailerError, MockMailer},
    };

    use super::*;

    #[tokio::test]
    async fn test_send_application_success() -> TestResult {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send()
            .times(1)
            .withf(|message| {
                message.to.len() == 1
                    && message.to[0].address() == "dana@example.com"
                    && message.subject == "Application for Backend Engineer at Initech"
                    && message.attachments.len() == 1
                    && message.attachments[0].filename == "cv.pdf"
            })
            .returning(|_| {
                Ok(Delivery {
                    provider_response: "250 OK".to_string(),
                })
            });

        let service = ApplicationServiceImpl::new(Arc::new(mailer));

        let delivery = service.send_application(complete_form()).await?;

        assert_eq!(delivery.provider_response, "250 OK");

        Ok(())
    }

    #[tokio::test]
    async fn test_incomplete_form_never_reaches_the_mailer() {
        let mut mailer = MockMailer::new();

        mailer.expect_send().times(0);

        let service = ApplicationServiceImpl::new(Arc::new(mailer));

        let form = ApplicationForm {
            resume: None,
            ..complete_form()
        };

        let result = service.send_application(form).await;

        assert!(matches!(
            result,
            Err(ApplicationError::Validation(ValidationError::MissingFields(fields)))
                if fields == vec!["resume"]
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let mut mailer = MockMailer::new();

        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(MailerError::Authorization("invalid_grant".to_string())));

        let service = ApplicationServiceImpl::new(Arc::new(mailer));

        let result = service.send_application(complete_form()).await;

        assert!(matches!(
            result,
            Err(ApplicationError::Transport(MailerError::Authorization(_)))
        ));
    }
}
