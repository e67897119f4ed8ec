//! Application letter

use askama::Template;

use crate::domain::communication::mailer::{Attachment, Message};

use super::ApplicationRequest;

/// The cover letter sent with every application
#[derive(Debug, Template)]
#[template(
    ext = "txt",
    source = "Hey {{ recruiter_name }},

I came across your job posting for the {{ profile }} position at {{ company_name }} and wanted to express my interest.

With 2 years of experience in building dynamic web applications, I believe my skills could be a great fit for this position.

Please find my resume attached for your review. I look forward to hearing from you.

Thanks and Regards"
)]
pub struct ApplicationLetterTemplate<'a> {
    /// Who the letter greets
    pub recruiter_name: &'a str,

    /// Position applied for
    pub profile: &'a str,

    /// Company applied to
    pub company_name: &'a str,
}

impl<'a> ApplicationLetterTemplate<'a> {
    /// Creates the letter for `request`
    pub fn new(request: &'a ApplicationRequest) -> Self {
        Self {
            recruiter_name: &request.recruiter_name,
            profile: &request.profile,
            company_name: &request.company_name,
        }
    }

    /// The subject line for the letter
    pub fn subject(&self) -> String {
        format!(
            "Application for {profile} at {company_name}",
            profile = self.profile,
            company_name = self.company_name
        )
    }
}

/// Builds the outgoing [`Message`] for a validated application.
///
/// The sender is left to the transport.
pub fn compose_message(request: &ApplicationRequest) -> Result<Message, askama::Error> {
    let letter = ApplicationLetterTemplate::new(request);

    Ok(Message {
        from: None,
        to: request.email_to.clone(),
        cc: request.cc.clone(),
        bcc: request.bcc.clone(),
        subject: letter.subject(),
        body: letter.render()?,
        attachments: vec![Attachment {
            filename: request.resume.original_name.clone(),
            path: request.resume.stored_path.clone(),
        }],
    })
}
