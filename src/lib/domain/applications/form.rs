//! Application form and the validated request built from it

use crate::domain::{
    communication::email_addresses::{EmailAddress, EmailAddressError},
    uploads::FileRef,
};

use super::ValidationError;

/// The raw application form, as submitted
///
/// Every field is optional here; [`ApplicationForm::validate`] is the only way to obtain an
/// [`ApplicationRequest`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplicationForm {
    /// Name used to greet the recruiter
    pub recruiter_name: Option<String>,

    /// Comma-separated recipient addresses
    pub email_to: Option<String>,

    /// Company applied to
    pub company_name: Option<String>,

    /// Position or profile applied for
    pub profile: Option<String>,

    /// Comma-separated carbon copy addresses
    pub cc: Option<String>,

    /// Comma-separated blind carbon copy addresses
    pub bcc: Option<String>,

    /// The stored resume
    pub resume: Option<FileRef>,
}

/// A complete application, ready to be mailed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationRequest {
    /// Name used to greet the recruiter
    pub recruiter_name: String,

    /// Recipients, never empty
    pub email_to: Vec<EmailAddress>,

    /// Company applied to
    pub company_name: String,

    /// Position or profile applied for
    pub profile: String,

    /// The stored resume
    pub resume: FileRef,

    /// Carbon copy recipients
    pub cc: Vec<EmailAddress>,

    /// Blind carbon copy recipients
    pub bcc: Vec<EmailAddress>,
}

impl ApplicationForm {
    /// Multipart field holding the recruiter's name
    pub const RECRUITER_NAME: &'static str = "recruiterName";
    /// Multipart field holding the recipient address
    pub const EMAIL_TO: &'static str = "emailTo";
    /// Multipart field holding the company name
    pub const COMPANY_NAME: &'static str = "companyName";
    /// Multipart field holding the profile
    pub const PROFILE: &'static str = "profile";
    /// Multipart field holding carbon copy addresses
    pub const CC: &'static str = "cc";
    /// Multipart field holding blind carbon copy addresses
    pub const BCC: &'static str = "bcc";
    /// Multipart file field holding the resume
    pub const RESUME: &'static str = "resume";

    /// Checks that every required field is present and every address is well formed.
    ///
    /// Blank (whitespace only) values count as missing. All missing fields are reported
    /// together, in form order.
    pub fn validate(self) -> Result<ApplicationRequest, ValidationError> {
        let recruiter_name = present(self.recruiter_name);
        let email_to = present(self.email_to);
        let company_name = present(self.company_name);
        let profile = present(self.profile);

        let (recruiter_name, email_to, company_name, profile, resume) =
            match (recruiter_name, email_to, company_name, profile, self.resume) {
                (Some(r), Some(e), Some(c), Some(p), Some(f)) => (r, e, c, p, f),
                (r, e, c, p, f) => {
                    return Err(ValidationError::MissingFields(missing_fields(
                        &r, &e, &c, &p, &f,
                    )))
                }
            };

        Ok(ApplicationRequest {
            recruiter_name,
            email_to: recipients(&email_to)?,
            company_name,
            profile,
            resume,
            cc: address_list(Self::CC, self.cc.as_deref())?,
            bcc: address_list(Self::BCC, self.bcc.as_deref())?,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn missing_fields(
    recruiter_name: &Option<String>,
    email_to: &Option<String>,
    company_name: &Option<String>,
    profile: &Option<String>,
    resume: &Option<FileRef>,
) -> Vec<&'static str> {
    [
        (ApplicationForm::RECRUITER_NAME, recruiter_name.is_none()),
        (ApplicationForm::EMAIL_TO, email_to.is_none()),
        (ApplicationForm::COMPANY_NAME, company_name.is_none()),
        (ApplicationForm::PROFILE, profile.is_none()),
        (ApplicationForm::RESUME, resume.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, missing)| missing.then_some(name))
    .collect()
}

fn recipients(raw: &str) -> Result<Vec<EmailAddress>, ValidationError> {
    let field = ApplicationForm::EMAIL_TO;

    match EmailAddress::parse_list(raw) {
        Ok(list) if list.is_empty() => Err(ValidationError::InvalidEmailAddress {
            field,
            source: EmailAddressError::EmptyEmailAddress,
        }),
        result => result.map_err(|source| ValidationError::InvalidEmailAddress { field, source }),
    }
}

fn address_list(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Vec<EmailAddress>, ValidationError> {
    raw.map(EmailAddress::parse_list)
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(|source| ValidationError::InvalidEmailAddress { field, source })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::PathBuf;

    use testresult::TestResult;

    use super::*;

    pub(crate) fn complete_form() -> ApplicationForm {
        ApplicationForm {
            recruiter_name: Some("Dana".to_string()),
            email_to: Some("dana@example.com".to_string()),
            company_name: Some("Initech".to_string()),
            profile: Some("Backend Engineer".to_string()),
            cc: None,
            bcc: None,
            resume: Some(FileRef {
                stored_path: PathBuf::from("uploads/1700000000000-abc-cv.pdf"),
                original_name: "cv.pdf".to_string(),
            }),
        }
    }

    #[test]
    fn test_validate_complete_form() -> TestResult {
        let request = complete_form().validate()?;

        assert_eq!(request.recruiter_name, "Dana");
        assert_eq!(request.email_to, vec![EmailAddress::new("dana@example.com")?]);
        assert_eq!(request.company_name, "Initech");
        assert_eq!(request.profile, "Backend Engineer");
        assert_eq!(request.resume.original_name, "cv.pdf");
        assert!(request.cc.is_empty());
        assert!(request.bcc.is_empty());

        Ok(())
    }

    #[test]
    fn test_each_missing_field_is_reported() {
        let cases: [(&'static str, fn(&mut ApplicationForm)); 5] = [
            (ApplicationForm::RECRUITER_NAME, |f| f.recruiter_name = None),
            (ApplicationForm::EMAIL_TO, |f| f.email_to = None),
            (ApplicationForm::COMPANY_NAME, |f| f.company_name = None),
            (ApplicationForm::PROFILE, |f| f.profile = None),
            (ApplicationForm::RESUME, |f| f.resume = None),
        ];

        for (field, clear) in cases {
            let mut form = complete_form();
            clear(&mut form);

            assert_eq!(
                form.validate(),
                Err(ValidationError::MissingFields(vec![field])),
                "{field} should be reported missing"
            );
        }
    }

    #[test]
    fn test_blank_fields_count_as_missing() {
        let form = ApplicationForm {
            recruiter_name: Some("   ".to_string()),
            profile: Some(String::new()),
            ..complete_form()
        };

        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingFields(vec![
                ApplicationForm::RECRUITER_NAME,
                ApplicationForm::PROFILE
            ]))
        );
    }

    #[test]
    fn test_empty_form_reports_everything() {
        let result = ApplicationForm::default().validate();

        assert!(matches!(result, Err(ValidationError::MissingFields(fields)) if fields.len() == 5));
    }

    #[test]
    fn test_invalid_recipient() {
        let form = ApplicationForm {
            email_to: Some("not an email".to_string()),
            ..complete_form()
        };

        assert_eq!(
            form.validate(),
            Err(ValidationError::InvalidEmailAddress {
                field: ApplicationForm::EMAIL_TO,
                source: EmailAddressError::InvalidEmailAddress("not an email".to_string()),
            })
        );
    }

    #[test]
    fn test_recipient_with_display_name() -> TestResult {
        let form = ApplicationForm {
            email_to: Some("Dana Scully <dana@example.com>".to_string()),
            ..complete_form()
        };

        let request = form.validate()?;

        assert_eq!(request.email_to.len(), 1);
        assert_eq!(request.email_to[0].address(), "dana@example.com");

        Ok(())
    }

    #[test]
    fn test_several_recipients() -> TestResult {
        let form = ApplicationForm {
            email_to: Some("dana@example.com, hr@example.com".to_string()),
            ..complete_form()
        };

        let request = form.validate()?;

        assert_eq!(
            request
                .email_to
                .iter()
                .map(EmailAddress::address)
                .collect::<Vec<_>>(),
            vec!["dana@example.com", "hr@example.com"]
        );

        Ok(())
    }

    #[test]
    fn test_recipient_list_without_addresses() {
        let form = ApplicationForm {
            email_to: Some(" , ".to_string()),
            ..complete_form()
        };

        assert_eq!(
            form.validate(),
            Err(ValidationError::InvalidEmailAddress {
                field: ApplicationForm::EMAIL_TO,
                source: EmailAddressError::EmptyEmailAddress,
            })
        );
    }

    #[test]
    fn test_cc_and_bcc_are_parsed() -> TestResult {
        let form = ApplicationForm {
            cc: Some("hr@example.com, lead@example.com".to_string()),
            bcc: Some("me@example.com".to_string()),
            ..complete_form()
        };

        let request = form.validate()?;

        assert_eq!(request.cc.len(), 2);
        assert_eq!(request.bcc, vec![EmailAddress::new("me@example.com")?]);

        Ok(())
    }

    #[test]
    fn test_invalid_bcc() {
        let form = ApplicationForm {
            bcc: Some("me@".to_string()),
            ..complete_form()
        };

        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidEmailAddress { field: "bcc", .. })
        ));
    }
}
