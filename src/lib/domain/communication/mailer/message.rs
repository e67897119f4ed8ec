//! Email message

use std::path::PathBuf;

use crate::domain::communication::email_addresses::EmailAddress;

/// Email message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// The sender of the email, defaults to the transport's account
    pub from: Option<EmailAddress>,

    /// The recipients of the email
    pub to: Vec<EmailAddress>,

    /// Carbon copy recipients
    pub cc: Vec<EmailAddress>,

    /// Blind carbon copy recipients
    pub bcc: Vec<EmailAddress>,

    /// The subject of the email
    pub subject: String,

    /// The plain text body of the email
    pub body: String,

    /// Files attached to the email
    pub attachments: Vec<Attachment>,
}

/// A file attached to a [`Message`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    /// The file name shown to the recipient
    pub filename: String,

    /// Where the bytes live on disk
    pub path: PathBuf,
}

impl Attachment {
    /// Best-effort MIME type derived from the file name's extension.
    pub fn content_type(&self) -> &'static str {
        let extension = self
            .filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => "application/pdf",
            Some("doc") => "application/msword",
            Some("docx") => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Some("odt") => "application/vnd.oasis.opendocument.text",
            Some("rtf") => "application/rtf",
            Some("txt") => "text/plain",
            _ => "application/octet-stream",
        }
    }
}

/// Receipt returned by the provider for an accepted message
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Delivery {
    /// The provider's response, e.g. `250 2.0.0 OK`
    pub provider_response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(filename: &str) -> Attachment {
        Attachment {
            filename: filename.to_string(),
            path: PathBuf::from("uploads").join(filename),
        }
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(attachment("cv.PDF").content_type(), "application/pdf");
        assert_eq!(attachment("notes.txt").content_type(), "text/plain");
        assert_eq!(
            attachment("resume").content_type(),
            "application/octet-stream"
        );
    }
}
