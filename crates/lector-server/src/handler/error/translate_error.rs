//! Translation client error to HTTP error conversion implementation.
//!
//! Failures of the upstream translation service surface as gateway errors;
//! raw upstream payloads stay in the logs and never reach the client.

use super::http_error::{Error as HttpError, ErrorKind};

impl<'a> From<lector_translate::Error> for HttpError<'a> {
    fn from(translate_error: lector_translate::Error) -> Self {
        match translate_error {
            // Upstream reported a failure -> Bad Gateway with the status only
            lector_translate::Error::Api { status, .. } => ErrorKind::BadGateway
                .with_message("The translation service rejected the request")
                .with_context(format!("translation service returned status {}", status)),

            // Transport-level failures -> Bad Gateway
            lector_translate::Error::Http(ref err) if err.is_timeout() => ErrorKind::BadGateway
                .with_message("The translation service took too long to respond"),

            lector_translate::Error::Http(_) => {
                ErrorKind::BadGateway.with_message("The translation service is unreachable")
            }

            // Local misconfiguration -> Internal Server Error
            lector_translate::Error::UrlParse(_)
            | lector_translate::Error::InvalidConfig { .. } => {
                ErrorKind::InternalServerError.into_error()
            }
        }
    }
}
