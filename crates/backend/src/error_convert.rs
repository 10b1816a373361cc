use serde::Deserialize;
use shared_types::AppError;

/// Convert a transport-level reqwest error into an AppError.
pub fn reqwest_to_app_error(err: reqwest::Error) -> AppError {
    if err.is_decode() {
        return AppError::decode(format!("Unexpected response from server: {err}"));
    }
    if let Some(status) = err.status() {
        return AppError::new(AppError::kind_for_status(status.as_u16()), err.to_string());
    }
    AppError::network(format!("Could not reach the server: {err}"))
}

/// Extension trait providing `.into_app_error()` on reqwest::Error.
pub trait ReqwestErrorExt {
    fn into_app_error(self) -> AppError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_app_error(self) -> AppError {
        reqwest_to_app_error(self)
    }
}

/// Error body shapes returned by the auth and table services.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        [self.msg, self.message, self.error_description, self.error]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}

/// Build an AppError from a non-success status and its raw body.
///
/// The service's own message is kept verbatim so it can be shown to users.
pub fn error_from_body(status: u16, body: &str) -> AppError {
    let kind = AppError::kind_for_status(status);
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("Request failed with status {status}")
            } else {
                trimmed.to_string()
            }
        });
    AppError::new(kind, message)
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
