use crate::models::Role;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// Credentials for a password sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Profile metadata attached to a new account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignUpMetadata {
    pub name: String,
    pub role: Role,
}

/// Account creation request, forwarded to the auth provider as entered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    /// Where the confirmation email sends the user back to.
    pub email_redirect_to: String,
    pub metadata: SignUpMetadata,
}

/// Form payload for creating an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewEvent {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Title is required"))
    )]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Date is required"))
    )]
    pub event_date: String,
    #[serde(default)]
    pub location: Option<String>,
}

impl NewEvent {
    /// Trim every field and drop optional ones left blank.
    pub fn normalized(self) -> Self {
        fn optional(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        Self {
            title: self.title.trim().to_string(),
            description: optional(self.description),
            event_date: self.event_date.trim().to_string(),
            location: optional(self.location),
        }
    }
}
