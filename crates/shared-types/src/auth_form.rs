//! State machine behind the sign-in / sign-up form and the notices it raises.

use crate::models::Role;
use crate::requests::{SignInRequest, SignUpMetadata, SignUpRequest};
use serde::{Deserialize, Serialize};

/// Minimum password length hinted by the form. Not enforced client-side.
pub const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

/// Field values and mode of the authentication form.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthFormState {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
    pub submitting: bool,
}

impl Default for AuthFormState {
    fn default() -> Self {
        Self {
            mode: AuthMode::SignIn,
            email: String::new(),
            password: String::new(),
            name: String::new(),
            role: Role::Student,
            submitting: false,
        }
    }
}

impl AuthFormState {
    /// Switch between sign-in and sign-up. Entered credentials are kept.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
    }

    /// Name and role inputs only exist in sign-up mode.
    pub fn shows_profile_fields(&self) -> bool {
        self.mode == AuthMode::SignUp
    }

    pub fn subtitle(&self) -> &'static str {
        match self.mode {
            AuthMode::SignIn => "Sign in to your account",
            AuthMode::SignUp => "Create your account",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            AuthMode::SignIn => "Sign In",
            AuthMode::SignUp => "Create Account",
        }
    }

    pub fn toggle_prompt(&self) -> &'static str {
        match self.mode {
            AuthMode::SignIn => "Don't have an account? Sign up",
            AuthMode::SignUp => "Already have an account? Sign in",
        }
    }

    /// Mark the form busy. Returns `false` if a submit is already in flight.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        true
    }

    /// Settle a submit. A successful sign-up moves the form to sign-in.
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded && self.mode == AuthMode::SignUp {
            self.mode = AuthMode::SignIn;
        }
    }

    pub fn sign_in_request(&self) -> SignInRequest {
        SignInRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }

    pub fn sign_up_request(&self, origin: &str) -> SignUpRequest {
        SignUpRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            email_redirect_to: email_redirect_for(origin),
            metadata: SignUpMetadata {
                name: self.name.clone(),
                role: self.role,
            },
        }
    }
}

/// Confirmation redirect target for an app served at `origin`.
pub fn email_redirect_for(origin: &str) -> String {
    format!("{}/", origin.trim_end_matches('/'))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum NoticeVariant {
    #[default]
    Default,
    Destructive,
}

/// Transient toast message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn signed_up() -> Self {
        Self::info(
            "Account created successfully!",
            "You can now sign in to your account.",
        )
    }

    pub fn signed_in() -> Self {
        Self::info("Welcome back!", "You have been signed in successfully.")
    }

    pub fn signed_out() -> Self {
        Self::info(
            "Signed out successfully",
            "You have been logged out of your account.",
        )
    }

    /// Failure notice carrying the provider's message verbatim.
    pub fn auth_failed(message: impl Into<String>) -> Self {
        Self::destructive("Authentication failed", message)
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}
