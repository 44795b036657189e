//! Waitlist signup: validation, duplicate check and the three store writes

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;

use super::store::{SignupMetadata, SignupStore, StoreError};

lazy_static! {
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern");
}

pub const INVALID_EMAIL_MESSAGE: &str = "Please provide a valid email address";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already registered";
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("{}", INVALID_EMAIL_MESSAGE)]
    Validation,

    #[error("{}", DUPLICATE_EMAIL_MESSAGE)]
    Duplicate,

    #[error("signup store failure: {0}")]
    Internal(#[from] StoreError),
}

impl SignupError {
    pub fn status(&self) -> StatusCode {
        match self {
            SignupError::Validation | SignupError::Duplicate => StatusCode::BAD_REQUEST,
            SignupError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the visitor; store failures stay generic
    pub fn user_message(&self) -> &'static str {
        match self {
            SignupError::Validation => INVALID_EMAIL_MESSAGE,
            SignupError::Duplicate => DUPLICATE_EMAIL_MESSAGE,
            SignupError::Internal(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        if let SignupError::Internal(ref e) = self {
            tracing::error!("Signup error: {}", e);
        }

        let body = Json(ErrorResponse {
            error: self.user_message().to_string(),
        });

        (self.status(), body).into_response()
    }
}

/// Minimal email shape check: `local@domain.tld`, ASCII, no whitespace
pub fn validate_email(email: &str) -> Result<(), SignupError> {
    if email.is_empty() || !email.is_ascii() || !EMAIL_PATTERN.is_match(email) {
        return Err(SignupError::Validation);
    }
    Ok(())
}

/// Registers emails on the waitlist of one site
#[derive(Clone)]
pub struct SignupService {
    store: Arc<dyn SignupStore>,
    site_id: String,
}

impl SignupService {
    pub fn new(store: Arc<dyn SignupStore>, site_id: impl Into<String>) -> Self {
        Self {
            store,
            site_id: site_id.into(),
        }
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    /// Add an email to the waitlist.
    ///
    /// The duplicate check and the writes are separate store calls, so two
    /// concurrent submissions of the same address can both get through, and a
    /// failure after the append leaves the email without metadata.
    pub async fn sign_up(&self, email: &str, origin: &str) -> Result<(), SignupError> {
        validate_email(email)?;

        let existing = self.store.list_emails(&self.site_id).await?;
        if existing.iter().any(|e| e == email) {
            tracing::debug!("Duplicate signup for site {}", self.site_id);
            return Err(SignupError::Duplicate);
        }

        self.store.append_email(&self.site_id, email).await?;
        let count = self.store.increment_count(&self.site_id).await?;

        let meta = SignupMetadata {
            timestamp: Utc::now().timestamp_millis(),
            site: self.site_id.clone(),
            ip: origin.to_string(),
        };
        self.store.write_metadata(email, &meta).await?;

        tracing::info!("New signup for site {} (total {})", self.site_id, count);
        Ok(())
    }
}
