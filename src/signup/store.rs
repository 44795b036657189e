//! Signup store abstraction and key layout

use async_trait::async_trait;

/// Key of the list holding every registered email for a site
pub fn signups_key(site: &str) -> String {
    format!("email_signups:{}", site)
}

/// Key of the per-site signup counter
pub fn count_key(site: &str) -> String {
    format!("email_signups_count:{}", site)
}

/// Key of the metadata hash for one email
pub fn meta_key(email: &str) -> String {
    format!("email_signup_meta:{}", email)
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store rejected command: {0}")]
    Command(String),

    #[error("unexpected store reply: {0}")]
    Protocol(String),
}

/// Metadata recorded alongside a signup
#[derive(Debug, Clone, PartialEq)]
pub struct SignupMetadata {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub site: String,
    /// Client address as reported by the proxy or the socket
    pub ip: String,
}

impl SignupMetadata {
    /// Hash fields in write order
    pub fn fields(&self) -> [(&'static str, String); 3] {
        [
            ("timestamp", self.timestamp.to_string()),
            ("site", self.site.clone()),
            ("ip", self.ip.clone()),
        ]
    }
}

/// The hosted key-value operations a signup needs.
///
/// None of these are combined atomically; callers sequence them.
#[async_trait]
pub trait SignupStore: Send + Sync {
    /// Every email in the site's signup list, in insertion order
    async fn list_emails(&self, site: &str) -> Result<Vec<String>, StoreError>;

    /// Append an email to the site's signup list
    async fn append_email(&self, site: &str, email: &str) -> Result<(), StoreError>;

    /// Increment the site's counter, returning the new value
    async fn increment_count(&self, site: &str) -> Result<i64, StoreError>;

    /// Write the metadata hash for an email, overwriting existing fields
    async fn write_metadata(&self, email: &str, meta: &SignupMetadata) -> Result<(), StoreError>;
}
