//! Upstash Redis REST client
//!
//! Each command is a JSON array POSTed to the database URL with a bearer
//! token. Replies are `{"result": ...}` or `{"error": "..."}`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::store::{count_key, meta_key, signups_key, SignupMetadata, SignupStore, StoreError};
use crate::config::StoreConfig;

#[derive(Debug, Deserialize)]
struct Reply<T> {
    result: Option<T>,
    error: Option<String>,
}

/// Signup store backed by an Upstash Redis database
#[derive(Debug, Clone)]
pub struct UpstashStore {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl UpstashStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Run one command and decode its result
    async fn command<T: DeserializeOwned>(&self, args: &[&str]) -> Result<T, StoreError> {
        let name = args.first().copied().unwrap_or_default();
        tracing::debug!("Store command {}", name);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await?;
        let status = response.status();

        let reply: Reply<T> = match response.json().await {
            Ok(reply) => reply,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                return Err(StoreError::Protocol(format!(
                    "{} failed with HTTP {}",
                    name, status
                )))
            }
        };

        if let Some(error) = reply.error {
            return Err(StoreError::Command(error));
        }
        if !status.is_success() {
            return Err(StoreError::Protocol(format!(
                "{} failed with HTTP {}",
                name, status
            )));
        }

        reply
            .result
            .ok_or_else(|| StoreError::Protocol(format!("{} returned no result", name)))
    }
}

#[async_trait]
impl SignupStore for UpstashStore {
    async fn list_emails(&self, site: &str) -> Result<Vec<String>, StoreError> {
        let key = signups_key(site);
        self.command(&["LRANGE", key.as_str(), "0", "-1"]).await
    }

    async fn append_email(&self, site: &str, email: &str) -> Result<(), StoreError> {
        let key = signups_key(site);
        self.command::<i64>(&["RPUSH", key.as_str(), email]).await?;
        Ok(())
    }

    async fn increment_count(&self, site: &str) -> Result<i64, StoreError> {
        let key = count_key(site);
        self.command(&["INCR", key.as_str()]).await
    }

    async fn write_metadata(&self, email: &str, meta: &SignupMetadata) -> Result<(), StoreError> {
        let key = meta_key(email);
        let fields = meta.fields();

        let mut args: Vec<&str> = vec!["HSET", key.as_str()];
        for (field, value) in &fields {
            args.push(*field);
            args.push(value.as_str());
        }

        self.command::<i64>(&args).await?;
        Ok(())
    }
}
