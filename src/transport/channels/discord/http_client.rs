use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Method, Response};
use serde_json::json;

use super::types::{API_BASE, RegisteredCommand};
use crate::error::DiscordError;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Minimal Discord REST client for application command management.
///
/// Every request is a single attempt; a 429 surfaces as an error like any
/// other non-success status.
pub struct DiscordHttpClient {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
}

impl fmt::Debug for DiscordHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscordHttpClient")
            .field("api_base", &self.api_base)
            .field("bot_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl DiscordHttpClient {
    #[must_use]
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self::with_api_base(API_BASE, bot_token)
    }

    #[must_use]
    pub fn with_api_base(api_base: &str, bot_token: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            bot_token: bot_token.into(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn commands_url(&self, application_id: &str) -> String {
        format!("{}/applications/{application_id}/commands", self.api_base)
    }

    /// Overwrite the global command list with `commands`.
    pub async fn put_commands(
        &self,
        application_id: &str,
        commands: &[serde_json::Value],
    ) -> Result<Vec<RegisteredCommand>> {
        let url = self.commands_url(application_id);
        let response = self
            .request(Method::PUT, &url, Some(json!(commands)))
            .await
            .context("register Discord application commands")?;
        response
            .json()
            .await
            .context("parse Discord register commands response JSON")
    }

    pub async fn list_commands(&self, application_id: &str) -> Result<Vec<RegisteredCommand>> {
        let url = self.commands_url(application_id);
        let response = self
            .request(Method::GET, &url, None)
            .await
            .context("list Discord application commands")?;
        response
            .json()
            .await
            .context("parse Discord command list JSON")
    }

    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response> {
        let mut request_builder = self
            .client
            .request(method.clone(), url)
            .header("Authorization", format!("Bot {}", self.bot_token));
        if let Some(payload) = body {
            request_builder = request_builder.json(&payload);
        }

        let response = request_builder
            .send()
            .await
            .with_context(|| format!("send Discord request {} {}", method.as_str(), url))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|error| format!("<failed to read response body: {error}>"));
            return Err(DiscordError::Request {
                method: method.as_str().to_string(),
                url: url.to_string(),
                status,
                body,
            }
            .into());
        }

        tracing::debug!(method = method.as_str(), url, "discord request ok");
        Ok(response)
    }
}
