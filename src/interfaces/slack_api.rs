use reqwest::Client;
use tracing::debug;

use crate::{
    application::config::RuntimeConfig,
    domain::{dispatch::OutboundMessage, error::DomainError},
};

const POST_MESSAGE_PATH: &str = "/chat.postMessage";

/// Thin client for the Slack Web API `chat.postMessage` method.
///
/// Delivery is at-most-once: the call is made a single time, the response
/// body is discarded, and only transport failures or non-2xx statuses are
/// reported back to the caller.
#[derive(Debug, Clone)]
pub struct SlackClient {
    http: Client,
    post_message_url: String,
    oauth_token: String,
}

impl SlackClient {
    pub fn new(config: &RuntimeConfig) -> Result<Self, DomainError> {
        let http = Client::builder()
            .timeout(config.slack_timeout)
            .build()
            .map_err(|error| {
                DomainError::Unavailable(format!("failed to construct http client: {error}"))
            })?;

        Ok(Self {
            http,
            post_message_url: format!("{}{POST_MESSAGE_PATH}", config.slack_api_base_url),
            oauth_token: config.slack_oauth_token.clone().unwrap_or_default(),
        })
    }

    pub async fn post_message(&self, message: &OutboundMessage) -> Result<(), DomainError> {
        let response = self
            .http
            .post(&self.post_message_url)
            .bearer_auth(&self.oauth_token)
            .json(message)
            .send()
            .await
            .map_err(|error| DomainError::Upstream(format!("slack request failed: {error}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Upstream(format!(
                "slack chat.postMessage returned {status}"
            )));
        }

        debug!(
            "posted message to slack channel={} status={status}",
            message.channel
        );
        Ok(())
    }
}
