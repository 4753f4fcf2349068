use std::sync::Arc;

use crate::{
    application::config::RuntimeConfig, domain::error::DomainError,
    interfaces::slack_api::SlackClient,
};

#[derive(Clone)]
pub struct SharedState {
    inner: Arc<InnerState>,
}

struct InnerState {
    config: RuntimeConfig,
    slack: SlackClient,
}

impl SharedState {
    pub fn new(config: RuntimeConfig) -> Result<Self, DomainError> {
        let slack = SlackClient::new(&config)?;

        Ok(Self {
            inner: Arc::new(InnerState {
                config,
                slack,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn slack(&self) -> &SlackClient {
        &self.inner.slack
    }
}
