use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{CONTENT_TYPE, USER_AGENT},
};
use tracing::{debug, info};

use crate::config::WebhookEndpoint;
use crate::domain::notification::Notification;
use crate::error::{AppError, AppResult};
use crate::services::NotificationSink;

const USER_AGENT_VALUE: &str = concat!("pushnote/", env!("CARGO_PKG_VERSION"));

pub struct WebhookClient {
    http: Client,
}

impl WebhookClient {
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl NotificationSink for WebhookClient {
    async fn deliver(
        &self,
        endpoint: &WebhookEndpoint,
        notification: &Notification,
    ) -> AppResult<()> {
        debug!(files = notification.files_changed.len(), "posting notification");

        // reqwest errors carry the request URL; strip it before display.
        let response = self
            .http
            .post(endpoint.expose())
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .json(notification)
            .send()
            .await
            .map_err(|err| {
                AppError::Delivery(format!("failed to call webhook: {}", err.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Delivery(format!("webhook responded with {status}")));
        }

        info!(%status, "webhook accepted notification");
        Ok(())
    }
}
