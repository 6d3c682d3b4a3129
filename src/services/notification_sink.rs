use async_trait::async_trait;

use crate::config::WebhookEndpoint;
use crate::domain::notification::Notification;
use crate::error::AppResult;

#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Sends one notification. Implementations must not retry.
    async fn deliver(
        &self,
        endpoint: &WebhookEndpoint,
        notification: &Notification,
    ) -> AppResult<()>;
}
