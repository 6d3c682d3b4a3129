use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{NotificationSink, WorkspaceInspector};

pub struct AppContext {
    pub config: AppConfig,
    pub sink: Arc<dyn NotificationSink>,
    pub workspace: Arc<dyn WorkspaceInspector>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        sink: Arc<dyn NotificationSink>,
        workspace: Arc<dyn WorkspaceInspector>,
    ) -> Self {
        Self {
            config,
            sink,
            workspace,
        }
    }
}
