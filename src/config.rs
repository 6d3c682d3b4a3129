use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{AppError, AppResult};

pub const DEFAULT_SERVER_URL: &str = "https://github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings shared by every subcommand. CI runners provide most of them
/// through their standard environment variables.
#[derive(Args, Clone, Default)]
pub struct SettingsArgs {
    /// Webhook endpoint receiving the notification.
    #[arg(long, env = "PUSHNOTE_WEBHOOK_URL", hide_env_values = true)]
    pub webhook_url: Option<String>,
    /// Push event payload (JSON) written by the CI platform.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event: Option<PathBuf>,
    /// Repository identifier, e.g. `owner/name`.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,
    /// Revision hash the run was triggered for.
    #[arg(long, env = "GITHUB_SHA")]
    pub revision: Option<String>,
    /// Base URL of the source host.
    #[arg(long, env = "GITHUB_SERVER_URL")]
    pub server_url: Option<String>,
    /// Checked-out working tree used to look up file sizes.
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<PathBuf>,
    /// Request timeout for the webhook call, in seconds.
    #[arg(long, env = "PUSHNOTE_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug)]
pub struct AppConfig {
    pub webhook_url: Option<SecretString>,
    pub event_path: Option<PathBuf>,
    pub repository: Option<String>,
    pub revision: Option<String>,
    pub server_url: Url,
    pub workspace_root: PathBuf,
    pub timeout: Duration,
}

impl AppConfig {
    pub fn load(args: SettingsArgs, workspace_hint: &Path) -> AppResult<Self> {
        let server_url = non_empty(args.server_url).unwrap_or_else(|| DEFAULT_SERVER_URL.into());
        let server_url = Url::parse(&server_url)
            .ok()
            .filter(is_http)
            .ok_or_else(|| AppError::Configuration(format!("invalid server URL '{server_url}'")))?;

        let timeout_secs = args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(AppError::Configuration("timeout must be at least one second".to_string()));
        }

        Ok(Self {
            webhook_url: non_empty(args.webhook_url).map(SecretString::from),
            event_path: args.event.filter(|path| !path.as_os_str().is_empty()),
            repository: non_empty(args.repository),
            revision: non_empty(args.revision),
            server_url,
            workspace_root: args
                .workspace
                .filter(|path| !path.as_os_str().is_empty())
                .unwrap_or_else(|| workspace_hint.to_path_buf()),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn webhook_endpoint(&self) -> AppResult<WebhookEndpoint> {
        let raw = self.webhook_url.as_ref().ok_or_else(|| {
            AppError::Configuration("webhook URL not configured".to_string())
        })?;
        WebhookEndpoint::parse(raw.expose_secret())
    }
}

/// A validated webhook URL. The value is never displayed or logged.
#[derive(Debug)]
pub struct WebhookEndpoint {
    url: SecretString,
}

impl WebhookEndpoint {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        // The message must not echo the URL back.
        match Url::parse(trimmed) {
            Ok(url) if is_http(&url) && url.host().is_some() => Ok(Self {
                url: SecretString::from(trimmed.to_string()),
            }),
            _ => Err(AppError::Configuration("webhook URL is not a valid http(s) URL".to_string())),
        }
    }

    pub fn expose(&self) -> &str {
        self.url.expose_secret()
    }
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
