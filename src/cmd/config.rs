use clap::{Args, Subcommand};
use secrecy::ExposeSecret;

use crate::config::{AppConfig, SettingsArgs};
use crate::error::AppResult;

#[derive(Args, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommand {
    /// Show the resolved configuration (webhook URL masked).
    Show(SettingsArgs),
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show(settings) => run_show(settings),
    }
}

fn run_show(settings: SettingsArgs) -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let cfg = AppConfig::load(settings, &cwd)?;

    println!(
        "Webhook URL: {}",
        mask_secret(cfg.webhook_url.as_ref().map(|url| url.expose_secret()))
    );
    println!(
        "Event payload: {}",
        display_value(cfg.event_path.as_ref().map(|path| path.display().to_string()))
    );
    println!("Repository: {}", display_value(cfg.repository.clone()));
    println!("Revision: {}", display_value(cfg.revision.clone()));
    println!("Server URL: {}", cfg.server_url);
    println!("Workspace: {}", cfg.workspace_root.display());
    println!("Timeout: {}s", cfg.timeout.as_secs());

    Ok(())
}

fn display_value(value: Option<String>) -> String {
    value.unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: Option<&str>) -> String {
    match value {
        Some(secret) if secret.chars().count() > 6 => {
            let chars = secret.chars().collect::<Vec<_>>();
            let prefix = chars[..3].iter().collect::<String>();
            let suffix = chars[chars.len() - 3..].iter().collect::<String>();
            format!("{prefix}***{suffix}")
        }
        Some(secret) if !secret.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
