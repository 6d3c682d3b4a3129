use clap::Args;

use crate::config::SettingsArgs;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::notify::{notify_push, preview_push};

#[derive(Args, Clone)]
pub struct NotifyArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
    /// Print the JSON body instead of posting it.
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(ctx: &AppContext, dry_run: bool) -> AppResult<()> {
    if dry_run {
        let notification = preview_push(ctx).await?;
        println!("{}", notification.to_json_pretty()?);
        return Ok(());
    }

    let notification = notify_push(ctx).await?;
    println!(
        "Notified webhook of {} changed file(s).",
        notification.files_changed.len()
    );
    Ok(())
}
