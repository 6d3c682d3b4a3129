use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::event::PushEvent;
use crate::domain::notification::{CommitInfo, FileChange, Notification, RevisionLinks};
use crate::error::AppResult;

async fn load_event(config: &AppConfig) -> AppResult<PushEvent> {
    match &config.event_path {
        Some(path) => {
            debug!(path = %path.display(), "reading event payload");
            PushEvent::load(path).await
        }
        None => {
            warn!("no event payload supplied; commit and file fields will be best effort");
            Ok(PushEvent::default())
        }
    }
}

/// Validates the endpoint, then reads the event, gathers the notification
/// and posts it once.
pub async fn notify_push(ctx: &AppContext) -> AppResult<Notification> {
    let endpoint = ctx.config.webhook_endpoint()?;
    let event = load_event(&ctx.config).await?;
    let notification = gather(ctx, &event).await?;
    ctx.sink.deliver(&endpoint, &notification).await?;
    Ok(notification)
}

/// Gathers the notification without an endpoint or delivery.
pub async fn preview_push(ctx: &AppContext) -> AppResult<Notification> {
    let event = load_event(&ctx.config).await?;
    gather(ctx, &event).await
}

pub async fn gather(ctx: &AppContext, event: &PushEvent) -> AppResult<Notification> {
    let links = revision_links(&ctx.config, event);
    if links.is_none() {
        warn!("repository or revision unknown; URLs will be empty");
    }

    let commit = match &event.head_commit {
        Some(head) => CommitInfo {
            message: head.message.clone(),
            author: head.committer.name.clone(),
            url: head.url.clone(),
        },
        None => CommitInfo {
            url: links
                .as_ref()
                .map(RevisionLinks::commit_url)
                .unwrap_or_default(),
            ..CommitInfo::default()
        },
    };

    let mut files = Vec::new();
    for (kind, path) in event.changed_paths() {
        // Removed files are usually gone from the working tree.
        let size = ctx.workspace.file_size(path).await.unwrap_or(0);
        debug!(path, kind = kind.as_str(), size, "changed file");
        files.push(FileChange {
            name: path.to_string(),
            size,
            url: links
                .as_ref()
                .map(|links| links.file_url(path))
                .unwrap_or_default(),
        });
    }

    info!(files = files.len(), "gathered push notification");
    Ok(Notification::new(commit, files))
}

fn revision_links(config: &AppConfig, event: &PushEvent) -> Option<RevisionLinks> {
    let repository = config.repository.as_deref().or(event.repository_name())?;
    let revision = config.revision.as_deref().or(event.after.as_deref())?;
    Some(RevisionLinks::new(&config.server_url, repository, revision))
}
