//! The subset of a push event payload the notifier reads.
//!
//! Only the fields below are modelled; everything else in the payload is
//! ignored. A manually triggered run carries neither `head_commit` nor
//! `commits`, so both are optional.

use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Default, Deserialize)]
pub struct PushEvent {
    /// Revision the branch points to after the push.
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub repository: Option<EventRepository>,
    #[serde(default)]
    pub head_commit: Option<HeadCommit>,
    #[serde(default)]
    pub commits: Vec<SubCommit>,
}

#[derive(Debug, Deserialize)]
pub struct EventRepository {
    pub full_name: String,
}

#[derive(Debug, Deserialize)]
pub struct HeadCommit {
    pub message: String,
    pub committer: CommitUser,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct CommitUser {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubCommit {
    #[serde(default)]
    pub added: Vec<String>,
    #[serde(default)]
    pub modified: Vec<String>,
    #[serde(default)]
    pub removed: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Removed => "removed",
        }
    }
}

impl PushEvent {
    pub fn from_json(contents: &str) -> AppResult<Self> {
        serde_json::from_str(contents)
            .map_err(|err| AppError::PayloadParse(format!("invalid push event: {err}")))
    }

    pub async fn load(path: &Path) -> AppResult<Self> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|err| {
            AppError::PayloadParse(format!("cannot read {}: {err}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    /// Every changed path, in enumeration order and with multiplicity.
    pub fn changed_paths(&self) -> impl Iterator<Item = (ChangeKind, &str)> + '_ {
        self.commits.iter().flat_map(|commit| {
            let added = commit
                .added
                .iter()
                .map(|path| (ChangeKind::Added, path.as_str()));
            let modified = commit
                .modified
                .iter()
                .map(|path| (ChangeKind::Modified, path.as_str()));
            let removed = commit
                .removed
                .iter()
                .map(|path| (ChangeKind::Removed, path.as_str()));
            added.chain(modified).chain(removed)
        })
    }

    pub fn repository_name(&self) -> Option<&str> {
        self.repository
            .as_ref()
            .map(|repo| repo.full_name.as_str())
    }
}
