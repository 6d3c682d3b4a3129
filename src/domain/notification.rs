use reqwest::Url;
use serde::Serialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitInfo {
    pub message: String,
    pub author: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub name: String,
    pub size: u64,
    pub url: String,
}

/// The JSON body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub commit_message: String,
    pub commit_author: String,
    pub commit_url: String,
    pub files_changed: Vec<FileChange>,
}

impl Notification {
    pub fn new(commit: CommitInfo, files_changed: Vec<FileChange>) -> Self {
        Self {
            commit_message: commit.message,
            commit_author: commit.author,
            commit_url: commit.url,
            files_changed,
        }
    }

    pub fn to_json_pretty(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| AppError::PayloadParse(format!("failed to encode notification: {err}")))
    }
}

/// Builds browse URLs for a repository at one revision.
#[derive(Debug, Clone)]
pub struct RevisionLinks {
    base: Url,
    repository: String,
    revision: String,
}

impl RevisionLinks {
    pub fn new(server_url: &Url, repository: &str, revision: &str) -> Self {
        Self {
            base: server_url.clone(),
            repository: repository.trim_matches('/').to_string(),
            revision: revision.to_string(),
        }
    }

    pub fn commit_url(&self) -> String {
        self.join(["commit", self.revision.as_str()].into_iter())
    }

    pub fn file_url(&self, path: &str) -> String {
        let segments = ["blob", self.revision.as_str()]
            .into_iter()
            .chain(path.split('/').filter(|segment| !segment.is_empty()));
        self.join(segments)
    }

    fn join<'a>(&self, tail: impl Iterator<Item = &'a str>) -> String {
        let mut url = self.base.clone();
        // http(s) URLs always have a path that can be extended.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(self.repository.split('/'))
                .extend(tail);
        }
        url.to_string()
    }
}
