use std::path::PathBuf;

use async_trait::async_trait;
use tracing::trace;

use crate::services::WorkspaceInspector;

/// Reads file sizes from the checked-out working tree.
pub struct WorkingTree {
    root: PathBuf,
}

impl WorkingTree {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl WorkspaceInspector for WorkingTree {
    async fn file_size(&self, path: &str) -> Option<u64> {
        let full_path = self.root.join(path.trim_start_matches('/'));
        match tokio::fs::metadata(&full_path).await {
            Ok(metadata) if metadata.is_file() => Some(metadata.len()),
            Ok(_) => None,
            Err(err) => {
                trace!(path, %err, "cannot stat changed file");
                None
            }
        }
    }
}
