use async_trait::async_trait;

#[async_trait]
pub trait WorkspaceInspector: Send + Sync {
    /// Byte size of `path` relative to the workspace root, or `None` when it
    /// cannot be read as a regular file.
    async fn file_size(&self, path: &str) -> Option<u64>;
}
