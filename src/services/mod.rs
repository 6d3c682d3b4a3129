pub mod notification_sink;
pub mod workspace;

pub use notification_sink::NotificationSink;
pub use workspace::WorkspaceInspector;
