pub mod webhook;
pub mod workspace;
