//! Backend worker: owns the tokio runtime and the user list controller.

pub mod commands;
pub mod prompt;
pub mod runtime;
