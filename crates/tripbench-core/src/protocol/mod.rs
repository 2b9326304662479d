//! Task protocol: the text format between the orchestrator model and the
//! dispatcher.
//!
//! - [`scanner`]: `scan_task_line`, `parse_tasks`
//! - [`error`]: `ProtocolError`, `ProtocolResult`

pub mod error;
pub mod scanner;

pub use error::{ProtocolError, ProtocolResult};
pub use scanner::{parse_tasks, scan_task_line, TaskLine, TASK_MARKER};
