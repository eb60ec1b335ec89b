mod commands;
mod history;

use thiserror::Error;

use crate::stroke::StrokeId;

pub use commands::Command;
pub use history::CommandHistory;

/// Result type for command operations
pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Errors raised when a command is replayed against a store that does not
/// match the state it was recorded in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("stroke index {index} is out of range for a store of {len} strokes")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("stroke {0} is not in the store")]
    StrokeNotFound(StrokeId),
}
