//! Message-to-command pipeline: channel policy gate, chain splitting,
//! tokenizing and the dispatch loop.

pub mod chain;
pub mod engine;
pub mod policy;
pub mod tokenize;

use thiserror::Error;

pub use chain::{is_command, split_chain};
pub use engine::{ChainReport, ChainState, Disposition, InboundMessage, process_message};
pub use policy::ChannelPolicy;
pub use tokenize::{Statement, tokenize};

/// Everything that can stop a statement before or during execution.
///
/// The `Display` text is the notice shown to users.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Empty command.")]
    EmptyCommand,

    #[error("Command not found. See: `{prefix}help`.")]
    CommandNotFound { name: String, prefix: char },

    #[error("You don't have permission to use `{prefix}{name}`.")]
    PermissionDenied { name: String, prefix: char },

    #[error("Usage: `{usage}`")]
    InvalidArguments { usage: String },

    #[error("`{name}` failed.")]
    ExecutionFailed { name: String },

    #[error("A statement failed, so the rest of the && combination was not executed.")]
    ChainAborted,

    #[error("Only `{exempt}` may be used in this channel.")]
    PolicyViolation { exempt: &'static str },
}
