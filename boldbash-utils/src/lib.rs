/// Embed model and builders shared across commands and jobs.
pub mod embed;
/// Shared formatting helpers (durations, message log lines, usage strings).
pub mod formatting;
/// Default message-command prefix, overridable through `COMMAND_PREFIX`.
pub const DEFAULT_COMMAND_PREFIX: char = '.';
/// Reserved token joining several statements into one chain.
pub const CHAIN_COMBINATOR: &str = "&&";
/// Pure parser helpers.
pub mod parse;
/// Permission helper utilities.
pub mod permissions;
/// Shared time helpers.
pub mod time;
