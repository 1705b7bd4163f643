pub mod addquote;
pub mod delquote;
pub(crate) mod embeds;
pub mod help;
pub mod ping;
pub mod quote;
pub mod showcase;
pub mod stats;
pub mod usage;
