pub mod ban;
pub mod clearwarnings;
pub(crate) mod embeds;
pub mod kick;
pub mod unban;
pub mod warn;
pub mod warnings;
