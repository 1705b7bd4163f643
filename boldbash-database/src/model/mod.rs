pub mod bans;
pub mod quotes;
pub mod warnings;
