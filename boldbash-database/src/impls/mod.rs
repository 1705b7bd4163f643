pub mod bans;
pub mod quotes;
pub mod statuses;
pub mod warnings;
