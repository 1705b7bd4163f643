use serde::{Deserialize, Serialize};

/// A ban issued through the bot, kept so the nightly job can lift it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BanRecord {
    pub id: u64,
    pub username: String,
    pub reason: String,
    pub moderator_id: u64,
    pub banned_at: u64,
    /// Unix seconds after which the ban is lifted; `None` for permanent bans.
    pub unban_date: Option<u64>,
    pub cleared: bool,
}

impl BanRecord {
    pub fn is_due(&self, now: u64) -> bool {
        !self.cleared && self.unban_date.is_some_and(|date| date <= now)
    }
}
