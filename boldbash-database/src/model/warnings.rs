use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningRecord {
    pub id: u64,
    pub username: String,
    pub reason: String,
    pub moderator_id: u64,
    pub warned_at: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WarningIssued {
    pub warn_number: usize,
}
