use crate::{
    database::Database,
    model::warnings::{WarningIssued, WarningRecord},
};

/// Record a warning for a target user and return the new warning number.
pub async fn record_warning(
    db: &Database,
    user_id: u64,
    username: &str,
    moderator_id: u64,
    reason: &str,
    warned_at: u64,
) -> anyhow::Result<WarningIssued> {
    let record = WarningRecord {
        id: user_id,
        username: username.to_owned(),
        reason: reason.to_owned(),
        moderator_id,
        warned_at,
    };

    let warn_number = db
        .warnings()
        .update(move |warnings| {
            warnings.push(record);
            warnings.iter().filter(|entry| entry.id == user_id).count()
        })
        .await?;

    Ok(WarningIssued { warn_number })
}

/// Every warning of a user, oldest first.
pub async fn warnings_for(db: &Database, user_id: u64) -> Vec<WarningRecord> {
    let mut entries: Vec<WarningRecord> = db
        .warnings()
        .read(|warnings| {
            warnings
                .iter()
                .filter(|entry| entry.id == user_id)
                .cloned()
                .collect()
        })
        .await;

    entries.sort_by_key(|entry| entry.warned_at);
    entries
}

pub async fn clear_warnings(db: &Database, user_id: u64) -> anyhow::Result<usize> {
    db.warnings()
        .update(|warnings| {
            let before = warnings.len();
            warnings.retain(|entry| entry.id != user_id);
            before - warnings.len()
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::{clear_warnings, record_warning, warnings_for};
    use crate::database::Database;

    #[tokio::test]
    async fn warning_numbers_count_per_user() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).await.unwrap();

        let first = record_warning(&db, 7, "seven", 1, "spam", 10).await.unwrap();
        let other = record_warning(&db, 8, "eight", 1, "caps", 11).await.unwrap();
        let second = record_warning(&db, 7, "seven", 1, "more spam", 12).await.unwrap();

        assert_eq!(first.warn_number, 1);
        assert_eq!(other.warn_number, 1);
        assert_eq!(second.warn_number, 2);

        let entries = warnings_for(&db, 7).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].reason, "more spam");
    }

    #[tokio::test]
    async fn clearing_only_touches_target_user() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).await.unwrap();

        record_warning(&db, 7, "seven", 1, "spam", 10).await.unwrap();
        record_warning(&db, 8, "eight", 1, "caps", 11).await.unwrap();

        assert_eq!(clear_warnings(&db, 7).await.unwrap(), 1);
        assert!(warnings_for(&db, 7).await.is_empty());
        assert_eq!(warnings_for(&db, 8).await.len(), 1);
    }
}
