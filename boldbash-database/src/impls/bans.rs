use crate::{database::Database, model::bans::BanRecord};

pub struct NewBan<'a> {
    pub user_id: u64,
    pub username: &'a str,
    pub reason: &'a str,
    pub moderator_id: u64,
    pub banned_at: u64,
    pub duration_seconds: Option<u64>,
}

/// Append a ban record, computing its release date from the duration.
pub async fn record_ban(db: &Database, ban: NewBan<'_>) -> anyhow::Result<BanRecord> {
    let record = BanRecord {
        id: ban.user_id,
        username: ban.username.to_owned(),
        reason: ban.reason.to_owned(),
        moderator_id: ban.moderator_id,
        banned_at: ban.banned_at,
        unban_date: ban
            .duration_seconds
            .map(|seconds| ban.banned_at.saturating_add(seconds)),
        cleared: false,
    };

    let stored = record.clone();
    db.bans().update(move |bans| bans.push(stored)).await?;
    Ok(record)
}

/// Uncleared bans whose release date is at or before `now`.
pub async fn due_bans(db: &Database, now: u64) -> Vec<BanRecord> {
    db.bans()
        .read(|bans| bans.iter().filter(|ban| ban.is_due(now)).cloned().collect())
        .await
}

/// The most recent uncleared ban for a user, if any.
pub async fn active_ban(db: &Database, user_id: u64) -> Option<BanRecord> {
    db.bans()
        .read(|bans| {
            bans.iter()
                .rev()
                .find(|ban| ban.id == user_id && !ban.cleared)
                .cloned()
        })
        .await
}

/// Mark every uncleared ban of a user as cleared and return how many changed.
pub async fn clear_active_bans(db: &Database, user_id: u64) -> anyhow::Result<usize> {
    db.bans()
        .update(|bans| {
            let mut cleared = 0;
            for ban in bans.iter_mut().filter(|ban| ban.id == user_id && !ban.cleared) {
                ban.cleared = true;
                cleared += 1;
            }
            cleared
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::{NewBan, active_ban, clear_active_bans, due_bans, record_ban};
    use crate::database::Database;

    fn ban(user_id: u64, banned_at: u64, duration_seconds: Option<u64>) -> NewBan<'static> {
        NewBan {
            user_id,
            username: "spammer",
            reason: "spam",
            moderator_id: 1,
            banned_at,
            duration_seconds,
        }
    }

    #[tokio::test]
    async fn only_expired_uncleared_bans_are_due() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).await.unwrap();

        record_ban(&db, ban(10, 1_000, Some(100))).await.unwrap();
        record_ban(&db, ban(11, 1_000, Some(10_000))).await.unwrap();
        record_ban(&db, ban(12, 1_000, None)).await.unwrap();

        let due = due_bans(&db, 1_100).await;
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, 10);
        assert_eq!(due[0].unban_date, Some(1_100));

        assert_eq!(clear_active_bans(&db, 10).await.unwrap(), 1);
        assert!(due_bans(&db, 1_100).await.is_empty());
        assert!(active_ban(&db, 10).await.is_none());
        assert!(active_ban(&db, 12).await.is_some());
    }

    #[tokio::test]
    async fn unsaved_ban_is_not_scheduled() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path()).await.unwrap();
        std::fs::create_dir(db.bans().path().with_extension("json.tmp")).unwrap();

        assert!(record_ban(&db, ban(77, 0, Some(10))).await.is_err());
        assert!(active_ban(&db, 77).await.is_none());
        assert!(due_bans(&db, 100).await.is_empty());
    }

    #[tokio::test]
    async fn bans_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let db = Database::open(dir.path()).await.unwrap();
            record_ban(&db, ban(20, 5, Some(5))).await.unwrap();
        }

        let db = Database::open(dir.path()).await.unwrap();
        let stored = active_ban(&db, 20).await.unwrap();
        assert_eq!(stored.username, "spammer");
        assert_eq!(stored.unban_date, Some(10));
    }
}
