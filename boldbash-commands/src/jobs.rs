//! Work run by the scheduler rather than by a message.

use tracing::{error, info, warn};

use poise::serenity_prelude as serenity;

use boldbash_core::{Data, Gateway, StatsSnapshot};
use boldbash_database::impls::bans::{clear_active_bans, due_bans};
use boldbash_utils::embed::{Embed, error_embed, info_embed};

pub const BACKUP_ANNOUNCEMENT: &str = "Here are the JSON backups for this week:";

async fn notify_log(data: &Data, gateway: &dyn Gateway, embed: Embed) {
    if let Err(source) = gateway.send(data.channels.log, "", Some(embed)).await {
        error!(?source, "failed to post to the log channel");
    }
}

pub fn daily_stats_message(date: &str, stats: StatsSnapshot) -> String {
    format!(
        "Here are today's stats for {}! {} users have joined, {} users have left, {} warnings have been issued.",
        date, stats.joins, stats.leaves, stats.warnings
    )
}

/// Post the day's counters to the log channel and reset them.
pub async fn daily_report(data: &Data, gateway: &dyn Gateway, date: &str) -> StatsSnapshot {
    let stats = data.stats.take();
    info!(joins = stats.joins, leaves = stats.leaves, warnings = stats.warnings, "daily stats");
    notify_log(data, gateway, info_embed("Daily stats", daily_stats_message(date, stats))).await;
    stats
}

/// Lift every timed ban whose release date has passed. Returns how many were lifted.
///
/// A ban that cannot be lifted stays uncleared and is retried the next night.
pub async fn release_expired_bans(data: &Data, gateway: &dyn Gateway, now: u64) -> usize {
    let guild_id = data.guild_id();
    let mut released = 0;

    for ban in due_bans(&data.db, now).await {
        if ban.id == 0 {
            warn!(username = %ban.username, "skipping ban record without a user id");
            continue;
        }
        let user = serenity::UserId::new(ban.id);

        notify_log(
            data,
            gateway,
            info_embed("Info", format!("Unbanning {}.", ban.username)),
        )
        .await;

        if let Err(source) = gateway.unban(guild_id, user).await {
            error!(?source, %user, "scheduled unban failed");
            notify_log(
                data,
                gateway,
                error_embed(format!("Failed to unban {}.", ban.username)),
            )
            .await;
            continue;
        }

        let invite = format!(
            "You have been unbanned from the server **{}**. Here's the invite link: {}.",
            data.channels.guild_name, data.config.invite_link
        );
        if let Err(source) = gateway.send_private(user, &invite, None).await {
            warn!(?source, %user, "failed to send unban message");
            notify_log(
                data,
                gateway,
                error_embed(format!("Failed to send unban message to {}.", ban.username)),
            )
            .await;
        }

        if let Err(source) = clear_active_bans(&data.db, ban.id).await {
            error!(?source, %user, "failed to save cleared ban");
        }
        released += 1;
    }

    released
}

/// Post the JSON collections to the log channel.
pub async fn post_backups(data: &Data, gateway: &dyn Gateway) {
    let log = data.channels.log;
    if let Err(source) = gateway.send(log, BACKUP_ANNOUNCEMENT, None).await {
        error!(?source, "failed to announce backups");
        return;
    }

    for (label, path) in data.db.backup_files() {
        if let Err(source) = gateway.send_file(log, label, path).await {
            error!(?source, path = %path.display(), "failed to post backup");
            notify_log(
                data,
                gateway,
                error_embed(format!("Failed to fetch {} file.", path.display())),
            )
            .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude as serenity;

    use boldbash_core::testing::{Delivery, INVITE_LINK, LOG_CHANNEL, RecordingGateway};
    use boldbash_database::impls::bans::{NewBan, active_ban, record_ban};

    use super::{BACKUP_ANNOUNCEMENT, daily_report, post_backups, release_expired_bans};
    use crate::test_support::setup;

    async fn ban(data: &boldbash_core::Data, user_id: u64, username: &str, duration: Option<u64>) {
        record_ban(
            &data.db,
            NewBan {
                user_id,
                username,
                reason: "spam",
                moderator_id: 2,
                banned_at: 1_000,
                duration_seconds: duration,
            },
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn daily_report_posts_and_resets() {
        let (_dir, data) = setup().await;
        data.stats.record_join();
        data.stats.record_leave();
        data.stats.record_leave();
        let gateway = RecordingGateway::new();

        let stats = daily_report(&data, &gateway, "10/19/2026").await;
        assert_eq!((stats.joins, stats.leaves, stats.warnings), (1, 2, 0));
        assert_eq!(data.stats.snapshot().joins, 0);

        let deliveries = gateway.deliveries();
        assert_eq!(
            deliveries[0].body(),
            Some(
                "Here are today's stats for 10/19/2026! 1 users have joined, 2 users have left, 0 warnings have been issued."
            )
        );
    }

    #[tokio::test]
    async fn releases_only_due_bans() {
        let (_dir, data) = setup().await;
        ban(&data, 42, "spammer", Some(100)).await;
        ban(&data, 43, "troll", Some(100_000)).await;
        ban(&data, 44, "raider", None).await;
        let gateway = RecordingGateway::new();

        assert_eq!(release_expired_bans(&data, &gateway, 1_100).await, 1);
        assert!(active_ban(&data.db, 42).await.is_none());
        assert!(active_ban(&data.db, 43).await.is_some());
        assert!(active_ban(&data.db, 44).await.is_some());

        let deliveries = gateway.deliveries();
        assert_eq!(deliveries[0].body(), Some("Unbanning spammer."));
        assert_eq!(deliveries[1], Delivery::Unbanned(serenity::UserId::new(42)));
        assert_eq!(
            deliveries[2],
            Delivery::Private {
                user: serenity::UserId::new(42),
                text: format!(
                    "You have been unbanned from the server **Bold and Bash**. Here's the invite link: {}.",
                    INVITE_LINK
                ),
                embed: None,
            }
        );

        assert_eq!(release_expired_bans(&data, &gateway, 1_100).await, 0);
    }

    #[tokio::test]
    async fn failed_unban_is_retried_later() {
        let (_dir, data) = setup().await;
        ban(&data, 42, "spammer", Some(100)).await;
        let gateway = RecordingGateway::new().failing_for(42);

        assert_eq!(release_expired_bans(&data, &gateway, 2_000).await, 0);
        assert!(active_ban(&data.db, 42).await.is_some());
        assert_eq!(gateway.error_notices(), vec!["Failed to unban spammer.".to_owned()]);
    }

    #[tokio::test]
    async fn backups_post_every_collection() {
        let (_dir, data) = setup().await;
        let gateway = RecordingGateway::new();

        post_backups(&data, &gateway).await;

        let deliveries = gateway.deliveries();
        assert_eq!(deliveries.len(), 4);
        assert_eq!(
            deliveries[0],
            Delivery::Sent {
                channel: serenity::ChannelId::new(LOG_CHANNEL),
                text: BACKUP_ANNOUNCEMENT.to_owned(),
                embed: None,
            }
        );
        let labels: Vec<&str> = deliveries[1..]
            .iter()
            .filter_map(|delivery| match delivery {
                Delivery::File { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                ":hammer: Bans :hammer:",
                ":warning: Warnings :warning:",
                ":speech_balloon: Quotes :speech_balloon:",
            ]
        );
    }
}
