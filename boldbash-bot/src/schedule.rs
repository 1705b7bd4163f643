//! Nightly and weekly jobs, fired at local midnight.

use std::time::Duration;

use chrono::{DateTime, Datelike, Local, TimeZone, Weekday};
use poise::serenity_prelude as serenity;
use tracing::{debug, info, warn};

use boldbash_commands::jobs::{daily_report, post_backups, release_expired_bans};
use boldbash_core::Data;
use boldbash_database::impls::statuses::random_playing_status;
use boldbash_utils::time::now_unix_secs;

use crate::gateway::SerenityGateway;

const RETRY_DELAY: Duration = Duration::from_secs(60);

/// Start of the next day in `now`'s time zone.
pub fn next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let midnight = now.date_naive().succ_opt()?.and_hms_opt(0, 0, 0)?;
    now.timezone().from_local_datetime(&midnight).earliest()
}

pub fn is_backup_day<Tz: TimeZone>(at: &DateTime<Tz>) -> bool {
    at.weekday() == Weekday::Sun
}

pub fn set_random_status(ctx: &serenity::Context, data: &Data) {
    match random_playing_status(&data.db) {
        Some(status) => {
            debug!(status, "setting playing status");
            ctx.set_activity(Some(serenity::ActivityData::playing(status)));
        }
        None => debug!("no playing statuses configured"),
    }
}

pub fn spawn(ctx: serenity::Context, data: Data) {
    tokio::spawn(async move {
        let gateway = SerenityGateway::new(ctx.http.clone());
        loop {
            let now = Local::now();
            let Some(midnight) = next_midnight(&now) else {
                warn!("could not compute the next midnight; retrying shortly");
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            };

            let wait = (midnight.clone() - now).to_std().unwrap_or(RETRY_DELAY);
            debug!(seconds = wait.as_secs(), "sleeping until midnight");
            tokio::time::sleep(wait).await;

            run_nightly(&ctx, &data, &gateway, &midnight).await;
        }
    });
}

async fn run_nightly(
    ctx: &serenity::Context,
    data: &Data,
    gateway: &SerenityGateway,
    midnight: &DateTime<Local>,
) {
    let date = midnight.format("%-m/%-d/%Y").to_string();
    daily_report(data, gateway, &date).await;
    set_random_status(ctx, data);

    let released = release_expired_bans(data, gateway, now_unix_secs()).await;
    info!(released, "nightly jobs finished");

    if is_backup_day(midnight) {
        post_backups(data, gateway).await;
        info!("weekly backups posted");
    }
}
