use tracing::{error, info};

use boldbash_core::{Access, Argument, BoxFuture, Command, Invocation, Outcome};
use boldbash_database::impls::bans::{NewBan, record_ban};
use boldbash_utils::formatting::{format_compact_duration, sanitize_mentions};
use boldbash_utils::parse::{is_permanent_token, parse_duration_seconds};
use boldbash_utils::time::now_unix_secs;

use crate::moderation::embeds::{
    NO_REASON, moderation_action_embed, moderation_failed_message, moderation_self_action_message,
    resolve_target, send_moderation_target_dm,
};

pub const META: Command = Command {
    name: "ban",
    description: "Ban a user, permanently or until the given duration has passed.",
    category: "moderation",
    arguments: &[
        Argument::required("user", "The user to ban."),
        Argument::required("duration", "How long the ban lasts (e.g. 7d, 2w) or `perm`."),
        Argument::optional("reason", "Reason for the ban."),
    ],
    access: Access::Staff,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(ban(invocation, args))
}

/// How long a ban lasts. `None` means permanent.
fn parse_ban_length(raw: &str) -> Option<Option<u64>> {
    if is_permanent_token(raw) {
        return Some(None);
    }
    parse_duration_seconds(raw).map(Some)
}

pub async fn ban(invocation: &Invocation<'_>, args: &[String]) -> Outcome {
    let [raw_user, raw_length, rest @ ..] = args else {
        return invocation
            .fail(&format!("Usage: `{}`", META.usage(invocation.prefix())))
            .await;
    };
    let Some(target) = resolve_target(invocation, raw_user).await else {
        return Outcome::Failure;
    };

    if target.user_id == invocation.author.user_id {
        return invocation.fail(&moderation_self_action_message("ban")).await;
    }

    let Some(duration_seconds) = parse_ban_length(raw_length) else {
        return invocation
            .fail(&format!(
                "`{}` is not a duration. Use something like `7d` or `perm`.",
                sanitize_mentions(raw_length)
            ))
            .await;
    };

    let reason = rest.first().map(String::as_str);
    let duration_label = match duration_seconds {
        Some(seconds) => format_compact_duration(seconds),
        None => "Permanent".to_owned(),
    };

    send_moderation_target_dm(invocation, &target, "banned", reason, Some(&duration_label)).await;

    if let Err(source) = invocation
        .gateway
        .ban(invocation.data.guild_id(), target.user_id, reason.unwrap_or(NO_REASON))
        .await
    {
        error!(?source, "ban request failed");
        invocation.error(&moderation_failed_message("ban")).await;
        return Outcome::Success;
    }

    let recorded = record_ban(
        &invocation.data.db,
        NewBan {
            user_id: target.user_id.get(),
            username: &target.display_name,
            reason: reason.unwrap_or(NO_REASON),
            moderator_id: invocation.author.user_id.get(),
            banned_at: now_unix_secs(),
            duration_seconds,
        },
    )
    .await;

    if let Err(source) = recorded {
        error!(?source, user = %target.user_id, "failed to save ban record");
        invocation
            .error(
                "The user was banned, but the ban could not be saved. They will not be unbanned automatically.",
            )
            .await;
        return Outcome::Success;
    }

    info!(
        user = %target.user_id,
        moderator = %invocation.author.user_id,
        duration = %duration_label,
        "banned user"
    );
    invocation
        .say_embed(
            "",
            moderation_action_embed(&target, "banned", reason, Some(&duration_label)),
        )
        .await;
    Outcome::Success
}
