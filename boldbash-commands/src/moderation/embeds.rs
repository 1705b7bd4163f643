use tracing::warn;

use poise::serenity_prelude as serenity;

use boldbash_core::Invocation;
use boldbash_utils::embed::{DEFAULT_EMBED_COLOR, Embed};
use boldbash_utils::formatting::sanitize_mentions;
use boldbash_utils::parse::parse_user_reference;

pub const NO_REASON: &str = "No reason provided";

/// The user a moderation command acts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub user_id: serenity::UserId,
    pub display_name: String,
}

/// Resolve a `<@id>` mention or raw id, posting an error notice when it is not one.
pub async fn resolve_target(invocation: &Invocation<'_>, raw: &str) -> Option<Target> {
    let Some(id) = parse_user_reference(raw) else {
        invocation
            .error(&format!("`{}` is not a user mention or id.", sanitize_mentions(raw)))
            .await;
        return None;
    };

    let user_id = serenity::UserId::new(id);
    let display_name = invocation
        .gateway
        .user_name(user_id)
        .await
        .unwrap_or_else(|| format!("User {}", id));

    Some(Target {
        user_id,
        display_name,
    })
}

pub fn moderation_action_embed(
    target: &Target,
    action_past_tense: &str,
    reason: Option<&str>,
    duration: Option<&str>,
) -> Embed {
    let reason = sanitize_mentions(reason.unwrap_or(NO_REASON));

    let description = match duration {
        Some(duration) => format!(
            "**Target :** <@{}>\n**Reason :** {}\n**Duration :** {}",
            target.user_id.get(),
            reason,
            duration
        ),
        None => format!(
            "**Target :** <@{}>\n**Reason :** {}",
            target.user_id.get(),
            reason
        ),
    };

    Embed::new()
        .color(DEFAULT_EMBED_COLOR)
        .title(format!(
            "{} has been {}",
            sanitize_mentions(&target.display_name),
            action_past_tense
        ))
        .description(description)
}

pub fn moderation_target_dm_embed(
    guild_name: &str,
    action_past_tense: &str,
    reason: Option<&str>,
    duration: Option<&str>,
) -> Embed {
    let mut details = Vec::new();

    if let Some(reason) = reason {
        details.push(format!("**Reason :** {}", sanitize_mentions(reason)));
    }

    if let Some(duration) = duration {
        details.push(format!("**Duration :** {}", duration));
    }

    let description = if details.is_empty() {
        "No additional details were provided.".to_owned()
    } else {
        details.join("\n")
    };

    Embed::new()
        .color(DEFAULT_EMBED_COLOR)
        .title(format!(
            "You have been {} in {}",
            action_past_tense, guild_name
        ))
        .description(description)
}

/// Tell the target what happened. Users with closed DMs are only logged.
pub async fn send_moderation_target_dm(
    invocation: &Invocation<'_>,
    target: &Target,
    action_past_tense: &str,
    reason: Option<&str>,
    duration: Option<&str>,
) {
    let embed = moderation_target_dm_embed(
        &invocation.data.channels.guild_name,
        action_past_tense,
        reason,
        duration,
    );

    if let Err(source) = invocation
        .gateway
        .send_private(target.user_id, "", Some(embed))
        .await
    {
        warn!(?source, user = %target.user_id, "failed to notify moderation target");
    }
}

pub fn moderation_self_action_message(action: &str) -> String {
    format!("You can't {action} yourself.")
}

pub fn moderation_failed_message(action: &str) -> String {
    format!("I couldn't {action} that user. Check role hierarchy and permissions.")
}
