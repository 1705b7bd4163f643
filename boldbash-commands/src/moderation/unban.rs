use tracing::{error, warn};

use boldbash_core::{Access, Argument, BoxFuture, Command, Invocation, Outcome};
use boldbash_database::impls::bans::{active_ban, clear_active_bans};

use crate::moderation::embeds::{moderation_action_embed, moderation_failed_message, resolve_target};

pub const META: Command = Command {
    name: "unban",
    description: "Lift a user's ban.",
    category: "moderation",
    arguments: &[Argument::required("user", "The user to unban.")],
    access: Access::Staff,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(unban(invocation, args))
}

pub async fn unban(invocation: &Invocation<'_>, args: &[String]) -> Outcome {
    let Some(raw_user) = args.first() else {
        return invocation
            .fail(&format!("Usage: `{}`", META.usage(invocation.prefix())))
            .await;
    };
    let Some(mut target) = resolve_target(invocation, raw_user).await else {
        return Outcome::Failure;
    };

    let db = &invocation.data.db;
    if let Some(record) = active_ban(db, target.user_id.get()).await {
        target.display_name = record.username;
    }

    if let Err(source) = invocation
        .gateway
        .unban(invocation.data.guild_id(), target.user_id)
        .await
    {
        error!(?source, "unban request failed");
        invocation.error(&moderation_failed_message("unban")).await;
        return Outcome::Success;
    }

    if let Err(source) = clear_active_bans(db, target.user_id.get()).await {
        warn!(?source, user = %target.user_id, "failed to clear ban records");
    }

    invocation
        .say_embed("", moderation_action_embed(&target, "unbanned", None, None))
        .await;
    Outcome::Success
}

#[cfg(test)]
mod tests {
    use boldbash_core::Outcome;
    use boldbash_core::testing::{Delivery, RecordingGateway, staff};
    use boldbash_database::impls::bans::{NewBan, active_ban, record_ban};

    use crate::test_support::{run, setup};

    #[tokio::test]
    async fn unban_clears_scheduled_release() {
        let (_dir, data) = setup().await;
        record_ban(
            &data.db,
            NewBan {
                user_id: 42,
                username: "spammer",
                reason: "spam",
                moderator_id: 2,
                banned_at: 0,
                duration_seconds: Some(60),
            },
        )
        .await
        .unwrap();
        let gateway = RecordingGateway::new();

        assert_eq!(run(&data, &gateway, staff(2, "mod"), ".unban 42").await, vec![Outcome::Success]);
        assert!(active_ban(&data.db, 42).await.is_none());

        let deliveries = gateway.deliveries();
        assert_eq!(deliveries[0], Delivery::Unbanned(poise::serenity_prelude::UserId::new(42)));
        let Delivery::Sent { embed: Some(embed), .. } = &deliveries[1] else {
            panic!("expected an unban embed");
        };
        assert_eq!(embed.title.as_deref(), Some("spammer has been unbanned"));
    }

    #[tokio::test]
    async fn refused_unban_keeps_the_record() {
        let (_dir, data) = setup().await;
        record_ban(
            &data.db,
            NewBan {
                user_id: 42,
                username: "spammer",
                reason: "spam",
                moderator_id: 2,
                banned_at: 0,
                duration_seconds: None,
            },
        )
        .await
        .unwrap();
        let gateway = RecordingGateway::new().failing_for(42);

        let outcomes = run(&data, &gateway, staff(2, "mod"), ".unban 42 && .ping").await;
        assert_eq!(outcomes, vec![Outcome::Success, Outcome::Success]);
        assert!(active_ban(&data.db, 42).await.is_some());
        assert_eq!(
            gateway.error_notices(),
            vec!["I couldn't unban that user. Check role hierarchy and permissions.".to_owned()]
        );
    }
}
