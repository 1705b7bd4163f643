use tracing::error;

use boldbash_core::{Access, Argument, BoxFuture, Command, Invocation, Outcome};

use crate::moderation::embeds::{
    NO_REASON, moderation_action_embed, moderation_failed_message, moderation_self_action_message,
    resolve_target, send_moderation_target_dm,
};

pub const META: Command = Command {
    name: "kick",
    description: "Kick a user from the server.",
    category: "moderation",
    arguments: &[
        Argument::required("user", "The user to kick."),
        Argument::optional("reason", "Reason for the kick."),
    ],
    access: Access::Staff,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(kick(invocation, args))
}

pub async fn kick(invocation: &Invocation<'_>, args: &[String]) -> Outcome {
    let Some(raw_user) = args.first() else {
        return invocation
            .fail(&format!("Usage: `{}`", META.usage(invocation.prefix())))
            .await;
    };
    let Some(target) = resolve_target(invocation, raw_user).await else {
        return Outcome::Failure;
    };

    if target.user_id == invocation.author.user_id {
        return invocation.fail(&moderation_self_action_message("kick")).await;
    }

    let reason = args.get(1).map(String::as_str);

    // DM before the kick; afterwards the user may share no server with the bot.
    send_moderation_target_dm(invocation, &target, "kicked", reason, None).await;

    if let Err(source) = invocation
        .gateway
        .kick(invocation.data.guild_id(), target.user_id, reason.unwrap_or(NO_REASON))
        .await
    {
        error!(?source, "kick request failed");
        invocation.error(&moderation_failed_message("kick")).await;
        return Outcome::Success;
    }

    invocation
        .say_embed("", moderation_action_embed(&target, "kicked", reason, None))
        .await;
    Outcome::Success
}

#[cfg(test)]
mod tests {
    use boldbash_core::Outcome;
    use boldbash_core::testing::{Delivery, RecordingGateway, staff};

    use crate::test_support::{run, setup};

    #[tokio::test]
    async fn kicks_with_reason() {
        let (_dir, data) = setup().await;
        let gateway = RecordingGateway::new().with_user(42, "spammer");

        let outcomes = run(&data, &gateway, staff(2, "mod"), ".kick 42 \"calm down\"").await;
        assert_eq!(outcomes, vec![Outcome::Success]);
        assert!(gateway.deliveries().contains(&Delivery::Kicked {
            user: poise::serenity_prelude::UserId::new(42),
            reason: "calm down".to_owned(),
        }));
    }

    #[tokio::test]
    async fn refused_kick_is_reported_and_the_chain_continues() {
        let (_dir, data) = setup().await;
        let gateway = RecordingGateway::new().failing_for(42);

        let outcomes = run(&data, &gateway, staff(2, "mod"), ".kick 42 && .ping").await;
        assert_eq!(outcomes, vec![Outcome::Success, Outcome::Success]);
        assert_eq!(
            gateway.error_notices(),
            vec!["I couldn't kick that user. Check role hierarchy and permissions.".to_owned()]
        );
        assert_eq!(gateway.sent_texts(), vec!["Pong!".to_owned()]);
    }
}
