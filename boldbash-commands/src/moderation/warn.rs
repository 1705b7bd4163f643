use tracing::error;

use boldbash_core::{Access, Argument, BoxFuture, Command, Invocation, Outcome};
use boldbash_database::impls::warnings::record_warning;
use boldbash_utils::time::now_unix_secs;

use crate::moderation::embeds::{
    NO_REASON, moderation_action_embed, moderation_self_action_message, resolve_target,
    send_moderation_target_dm,
};

pub const META: Command = Command {
    name: "warn",
    description: "Issue a warning to a user.",
    category: "moderation",
    arguments: &[
        Argument::required("user", "The user to warn."),
        Argument::optional("reason", "Reason for the warning."),
    ],
    access: Access::Staff,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(warn(invocation, args))
}

pub async fn warn(invocation: &Invocation<'_>, args: &[String]) -> Outcome {
    let Some(raw_user) = args.first() else {
        return invocation
            .fail(&format!("Usage: `{}`", META.usage(invocation.prefix())))
            .await;
    };
    let Some(target) = resolve_target(invocation, raw_user).await else {
        return Outcome::Failure;
    };

    if target.user_id == invocation.author.user_id {
        return invocation.fail(&moderation_self_action_message("warn")).await;
    }

    let reason = args.get(1).map(String::as_str).unwrap_or(NO_REASON);
    let warning = match record_warning(
        &invocation.data.db,
        target.user_id.get(),
        &target.display_name,
        invocation.author.user_id.get(),
        reason,
        now_unix_secs(),
    )
    .await
    {
        Ok(warning) => warning,
        Err(source) => {
            error!(?source, "failed to save warning");
            return invocation.fail("Failed to save the warning.").await;
        }
    };
    invocation.data.stats.record_warning();

    send_moderation_target_dm(invocation, &target, "warned", Some(reason), None).await;

    let action = format!("warned #{}", warning.warn_number);
    invocation
        .say_embed("", moderation_action_embed(&target, &action, Some(reason), None))
        .await;
    Outcome::Success
}

#[cfg(test)]
mod tests {
    use boldbash_core::Outcome;
    use boldbash_core::testing::{Delivery, RecordingGateway, staff};
    use boldbash_database::impls::warnings::warnings_for;

    use crate::test_support::{run, setup};

    #[tokio::test]
    async fn records_numbered_warnings_and_notifies() {
        let (_dir, data) = setup().await;
        let gateway = RecordingGateway::new().with_user(42, "spammer");

        let outcomes = run(
            &data,
            &gateway,
            staff(2, "mod"),
            ".warn <@42> \"posting links\" && .warn 42",
        )
        .await;
        assert_eq!(outcomes, vec![Outcome::Success, Outcome::Success]);

        let stored = warnings_for(&data.db, 42).await;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].reason, "posting links");
        assert_eq!(stored[0].username, "spammer");
        assert_eq!(stored[1].reason, "No reason provided");
        assert_eq!(data.stats.snapshot().warnings, 2);

        let titles: Vec<String> = gateway
            .deliveries()
            .into_iter()
            .filter_map(|delivery| match delivery {
                Delivery::Sent { embed: Some(embed), .. } => embed.title,
                _ => None,
            })
            .collect();
        assert_eq!(
            titles,
            vec!["spammer has been warned #1".to_owned(), "spammer has been warned #2".to_owned()]
        );
        assert!(gateway
            .deliveries()
            .iter()
            .any(|delivery| matches!(delivery, Delivery::Private { user, .. } if user.get() == 42)));
    }

    #[tokio::test]
    async fn rejects_bad_targets() {
        let (_dir, data) = setup().await;
        let gateway = RecordingGateway::new();

        let outcomes = run(&data, &gateway, staff(2, "mod"), ".warn someone && .warn 1").await;
        assert_eq!(outcomes, vec![Outcome::Failure]);
        assert_eq!(gateway.error_notices()[0], "`someone` is not a user mention or id.");

        let outcomes = run(&data, &gateway, staff(2, "mod"), ".warn <@2>").await;
        assert_eq!(outcomes, vec![Outcome::Failure]);
        assert!(warnings_for(&data.db, 2).await.is_empty());
    }
}
