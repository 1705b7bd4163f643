use tracing::{error, info};

use boldbash_core::{Access, Argument, BoxFuture, Command, Invocation, Outcome};
use boldbash_database::impls::warnings::clear_warnings;
use boldbash_utils::formatting::sanitize_mentions;

use crate::moderation::embeds::resolve_target;

pub const META: Command = Command {
    name: "clearwarnings",
    description: "Remove every warning a user has received.",
    category: "moderation",
    arguments: &[Argument::required("user", "The user to clear.")],
    access: Access::Staff,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(clearwarnings(invocation, args))
}

pub async fn clearwarnings(invocation: &Invocation<'_>, args: &[String]) -> Outcome {
    let Some(raw_user) = args.first() else {
        return invocation
            .fail(&format!("Usage: `{}`", META.usage(invocation.prefix())))
            .await;
    };
    let Some(target) = resolve_target(invocation, raw_user).await else {
        return Outcome::Failure;
    };

    let removed = match clear_warnings(&invocation.data.db, target.user_id.get()).await {
        Ok(removed) => removed,
        Err(source) => {
            error!(?source, "failed to save warnings");
            return invocation.fail("Failed to save the warnings.").await;
        }
    };

    info!(
        user = %target.user_id,
        moderator = %invocation.author.user_id,
        removed,
        "cleared warnings"
    );
    invocation
        .say(&format!(
            "Cleared {} warning(s) for {}.",
            removed,
            sanitize_mentions(&target.display_name)
        ))
        .await;
    Outcome::Success
}

#[cfg(test)]
mod tests {
    use boldbash_core::Outcome;
    use boldbash_core::testing::{RecordingGateway, staff};
    use boldbash_database::impls::warnings::{record_warning, warnings_for};

    use crate::test_support::{run, setup};

    #[tokio::test]
    async fn clears_only_the_target() {
        let (_dir, data) = setup().await;
        record_warning(&data.db, 42, "spammer", 2, "links", 100).await.unwrap();
        record_warning(&data.db, 43, "other", 2, "caps", 100).await.unwrap();
        let gateway = RecordingGateway::new().with_user(42, "spammer");

        let outcomes = run(&data, &gateway, staff(2, "mod"), ".clearwarnings <@42>").await;
        assert_eq!(outcomes, vec![Outcome::Success]);
        assert_eq!(gateway.sent_texts(), vec!["Cleared 1 warning(s) for spammer.".to_owned()]);
        assert!(warnings_for(&data.db, 42).await.is_empty());
        assert_eq!(warnings_for(&data.db, 43).await.len(), 1);
    }
}
