use boldbash_core::{Access, Argument, BoxFuture, Command, Invocation, Outcome};
use boldbash_database::impls::warnings::warnings_for;
use boldbash_database::model::warnings::WarningRecord;
use boldbash_utils::embed::info_embed;
use boldbash_utils::formatting::sanitize_mentions;

use crate::moderation::embeds::resolve_target;

pub const META: Command = Command {
    name: "warnings",
    description: "List the warnings a user has received.",
    category: "moderation",
    arguments: &[Argument::required("user", "The user to look up.")],
    access: Access::Staff,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(warnings(invocation, args))
}

pub async fn warnings(invocation: &Invocation<'_>, args: &[String]) -> Outcome {
    let Some(raw_user) = args.first() else {
        return invocation
            .fail(&format!("Usage: `{}`", META.usage(invocation.prefix())))
            .await;
    };
    let Some(target) = resolve_target(invocation, raw_user).await else {
        return Outcome::Failure;
    };

    let entries = warnings_for(&invocation.data.db, target.user_id.get()).await;
    let name = sanitize_mentions(&target.display_name);
    if entries.is_empty() {
        invocation.say(&format!("{} has no warnings.", name)).await;
        return Outcome::Success;
    }

    invocation
        .say_embed(
            "",
            info_embed(format!("Warnings for {}", name), warning_lines(&entries)),
        )
        .await;
    Outcome::Success
}

fn warning_lines(entries: &[WarningRecord]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            format!(
                "`#{}` <t:{}:d> {} (by <@{}>)",
                index + 1,
                entry.warned_at,
                sanitize_mentions(&entry.reason),
                entry.moderator_id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
