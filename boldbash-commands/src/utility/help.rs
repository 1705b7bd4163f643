use tracing::warn;

use boldbash_core::{Command, Invocation, Outcome};

use crate::utility::embeds::{grouped_help_description, help_embed};

pub const PUBLIC_REPLY: &str = "private messaging bot help to you.";
pub const PRIVATE_TEXT: &str = "Here's the help for this bot:";

/// Built-in `help`: lists every command the author may run, privately.
///
/// Never looked up in the registry and always succeeds. The invoking message
/// is removed once the help arrived, unless later statements still follow.
pub async fn send_help(invocation: &Invocation<'_>) -> Outcome {
    invocation.reply(PUBLIC_REPLY).await;

    let embed = help_embed(grouped_help_description(&sorted_commands(invocation)));
    match invocation
        .gateway
        .send_private(invocation.author.user_id, PRIVATE_TEXT, Some(embed))
        .await
    {
        Ok(()) if invocation.is_final => invocation.delete_invoking_message().await,
        Ok(()) => {}
        Err(source) => warn!(?source, user = %invocation.author.user_id, "failed to deliver help"),
    }

    Outcome::Success
}

fn sorted_commands<'a>(invocation: &'a Invocation<'a>) -> Vec<&'a Command> {
    let mut commands: Vec<&Command> = invocation
        .data
        .registry
        .list_executable(invocation.author)
        .collect();

    commands.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    commands
}
