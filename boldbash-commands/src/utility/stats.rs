use boldbash_core::{Access, BoxFuture, Command, Invocation, Outcome};
use boldbash_utils::embed::info_embed;

use crate::utility::embeds::stats_description;

pub const META: Command = Command {
    name: "stats",
    description: "Shows today's join, leave and warning counts.",
    category: "utility",
    arguments: &[],
    access: Access::Staff,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, _args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(stats(invocation))
}

pub async fn stats(invocation: &Invocation<'_>) -> Outcome {
    let snapshot = invocation.data.stats.snapshot();
    invocation
        .say_embed("", info_embed("Today's stats", stats_description(snapshot)))
        .await;
    Outcome::Success
}
