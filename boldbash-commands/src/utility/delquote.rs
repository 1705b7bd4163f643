use tracing::error;

use boldbash_core::{Access, Argument, BoxFuture, Command, Invocation, Outcome};
use boldbash_database::impls::quotes::remove_quote;
use boldbash_utils::formatting::sanitize_mentions;
use boldbash_utils::parse::parse_position;

pub const META: Command = Command {
    name: "delquote",
    description: "Removes a quote. Later quotes move up by one.",
    category: "utility",
    arguments: &[Argument::required("number", "The number of the quote.")],
    access: Access::Staff,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(delquote(invocation, args))
}

pub async fn delquote(invocation: &Invocation<'_>, args: &[String]) -> Outcome {
    let Some(raw) = args.first() else {
        return invocation
            .fail(&format!("Usage: `{}`", META.usage(invocation.prefix())))
            .await;
    };

    let Some(number) = parse_position(raw) else {
        return invocation
            .fail(&format!("`{}` is not a quote number.", sanitize_mentions(raw)))
            .await;
    };

    match remove_quote(&invocation.data.db, number).await {
        Ok(Some(_)) => {
            invocation.say(&format!("Removed quote #{}.", number)).await;
            Outcome::Success
        }
        Ok(None) => invocation.fail("That quote does not exist.").await,
        Err(source) => {
            error!(?source, "failed to save quotes");
            invocation.fail("Failed to save the quotes.").await
        }
    }
}
