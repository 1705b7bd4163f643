use boldbash_core::registry::HELP_COMMAND;
use boldbash_core::{Access, Argument, BoxFuture, Command, Invocation, Outcome};

use crate::utility::embeds::unknown_command_message;

pub const META: Command = Command {
    name: "usage",
    description: "Show usage syntax for a specific command.",
    category: "utility",
    arguments: &[Argument::required("command", "The command to describe.")],
    access: Access::Everyone,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(usage(invocation, args))
}

pub async fn usage(invocation: &Invocation<'_>, args: &[String]) -> Outcome {
    let prefix = invocation.prefix();
    let Some(raw_name) = args.first() else {
        return invocation.fail(&format!("Usage: `{}`", META.usage(prefix))).await;
    };

    let lookup = raw_name.trim().trim_start_matches(prefix).to_lowercase();

    if lookup == HELP_COMMAND {
        invocation.say(&format!("Usage: `{}{}`", prefix, HELP_COMMAND)).await;
        return Outcome::Success;
    }

    let Some(command) = invocation.data.registry.lookup(&lookup) else {
        return invocation.fail(&unknown_command_message(&lookup)).await;
    };

    invocation.say(&format!("Usage: `{}`", command.usage(prefix))).await;
    Outcome::Success
}
