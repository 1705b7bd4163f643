use rand::Rng;
use tracing::error;

use boldbash_core::{Access, Argument, BoxFuture, Command, Invocation, Outcome};
use boldbash_utils::embed::Embed;
use boldbash_utils::formatting::mention;

pub const META: Command = Command {
    name: "showcase",
    description: "Posts a mod in the #mod-showcase channel.",
    category: "utility",
    arguments: &[
        Argument::required("name", "The name of the mod."),
        Argument::required("description", "The description of the mod."),
        Argument::required("picture", "The URL of a picture of the mod."),
        Argument::optional("url", "The URL of the download, or wiki page."),
    ],
    access: Access::Everyone,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(showcase(invocation, args))
}

pub async fn showcase(invocation: &Invocation<'_>, args: &[String]) -> Outcome {
    let [name, description, picture, rest @ ..] = args else {
        return invocation
            .fail(&format!("Usage: `{}`", META.usage(invocation.prefix())))
            .await;
    };

    let mut embed = Embed::new()
        .title(name)
        .description(description)
        .image(picture)
        .color(random_color());
    if let Some(url) = rest.first() {
        embed = embed.url(url);
    }

    let text = format!(
        "New mod update by {}:",
        mention(invocation.author.user_id.get())
    );
    let channel = invocation.data.channels.showcase;
    if let Err(source) = invocation.gateway.send(channel, &text, Some(embed)).await {
        error!(?source, "failed to post showcase");
        invocation.error(&format!("```css\n{}```", source)).await;
    }

    Outcome::Success
}

fn random_color() -> u32 {
    rand::rng().random_range(0..=0xFF_FF_FF)
}
