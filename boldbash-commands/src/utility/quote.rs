use boldbash_core::{Access, Argument, BoxFuture, Command, Invocation, Outcome};
use boldbash_database::impls::quotes::{quote as stored_quote, random_quote};
use boldbash_utils::formatting::sanitize_mentions;
use boldbash_utils::parse::parse_position;

use crate::utility::embeds::quote_embed;

pub const META: Command = Command {
    name: "quote",
    description: "Posts a random quote, or the quote with the given number.",
    category: "utility",
    arguments: &[Argument::optional("number", "The number of the quote.")],
    access: Access::Everyone,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(quote(invocation, args))
}

pub async fn quote(invocation: &Invocation<'_>, args: &[String]) -> Outcome {
    let db = &invocation.data.db;

    let picked = match args.first() {
        Some(raw) => {
            let Some(number) = parse_position(raw) else {
                return invocation
                    .fail(&format!("`{}` is not a quote number.", sanitize_mentions(raw)))
                    .await;
            };
            stored_quote(db, number).await.map(|quote| (number, quote))
        }
        None => random_quote(db).await,
    };

    let Some((number, quote)) = picked else {
        let message = match args.first() {
            Some(_) => "That quote does not exist.",
            None => "There are no quotes yet.",
        };
        return invocation.fail(message).await;
    };

    invocation.say_embed("", quote_embed(number, &quote)).await;
    Outcome::Success
}

#[cfg(test)]
mod tests {
    use boldbash_core::Outcome;
    use boldbash_core::testing::{Delivery, RecordingGateway, member};
    use boldbash_database::impls::quotes::add_quote;

    use crate::test_support::{run, setup};

    #[tokio::test]
    async fn posts_numbered_quote() {
        let (_dir, data) = setup().await;
        add_quote(&data.db, "it works on my machine", "someone", 1, 0).await.unwrap();
        add_quote(&data.db, "ship it", "someone else", 1, 0).await.unwrap();
        let gateway = RecordingGateway::new();

        let outcomes = run(&data, &gateway, member(5, "reader"), ".quote #2").await;
        assert_eq!(outcomes, vec![Outcome::Success]);

        let deliveries = gateway.deliveries();
        let Delivery::Sent { embed: Some(embed), .. } = &deliveries[0] else {
            panic!("expected a quote embed");
        };
        assert_eq!(embed.title.as_deref(), Some("Quote #2"));
        assert_eq!(embed.description.as_deref(), Some("\"ship it\"\n- someone else"));
    }

    #[tokio::test]
    async fn missing_quotes_fail() {
        let (_dir, data) = setup().await;
        let gateway = RecordingGateway::new();

        assert_eq!(run(&data, &gateway, member(5, "reader"), ".quote").await, vec![Outcome::Failure]);
        assert_eq!(run(&data, &gateway, member(5, "reader"), ".quote 3").await, vec![Outcome::Failure]);
        assert_eq!(
            gateway.error_notices(),
            vec![
                "There are no quotes yet.".to_owned(),
                "That quote does not exist.".to_owned(),
            ]
        );
    }
}
