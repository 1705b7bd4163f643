use tracing::error;

use boldbash_core::{Access, Argument, BoxFuture, Command, Invocation, Outcome};
use boldbash_database::impls::quotes::add_quote;
use boldbash_utils::time::now_unix_secs;

pub const META: Command = Command {
    name: "addquote",
    description: "Adds a quote to the list of quotes.",
    category: "utility",
    arguments: &[
        Argument::required("quote", "The quote, in double quotes."),
        Argument::required("author", "Who said it."),
    ],
    access: Access::Staff,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(addquote(invocation, args))
}

pub async fn addquote(invocation: &Invocation<'_>, args: &[String]) -> Outcome {
    let [text, author] = args else {
        return invocation
            .fail(&format!("Usage: `{}`", META.usage(invocation.prefix())))
            .await;
    };

    match add_quote(
        &invocation.data.db,
        text,
        author,
        invocation.author.user_id.get(),
        now_unix_secs(),
    )
    .await
    {
        Ok(number) => {
            invocation.say(&format!("Added quote #{}.", number)).await;
            Outcome::Success
        }
        Err(source) => {
            error!(?source, "failed to save quote");
            invocation.fail("Failed to save the quote.").await
        }
    }
}

#[cfg(test)]
mod tests {
    use boldbash_core::Outcome;
    use boldbash_core::testing::{RecordingGateway, member, staff};
    use boldbash_database::impls::quotes::{quote, quote_count};

    use crate::test_support::{run, setup};

    #[tokio::test]
    async fn staff_can_add_quotes() {
        let (_dir, data) = setup().await;
        let gateway = RecordingGateway::new();

        let outcomes = run(
            &data,
            &gateway,
            staff(2, "mod"),
            ".addquote \"never deploy on a friday\" ops",
        )
        .await;
        assert_eq!(outcomes, vec![Outcome::Success]);
        assert_eq!(gateway.sent_texts(), vec!["Added quote #1.".to_owned()]);

        let stored = quote(&data.db, 1).await.unwrap();
        assert_eq!(stored.text, "never deploy on a friday");
        assert_eq!(stored.author, "ops");
        assert_eq!(stored.added_by, 2);
    }

    #[tokio::test]
    async fn members_cannot_add_quotes() {
        let (_dir, data) = setup().await;
        let gateway = RecordingGateway::new();

        let outcomes = run(&data, &gateway, member(5, "someone"), ".addquote \"hi\" me").await;
        assert_eq!(outcomes, vec![Outcome::Failure]);
        assert_eq!(quote_count(&data.db).await, 0);
    }
}
