use boldbash_core::{Access, BoxFuture, Command, Invocation, Outcome};

pub const META: Command = Command {
    name: "ping",
    description: "Replies with Pong!",
    category: "utility",
    arguments: &[],
    access: Access::Everyone,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, _args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(ping(invocation))
}

pub async fn ping(invocation: &Invocation<'_>) -> Outcome {
    invocation.say("Pong!").await;
    Outcome::Success
}

#[cfg(test)]
mod tests {
    use boldbash_core::Outcome;
    use boldbash_core::testing::{RecordingGateway, member};

    use crate::test_support::{run, setup};

    #[tokio::test]
    async fn replies_with_pong() {
        let (_dir, data) = setup().await;
        let gateway = RecordingGateway::new();

        assert_eq!(run(&data, &gateway, member(5, "someone"), ".ping").await, vec![Outcome::Success]);
        assert_eq!(gateway.sent_texts(), vec!["Pong!".to_owned()]);
    }
}
