use tracing::{error, info, warn};

use boldbash_core::{Access, Argument, BoxFuture, Command, Invocation, Outcome};

pub const META: Command = Command {
    name: "verify",
    description: "Verify yourself with the code from the rules to unlock the server.",
    category: "verification",
    arguments: &[Argument::required("code", "The verification code.")],
    access: Access::Everyone,
    execute,
};

fn execute<'a>(invocation: &'a Invocation<'a>, args: &'a [String]) -> BoxFuture<'a, Outcome> {
    Box::pin(verify(invocation, args))
}

pub async fn verify(invocation: &Invocation<'_>, args: &[String]) -> Outcome {
    // The code must not stay visible in the channel.
    if invocation.is_final {
        invocation.delete_invoking_message().await;
    }

    let config = &invocation.data.config;
    let (Some(role), Some(expected)) = (config.verified_role_id, config.verification_code.as_deref())
    else {
        warn!("verify used without VERIFIED_ROLE_ID and VERIFICATION_CODE configured");
        return invocation.fail("Verification is not set up on this server.").await;
    };

    let Some(code) = args.first() else {
        return invocation
            .fail(&format!("Usage: `{}`", META.usage(invocation.prefix())))
            .await;
    };

    if code.trim() != expected {
        info!(user = %invocation.author.user_id, "wrong verification code");
        return invocation.fail("That verification code is not correct.").await;
    }

    let user = invocation.author.user_id;
    if let Err(source) = invocation
        .gateway
        .add_role(invocation.data.guild_id(), user, role)
        .await
    {
        error!(?source, %user, "failed to grant verified role");
        invocation
            .error("I couldn't verify you. Please contact a moderator.")
            .await;
        return Outcome::Success;
    }

    info!(%user, "user verified");
    let welcome = format!(
        "You have been verified in **{}**. Welcome!",
        invocation.data.channels.guild_name
    );
    if let Err(source) = invocation.gateway.send_private(user, &welcome, None).await {
        warn!(?source, %user, "failed to send verification welcome");
    }

    Outcome::Success
}
