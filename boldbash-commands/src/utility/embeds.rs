use boldbash_core::Command;
use boldbash_core::StatsSnapshot;
use boldbash_database::model::quotes::Quote;
use boldbash_utils::embed::{DEFAULT_EMBED_COLOR, Embed};
use boldbash_utils::formatting::sanitize_mentions;

/// Help text for `commands`, grouped under a bold heading per category.
///
/// Expects `commands` sorted by category.
pub fn grouped_help_description(commands: &[&Command]) -> String {
    let mut out = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("**{}**\n", display_category(command.category)));
            current_category = Some(command.category);
        }

        out.push_str(&format!("`{}`: {}\n", command.name, command.description));
    }

    if out.is_empty() {
        out.push_str("No commands available.");
    }

    out.trim_end().to_owned()
}

pub fn help_embed(description: String) -> Embed {
    Embed::new()
        .title("Bold and Bash Help")
        .description(description)
        .color(DEFAULT_EMBED_COLOR)
}

pub fn quote_embed(number: usize, quote: &Quote) -> Embed {
    Embed::new()
        .title(format!("Quote #{}", number))
        .description(format!(
            "\"{}\"\n- {}",
            sanitize_mentions(&quote.text),
            sanitize_mentions(&quote.author)
        ))
        .color(DEFAULT_EMBED_COLOR)
}

pub fn stats_description(stats: StatsSnapshot) -> String {
    format!(
        "**Joins :** {}\n**Leaves :** {}\n**Warnings :** {}",
        stats.joins, stats.leaves, stats.warnings
    )
}

pub fn unknown_command_message(name: &str) -> String {
    format!("Unknown command: `{}`", name)
}

fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{grouped_help_description, stats_description};
    use boldbash_core::{Access, BoxFuture, Command, Invocation, Outcome, StatsSnapshot};

    fn noop<'a>(_invocation: &'a Invocation<'a>, _args: &'a [String]) -> BoxFuture<'a, Outcome> {
        Box::pin(async { Outcome::Success })
    }

    fn command(name: &'static str, category: &'static str) -> Command {
        Command {
            name,
            description: "does things",
            category,
            arguments: &[],
            access: Access::Everyone,
            execute: noop,
        }
    }

    #[test]
    fn groups_commands_under_category_headings() {
        let ban = command("ban", "moderation");
        let ping = command("ping", "utility");
        let quote = command("quote", "utility");

        let description = grouped_help_description(&[&ban, &ping, &quote]);
        assert_eq!(
            description,
            "**Moderation**\n`ban`: does things\n\n**Utility**\n`ping`: does things\n`quote`: does things"
        );
    }

    #[test]
    fn empty_help_says_so() {
        assert_eq!(grouped_help_description(&[]), "No commands available.");
    }

    #[test]
    fn stats_lists_every_counter() {
        let text = stats_description(StatsSnapshot {
            joins: 3,
            leaves: 1,
            warnings: 0,
        });
        assert!(text.contains("**Joins :** 3"));
        assert!(text.contains("**Leaves :** 1"));
        assert!(text.contains("**Warnings :** 0"));
    }
}
