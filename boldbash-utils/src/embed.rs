use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x2e_34_36;

/// Color for error notices.
pub const ERROR_EMBED_COLOR: u32 = 0xd9_3f_3f;

/// Transport-agnostic embed. Converted to a serenity builder only at the
/// gateway boundary so commands can be exercised without a Discord client.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub color: Option<u32>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn into_create_embed(self) -> serenity::CreateEmbed {
        let mut builder = serenity::CreateEmbed::new()
            .color(self.color.unwrap_or(DEFAULT_EMBED_COLOR));

        if let Some(title) = self.title {
            builder = builder.title(title);
        }
        if let Some(description) = self.description {
            builder = builder.description(description);
        }
        if let Some(url) = self.url {
            builder = builder.url(url);
        }
        if let Some(image) = self.image {
            builder = builder.image(image);
        }

        builder
    }
}

/// Standard error notice posted back into the invoking channel.
pub fn error_embed(message: impl Into<String>) -> Embed {
    Embed::new()
        .title("Error")
        .description(message)
        .color(ERROR_EMBED_COLOR)
}

/// Standard informational embed for the log channel.
pub fn info_embed(title: impl Into<String>, message: impl Into<String>) -> Embed {
    Embed::new()
        .title(title)
        .description(message)
        .color(DEFAULT_EMBED_COLOR)
}
