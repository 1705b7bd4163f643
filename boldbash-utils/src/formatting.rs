/// Width of the channel and username columns in the message log.
pub const MESSAGE_LOG_COLUMN_WIDTH: usize = 12;

/// Pad `value` with spaces to exactly `width` characters, truncating longer values.
pub fn pad_field(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count < width {
        format!("{}{}", value, " ".repeat(width - count))
    } else {
        value.chars().take(width).collect()
    }
}

/// Format one message log line, e.g. `[#general    ] someone      (1234): hi`.
pub fn format_message_log_line(
    channel_label: &str,
    username: &str,
    user_id: u64,
    content: &str,
) -> String {
    format!(
        "[{}] {} ({}): {}",
        pad_field(channel_label, MESSAGE_LOG_COLUMN_WIDTH),
        pad_field(username, MESSAGE_LOG_COLUMN_WIDTH),
        user_id,
        content
    )
}

/// Render a user mention.
pub fn mention(user_id: u64) -> String {
    format!("<@{}>", user_id)
}

/// Neutralise mentions in user supplied text before echoing it back.
pub fn sanitize_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

/// Format seconds into a compact human-readable duration (e.g. 59s, 1m, 1h, 1d, 1h 30m).
pub fn format_compact_duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        return if hours > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}d", days)
        };
    }

    if hours > 0 {
        let mut parts = vec![format!("{}h", hours)];
        if minutes > 0 {
            parts.push(format!("{}m", minutes));
        }
        if seconds > 0 {
            parts.push(format!("{}s", seconds));
        }
        return parts.join(" ");
    }

    if minutes > 0 {
        return if seconds > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}m", minutes)
        };
    }

    format!("{}s", seconds)
}
