use poise::serenity_prelude as serenity;
use tracing::debug;

use boldbash_core::Data;

pub fn handle_member_join(data: &Data, member: &serenity::Member) {
    if member.guild_id != data.guild_id() {
        return;
    }
    debug!(user = %member.user.id, "member joined");
    data.stats.record_join();
}

pub fn handle_member_leave(data: &Data, guild_id: serenity::GuildId, user: &serenity::User) {
    if guild_id != data.guild_id() {
        return;
    }
    debug!(user = %user.id, "member left");
    data.stats.record_leave();
}
