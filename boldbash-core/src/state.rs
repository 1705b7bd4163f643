use std::sync::atomic::{AtomicU64, Ordering};

use poise::serenity_prelude as serenity;

/// Channel handles resolved at startup.
#[derive(Clone, Debug)]
pub struct Channels {
    pub guild_id: serenity::GuildId,
    pub guild_name: String,
    pub log: serenity::ChannelId,
    pub showcase: serenity::ChannelId,
    pub verification: serenity::ChannelId,
}

/// Counters reported and reset by the nightly job.
#[derive(Debug, Default)]
pub struct DailyStats {
    joins: AtomicU64,
    leaves: AtomicU64,
    warnings: AtomicU64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub joins: u64,
    pub leaves: u64,
    pub warnings: u64,
}

impl DailyStats {
    pub fn record_join(&self) {
        self.joins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_leave(&self) {
        self.leaves.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_warning(&self) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            joins: self.joins.load(Ordering::Relaxed),
            leaves: self.leaves.load(Ordering::Relaxed),
            warnings: self.warnings.load(Ordering::Relaxed),
        }
    }

    /// Return the current counters and reset them to zero.
    pub fn take(&self) -> StatsSnapshot {
        StatsSnapshot {
            joins: self.joins.swap(0, Ordering::Relaxed),
            leaves: self.leaves.swap(0, Ordering::Relaxed),
            warnings: self.warnings.swap(0, Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DailyStats, StatsSnapshot};

    #[test]
    fn take_resets_counters() {
        let stats = DailyStats::default();
        stats.record_join();
        stats.record_join();
        stats.record_leave();
        stats.record_warning();

        let expected = StatsSnapshot {
            joins: 2,
            leaves: 1,
            warnings: 1,
        };
        assert_eq!(stats.snapshot(), expected);
        assert_eq!(stats.take(), expected);
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }
}
