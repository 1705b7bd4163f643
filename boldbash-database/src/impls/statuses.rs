use rand::seq::IndexedRandom;

use crate::database::Database;

/// Pick one of the configured playing statuses at random.
pub fn random_playing_status(db: &Database) -> Option<&str> {
    db.playing_statuses()
        .choose(&mut rand::rng())
        .map(String::as_str)
}
