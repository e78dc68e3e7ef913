//! XP rewards and level math.

pub const LOG_OUTFIT: u64 = 100;
pub const COMPLETE_QUEST: u64 = 150;
pub const LAUNDRY_ITEM: u64 = 10;
pub const LAUNDRY_MAX: u64 = 100;
/// Granted for cataloguing a new item and for buying one off the wishlist.
pub const ADD_ITEM: u64 = 50;
pub const WISHLIST_ADD: u64 = 10;

pub const XP_PER_LEVEL: u64 = 1000;

/// XP for washing `dirty` items, capped at [`LAUNDRY_MAX`].
pub fn laundry_xp(dirty: usize) -> u64 {
    (dirty as u64)
        .saturating_mul(LAUNDRY_ITEM)
        .min(LAUNDRY_MAX)
}

/// Level for a given XP total, starting at 1.
pub fn level_for(xp: u64) -> u64 {
    xp / XP_PER_LEVEL + 1
}

/// XP earned inside the current level.
pub fn level_progress(xp: u64) -> u64 {
    xp % XP_PER_LEVEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laundry_xp_is_capped() {
        assert_eq!(laundry_xp(0), 0);
        assert_eq!(laundry_xp(2), 2 * LAUNDRY_ITEM);
        assert_eq!(laundry_xp(500), LAUNDRY_MAX);
    }

    #[test]
    fn levels_start_at_one() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(999), 1);
        assert_eq!(level_for(1000), 2);
        assert_eq!(level_progress(1250), 250);
    }
}
