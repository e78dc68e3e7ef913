/// One-shot presentation cue produced by a transition.
///
/// Sounds, confetti and toasts are driven from these. They live only in a
/// transition's outbox and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OutfitLogged {
        xp: u64,
        earned_badge: Option<&'static str>,
    },
    QuestCompleted {
        xp: u64,
    },
    LaundryDone {
        count: usize,
        xp: u64,
    },
    ItemAdded {
        xp: u64,
    },
    WishlistAdded {
        xp: u64,
    },
    ItemPurchased {
        xp: u64,
    },
}

impl Effect {
    pub fn xp_earned(&self) -> u64 {
        match self {
            Self::OutfitLogged { xp, .. }
            | Self::QuestCompleted { xp }
            | Self::LaundryDone { xp, .. }
            | Self::ItemAdded { xp }
            | Self::WishlistAdded { xp }
            | Self::ItemPurchased { xp } => *xp,
        }
    }

    /// Human-readable origin, shown next to the XP toast.
    pub fn source(&self) -> &'static str {
        match self {
            Self::OutfitLogged { .. } => "Outfit Logged",
            Self::QuestCompleted { .. } => "Quest Completed",
            Self::LaundryDone { .. } => "Laundry Done",
            Self::ItemAdded { .. } => "New Item Added",
            Self::WishlistAdded { .. } => "Added to Wishlist",
            Self::ItemPurchased { .. } => "Item Purchased",
        }
    }

    /// Whether the view should play the level-up chime (if sound is on).
    pub fn plays_chime(&self) -> bool {
        matches!(self, Self::OutfitLogged { .. } | Self::QuestCompleted { .. })
    }

    /// Badge earned by this transition, for the celebration overlay.
    pub fn earned_badge(&self) -> Option<&'static str> {
        match self {
            Self::OutfitLogged { earned_badge, .. } => *earned_badge,
            _ => None,
        }
    }
}
