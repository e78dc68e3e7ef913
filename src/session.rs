//! The single owner of the aggregate.
//!
//! A [`Session`] is constructed once at startup and handed to whatever
//! presentation surface dispatches actions. It resolves clock and random
//! inputs, runs the reducer, writes changed slices back, and returns the
//! effect outbox to the caller. Nothing here is global.

use std::mem;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::advice::{self, AdviceProvider, WeatherSnapshot};
use crate::analytics;
use crate::backup::{self, Backup, BackupError};
use crate::clock::{Clock, SystemClock};
use crate::domain::sample::{sample_inventory, sample_wishlist};
use crate::domain::{
    CalendarDay, ChatMessage, ChatRole, ItemDraft, ItemPatch, ProfilePatch, SecureString,
    UserProfile, DEFAULT_QUESTS,
};
use crate::engine::{
    Action, Command, Effect, OutfitEntry, SliceUpdate, Update, VibeReducer, VibeState,
};
use crate::mvi::Reducer;
use crate::store::{hydrate, sync, write_all, HydrationReport, SliceStore};

/// Vibe scores are drawn uniformly from this range.
const VIBE_SCORE_RANGE: std::ops::RangeInclusive<u8> = 85..=94;

/// Construction options for a [`Session`].
pub struct SessionOptions {
    pub clock: Box<dyn Clock>,
    pub rng: StdRng,
    pub quest_pool: Vec<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            clock: Box::new(SystemClock),
            rng: StdRng::from_entropy(),
            quest_pool: DEFAULT_QUESTS.iter().map(|q| q.to_string()).collect(),
        }
    }
}

impl SessionOptions {
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replace the quest pool. An empty pool keeps the built-in quests.
    pub fn with_quest_pool(mut self, pool: Vec<String>) -> Self {
        if !pool.is_empty() {
            self.quest_pool = pool;
        }
        self
    }
}

pub struct Session<S: SliceStore> {
    state: VibeState,
    store: S,
    clock: Box<dyn Clock>,
    rng: StdRng,
    quest_pool: Vec<String>,
}

impl<S: SliceStore> Session<S> {
    /// Hydrate from `store` and rotate a stale daily quest.
    pub fn open(store: S, options: SessionOptions) -> (Self, HydrationReport) {
        let SessionOptions {
            clock,
            rng,
            quest_pool,
        } = options;

        let today = clock.today();
        let (state, report) = hydrate(&store, today, &quest_pool);
        for fallback in report.damaged() {
            warn!(slice = %fallback.slice, reason = %fallback.reason, "Loaded default for slice");
        }
        if report.is_first_run() {
            info!("No stored data found, starting fresh");
        }

        let mut session = Self {
            state,
            store,
            clock,
            rng,
            quest_pool,
        };
        session.check_quest();
        (session, report)
    }

    pub fn state(&self) -> &VibeState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn today(&self) -> CalendarDay {
        self.clock.today()
    }

    /// Apply one action, persist changed slices, and return its outbox.
    ///
    /// The state is committed before anything is written; write failures are
    /// logged and do not undo the transition.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let tag = action.tag();
        if matches!(action, Action::Unrecognized) {
            debug!("Ignoring unrecognized action");
        }

        let transition = VibeReducer::reduce(self.state.clone(), action);
        let prev = mem::replace(&mut self.state, transition.state);
        let report = sync(&self.store, &prev, &self.state);

        debug!(
            action = tag,
            written = report.written.len(),
            failed = report.failed.len(),
            effects = transition.effects.len(),
            "Dispatched action"
        );
        transition.effects
    }

    /// Resolve an external command into an action and dispatch it.
    pub fn execute(&mut self, command: Command) -> Vec<Effect> {
        match self.resolve(command) {
            Some(action) => self.dispatch(action),
            None => Vec::new(),
        }
    }

    /// Decode and execute one JSON command.
    pub fn execute_json(&mut self, raw: &str) -> serde_json::Result<Vec<Effect>> {
        let command = Command::parse(raw)?;
        Ok(self.execute(command))
    }

    fn resolve(&mut self, command: Command) -> Option<Action> {
        let action = match command {
            Command::LogOutfit { item_ids } => Action::LogOutfit(self.outfit_entry(item_ids)),
            Command::CompleteQuest => Action::CompleteQuest,
            Command::LaundryDay => Action::LaundryDay,
            Command::AddItem { item } => {
                Action::AddItem(item.into_wardrobe(new_id(), self.clock.now()))
            }
            Command::UpdateItem { id, updates } => Action::UpdateItem { id, patch: updates },
            Command::ToggleClean { id } => Action::ToggleClean(id),
            Command::DeleteItem { id } => Action::DeleteItem(id),
            Command::AddToWishlist { item } => {
                Action::AddToWishlist(item.into_wishlist(new_id(), self.clock.now()))
            }
            Command::RemoveFromWishlist { id } => Action::RemoveFromWishlist(id),
            Command::BuyItem { id } => {
                let Some(item) = self.state.wishlist_item(&id).cloned() else {
                    debug!(id = %id, "Buy ignored, item is not on the wishlist");
                    return None;
                };
                Action::BuyItem {
                    item,
                    purchased_at: self.clock.now(),
                }
            }
            Command::SetBudget { amount } => {
                Action::SetSlice(SliceUpdate::Budget(Update::Replace(amount)))
            }
            Command::AdjustBudget { delta } => Action::SetSlice(SliceUpdate::Budget(
                Update::transform(move |budget: f64| budget + delta),
            )),
            Command::SetLocation { location } => {
                Action::SetSlice(SliceUpdate::Location(Update::Replace(location)))
            }
            Command::SetApiKey { key } => Action::SetSlice(SliceUpdate::ApiKey(Update::Replace(
                SecureString::new(key.trim()),
            ))),
            Command::PlanOutfit { item_ids } => {
                Action::SetSlice(SliceUpdate::PlannedOutfit(Update::Replace(item_ids)))
            }
            Command::AppendChatMessage { role, text } => {
                let now = self.clock.now();
                Action::AppendChatMessage(match role {
                    ChatRole::User => ChatMessage::user(text, now),
                    ChatRole::Ai => ChatMessage::ai(text, now),
                })
            }
            Command::ClearChat => {
                Action::SetSlice(SliceUpdate::ChatMessages(Update::Replace(Vec::new())))
            }
            Command::UpdateProfile { updates } => profile_update(updates),
            Command::LoadSampleData => {
                self.load_sample_data();
                return None;
            }
            Command::ClearData => {
                self.clear_data();
                return None;
            }
            Command::Unrecognized => Action::Unrecognized,
        };
        Some(action)
    }

    fn outfit_entry(&mut self, item_ids: Vec<String>) -> OutfitEntry {
        OutfitEntry {
            item_ids,
            day: self.clock.today(),
            log_id: new_id(),
            timestamp: self.clock.now(),
            vibe_score: self.rng.gen_range(VIBE_SCORE_RANGE),
        }
    }

    pub fn log_outfit(&mut self, item_ids: Vec<String>) -> Vec<Effect> {
        let entry = self.outfit_entry(item_ids);
        self.dispatch(Action::LogOutfit(entry))
    }

    pub fn complete_quest(&mut self) -> Vec<Effect> {
        self.dispatch(Action::CompleteQuest)
    }

    pub fn laundry_day(&mut self) -> Vec<Effect> {
        self.dispatch(Action::LaundryDay)
    }

    /// Catalogue a new item. Returns the assigned id with the outbox.
    pub fn add_item(&mut self, draft: ItemDraft) -> (String, Vec<Effect>) {
        let id = new_id();
        let item = draft.into_wardrobe(id.clone(), self.clock.now());
        (id, self.dispatch(Action::AddItem(item)))
    }

    pub fn update_item(&mut self, id: &str, patch: ItemPatch) -> Vec<Effect> {
        self.dispatch(Action::UpdateItem {
            id: id.to_string(),
            patch,
        })
    }

    pub fn add_to_wishlist(&mut self, draft: ItemDraft) -> (String, Vec<Effect>) {
        let id = new_id();
        let item = draft.into_wishlist(id.clone(), self.clock.now());
        (id, self.dispatch(Action::AddToWishlist(item)))
    }

    /// Buy a wishlist entry by id. Unknown ids do nothing.
    pub fn buy_item(&mut self, id: &str) -> Vec<Effect> {
        self.execute(Command::BuyItem { id: id.to_string() })
    }

    /// Merge `patch` into the stored profile. Gamification counters are
    /// never touched.
    pub fn update_profile(&mut self, patch: ProfilePatch) -> Vec<Effect> {
        self.dispatch(profile_update(patch))
    }

    /// Replace the inventory and wishlist with the starter wardrobe and drop
    /// the pinned outfit. Logs, XP and streak are kept.
    pub fn load_sample_data(&mut self) {
        let now = self.clock.now();
        self.dispatch(Action::SetSlice(SliceUpdate::Inventory(Update::Replace(
            sample_inventory(now),
        ))));
        self.dispatch(Action::SetSlice(SliceUpdate::Wishlist(Update::Replace(
            sample_wishlist(now),
        ))));
        self.dispatch(Action::SetSlice(SliceUpdate::PlannedOutfit(Update::Replace(
            Vec::new(),
        ))));
        info!(items = self.state.inventory.len(), "Loaded sample wardrobe");
    }

    /// Replace the whole aggregate with fresh defaults and overwrite every
    /// stored slice, including ones the reset left unchanged.
    pub fn clear_data(&mut self) {
        let defaults = VibeState::fresh(self.clock.today(), &self.quest_pool);
        self.dispatch(Action::ClearData(Box::new(defaults)));
        let report = write_all(&self.store, &self.state);
        info!(failed = report.failed.len(), "Cleared all data");
    }

    /// Rotate the daily quest if it is not dated today. Returns true when a
    /// new quest was drawn.
    pub fn check_quest(&mut self) -> bool {
        let today = self.clock.today();
        let draw = self.rng.gen_range(0..self.quest_pool.len().max(1));
        let Some(quest) = self.state.daily_quest.rotated(today, &self.quest_pool, draw) else {
            return false;
        };
        info!(day = %today, quest = %quest.text, "Rotated daily quest");
        self.dispatch(Action::SetSlice(SliceUpdate::DailyQuest(Update::Replace(
            quest,
        ))));
        true
    }

    /// Pin a random clean top/bottom/shoes combination for tomorrow.
    pub fn plan_random_outfit(&mut self) -> Vec<String> {
        let ids = analytics::suggest_outfit(&self.state.inventory, &mut self.rng);
        self.dispatch(Action::SetSlice(SliceUpdate::PlannedOutfit(Update::Replace(
            ids.clone(),
        ))));
        ids
    }

    /// Send `text` to the stylist and record both sides of the exchange.
    ///
    /// The provider runs between two ordinary dispatches; its failure only
    /// ever becomes an AI chat message.
    pub fn ask_stylist(
        &mut self,
        provider: &dyn AdviceProvider,
        text: &str,
        weather: Option<WeatherSnapshot>,
        model: &str,
    ) -> ChatMessage {
        self.dispatch(Action::AppendChatMessage(ChatMessage::user(
            text,
            self.clock.now(),
        )));
        let reply = advice::request_advice(provider, &self.state, weather, model, self.clock.now());
        self.dispatch(Action::AppendChatMessage(reply.clone()));
        reply
    }

    pub fn export(&self, model: &str) -> Backup {
        backup::export(&self.state, model, self.clock.now())
    }

    /// Apply a backup document. Returns the model choice it carried.
    pub fn restore(&mut self, json: &str) -> Result<String, BackupError> {
        let (actions, model) = backup::restore(json)?;
        for action in actions {
            self.dispatch(action);
        }
        info!("Restored backup");
        Ok(model)
    }
}

fn profile_update(patch: ProfilePatch) -> Action {
    Action::SetSlice(SliceUpdate::Profile(Update::transform(
        move |mut profile: UserProfile| {
            patch.apply(&mut profile);
            profile
        },
    )))
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
