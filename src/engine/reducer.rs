//! The state engine's transition function.

use std::mem;

use crate::domain::OutfitLog;
use crate::mvi::{Reducer, Transition};

use super::effect::Effect;
use super::intent::{Action, OutfitEntry, SliceUpdate};
use super::rewards;
use super::state::VibeState;
use super::streak::{award_streak_badge, next_streak};

/// Reducer for the wardrobe aggregate.
///
/// Pure and total: every wall-clock or random input is part of the action,
/// and references to unknown ids degrade to no-ops. Persistence and
/// presentation effects are handled by the caller around the dispatch call.
pub struct VibeReducer;

impl Reducer for VibeReducer {
    type State = VibeState;
    type Intent = Action;
    type Effect = Effect;

    fn reduce(state: Self::State, intent: Self::Intent) -> Transition<Self::State, Self::Effect> {
        match intent {
            Action::SetSlice(update) => Transition::quiet(set_slice(state, update)),

            Action::LogOutfit(entry) => log_outfit(state, entry),

            Action::CompleteQuest => {
                if state.daily_quest.is_completed {
                    return Transition::quiet(state);
                }
                let mut state = state;
                state.daily_quest.is_completed = true;
                state.profile.grant_xp(rewards::COMPLETE_QUEST);
                Transition::with_effect(
                    state,
                    Effect::QuestCompleted {
                        xp: rewards::COMPLETE_QUEST,
                    },
                )
            }

            Action::LaundryDay => {
                let dirty = state.dirty_count();
                if dirty == 0 {
                    return Transition::quiet(state);
                }
                let mut state = state;
                for item in state.inventory.iter_mut() {
                    item.is_clean = true;
                }
                let xp = rewards::laundry_xp(dirty);
                state.profile.grant_xp(xp);
                Transition::with_effect(state, Effect::LaundryDone { count: dirty, xp })
            }

            Action::AddItem(item) => {
                if state.item(&item.id).is_some() {
                    return Transition::quiet(state);
                }
                let mut state = state;
                state.inventory.push(item);
                state.profile.grant_xp(rewards::ADD_ITEM);
                Transition::with_effect(
                    state,
                    Effect::ItemAdded {
                        xp: rewards::ADD_ITEM,
                    },
                )
            }

            Action::UpdateItem { id, patch } => {
                let mut state = state;
                if let Some(item) = state.inventory.iter_mut().find(|i| i.id == id) {
                    patch.apply(item);
                }
                Transition::quiet(state)
            }

            Action::ToggleClean(id) => {
                let mut state = state;
                if let Some(item) = state.inventory.iter_mut().find(|i| i.id == id) {
                    item.is_clean = !item.is_clean;
                }
                Transition::quiet(state)
            }

            Action::DeleteItem(id) => {
                let mut state = state;
                state.inventory.retain(|i| i.id != id);
                state.planned_outfit.retain(|planned| *planned != id);
                Transition::quiet(state)
            }

            Action::AddToWishlist(item) => {
                if state.wishlist_item(&item.id).is_some() {
                    return Transition::quiet(state);
                }
                let mut state = state;
                state.wishlist.push(item);
                state.profile.grant_xp(rewards::WISHLIST_ADD);
                Transition::with_effect(
                    state,
                    Effect::WishlistAdded {
                        xp: rewards::WISHLIST_ADD,
                    },
                )
            }

            Action::RemoveFromWishlist(id) => {
                let mut state = state;
                state.wishlist.retain(|i| i.id != id);
                Transition::quiet(state)
            }

            Action::BuyItem { item, purchased_at } => {
                // Ids stay unique across the inventory.
                if state.item(&item.id).is_some() {
                    return Transition::quiet(state);
                }
                let mut state = state;
                state.wishlist.retain(|i| i.id != item.id);
                if let Some(price) = item.price {
                    state.budget -= price;
                }
                state.inventory.push(item.into_wardrobe(purchased_at));
                state.profile.grant_xp(rewards::ADD_ITEM);
                Transition::with_effect(
                    state,
                    Effect::ItemPurchased {
                        xp: rewards::ADD_ITEM,
                    },
                )
            }

            Action::AppendChatMessage(message) => {
                let mut state = state;
                state.chat_messages.push(message);
                Transition::quiet(state)
            }

            Action::ClearData(defaults) => Transition::quiet(*defaults),

            Action::Unrecognized => Transition::quiet(state),
        }
    }
}

fn set_slice(mut state: VibeState, update: SliceUpdate) -> VibeState {
    match update {
        SliceUpdate::Profile(u) => state.profile = u.apply(mem::take(&mut state.profile)),
        SliceUpdate::Inventory(u) => state.inventory = u.apply(mem::take(&mut state.inventory)),
        SliceUpdate::OutfitLogs(u) => {
            state.outfit_logs = u.apply(mem::take(&mut state.outfit_logs))
        }
        SliceUpdate::ApiKey(u) => state.api_key = u.apply(mem::take(&mut state.api_key)),
        SliceUpdate::Location(u) => state.location = u.apply(mem::take(&mut state.location)),
        SliceUpdate::Budget(u) => state.budget = u.apply(state.budget),
        SliceUpdate::DailyQuest(u) => {
            state.daily_quest = u.apply(mem::take(&mut state.daily_quest))
        }
        SliceUpdate::ChatMessages(u) => {
            state.chat_messages = u.apply(mem::take(&mut state.chat_messages))
        }
        SliceUpdate::PlannedOutfit(u) => {
            state.planned_outfit = u.apply(mem::take(&mut state.planned_outfit))
        }
        SliceUpdate::Wishlist(u) => state.wishlist = u.apply(mem::take(&mut state.wishlist)),
    }
    state
}

fn log_outfit(mut state: VibeState, entry: OutfitEntry) -> Transition<VibeState, Effect> {
    let OutfitEntry {
        item_ids,
        day,
        log_id,
        timestamp,
        vibe_score,
    } = entry;

    let profile = &mut state.profile;
    let streak = next_streak(day, profile.last_log_date, profile.streak);
    let earned_badge = award_streak_badge(&mut profile.badges, streak);
    profile.streak = streak;
    profile.last_log_date = Some(day);
    profile.grant_xp(rewards::LOG_OUTFIT);

    // Snapshot before incrementing so the log records the items as worn.
    let worn = state
        .inventory
        .iter()
        .filter(|item| item_ids.contains(&item.id))
        .cloned()
        .collect();

    let quest_completed_text = state
        .daily_quest
        .is_completed
        .then(|| state.daily_quest.text.clone());

    state.outfit_logs.insert(
        0,
        OutfitLog {
            id: log_id,
            timestamp,
            items: worn,
            vibe_score,
            quest_completed_text,
        },
    );

    for item in state.inventory.iter_mut() {
        if item_ids.contains(&item.id) {
            item.wear_count = item.wear_count.saturating_add(1);
        }
    }

    Transition::with_effect(
        state,
        Effect::OutfitLogged {
            xp: rewards::LOG_OUTFIT,
            earned_badge,
        },
    )
}
