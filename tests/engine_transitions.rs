mod common;

use common::*;
use vibewear::domain::{Category, ChatMessage, ItemPatch};
use vibewear::engine::rewards::{self, ADD_ITEM, COMPLETE_QUEST, LAUNDRY_ITEM, LOG_OUTFIT};
use vibewear::engine::streak::FASHIONISTA;
use vibewear::engine::{Action, Command, Effect, SliceUpdate, Update, VibeState};

fn log(state: VibeState, ids: &[&str], on: vibewear::domain::CalendarDay) -> Step {
    reduce(state, Action::LogOutfit(entry(ids, on)))
}

#[test]
fn scenario_a_next_day_extends_streak() {
    let mut state = state_with(vec![item("a", Category::Top)]);
    state.profile.last_log_date = Some(day(2025, 3, 3)); // Monday
    state.profile.streak = 3;

    let step = log(state, &["a"], day(2025, 3, 4));
    assert_eq!(step.state.profile.streak, 4);
    assert_eq!(step.state.profile.last_log_date, Some(day(2025, 3, 4)));
}

#[test]
fn scenario_b_gap_resets_streak() {
    let mut state = state_with(vec![item("a", Category::Top)]);
    state.profile.last_log_date = Some(day(2025, 3, 3));
    state.profile.streak = 3;

    let step = log(state, &["a"], day(2025, 3, 6));
    assert_eq!(step.state.profile.streak, 1);
}

#[test]
fn scenario_c_fashionista_awarded_once() {
    let mut state = state_with(vec![item("a", Category::Top)]);
    state.profile.last_log_date = Some(day(2025, 3, 6));
    state.profile.streak = 6;

    let step = log(state, &["a"], day(2025, 3, 7));
    assert_eq!(step.state.profile.streak, 7);
    assert!(step.state.profile.badges.contains(FASHIONISTA));
    assert_eq!(step.effects[0].earned_badge(), Some(FASHIONISTA));

    let step = log(step.state, &["a"], day(2025, 3, 8));
    assert_eq!(step.state.profile.streak, 8);
    assert_eq!(step.state.profile.badges.len(), 1);
    assert_eq!(step.effects[0].earned_badge(), None);
}

#[test]
fn scenario_d_laundry_cleans_and_rewards() {
    let state = state_with(vec![
        dirty("a", Category::Top),
        dirty("b", Category::Bottom),
        item("c", Category::Shoes),
    ]);
    let step = reduce(state, Action::LaundryDay);
    assert!(step.state.inventory.iter().all(|i| i.is_clean));
    let expected = (2 * LAUNDRY_ITEM).min(rewards::LAUNDRY_MAX);
    assert_eq!(step.state.profile.xp, expected);
    assert_eq!(step.effects, vec![Effect::LaundryDone { count: 2, xp: expected }]);
}

#[test]
fn laundry_reward_is_capped() {
    let items = (0..15).map(|i| dirty(&i.to_string(), Category::Top)).collect();
    let step = reduce(state_with(items), Action::LaundryDay);
    assert_eq!(step.state.profile.xp, rewards::LAUNDRY_MAX);
}

#[test]
fn scenario_e_laundry_with_nothing_dirty_is_a_noop() {
    let state = state_with(vec![item("a", Category::Top)]);
    let step = reduce(state.clone(), Action::LaundryDay);
    assert_eq!(step.state, state);
    assert!(step.effects.is_empty());
}

#[test]
fn log_outfit_never_decreases_wear_counts() {
    let mut worn = item("a", Category::Top);
    worn.wear_count = 4;
    let state = state_with(vec![worn, item("b", Category::Bottom)]);

    let step = log(state, &["a", "missing"], day(2025, 5, 1));
    let a = step.state.item("a").unwrap();
    let b = step.state.item("b").unwrap();
    assert_eq!(a.wear_count, 5);
    assert_eq!(b.wear_count, 0);
    assert_eq!(step.state.profile.xp, LOG_OUTFIT);
    assert_eq!(step.state.outfit_logs[0].items.len(), 1);
}

#[test]
fn same_day_repeat_log_keeps_streak_but_still_counts_wear() {
    let state = state_with(vec![item("a", Category::Top)]);
    let step = log(state, &["a"], day(2025, 5, 1));
    let step = log(step.state, &["a"], day(2025, 5, 1));
    assert_eq!(step.state.profile.streak, 1);
    assert_eq!(step.state.item("a").unwrap().wear_count, 2);
    assert_eq!(step.state.profile.xp, 2 * LOG_OUTFIT);
    assert_eq!(step.state.outfit_logs.len(), 2);
}

#[test]
fn log_records_completed_quest_text() {
    let mut state = state_with(vec![item("a", Category::Top)]);
    state.daily_quest.is_completed = true;
    let text = state.daily_quest.text.clone();
    let step = log(state, &["a"], day(2025, 5, 1));
    assert_eq!(step.state.outfit_logs[0].quest_completed_text, Some(text));
}

#[test]
fn complete_quest_is_idempotent() {
    let once = reduce(VibeState::default(), Action::CompleteQuest);
    assert!(once.state.daily_quest.is_completed);
    assert_eq!(once.state.profile.xp, COMPLETE_QUEST);
    assert_eq!(once.effects, vec![Effect::QuestCompleted { xp: COMPLETE_QUEST }]);

    let twice = reduce(once.state.clone(), Action::CompleteQuest);
    assert_eq!(twice.state, once.state);
    assert!(twice.effects.is_empty());
}

#[test]
fn buy_item_moves_exactly_one_entry_and_spends_budget() {
    let mut state = state_with(vec![item("a", Category::Top)]);
    state.wishlist = vec![wish("w1", 80.0), wish("w2", 20.0)];
    state.budget = 50.0;
    let bought = state.wishlist[0].clone();

    let step = reduce(
        state,
        Action::BuyItem {
            item: bought,
            purchased_at: at(2025, 6, 1),
        },
    );
    assert_eq!(step.state.wishlist.len(), 1);
    assert_eq!(step.state.wishlist[0].id, "w2");
    assert_eq!(step.state.inventory.len(), 2);
    let new = step.state.item("w1").unwrap();
    assert_eq!(new.wear_count, 0);
    assert!(new.is_clean);
    assert_eq!(new.date_added, at(2025, 6, 1));
    assert_eq!(step.state.budget, -30.0);
    assert_eq!(step.state.profile.xp, ADD_ITEM);
}

#[test]
fn clear_data_yields_exactly_the_defaults() {
    let mut state = state_with(vec![item("a", Category::Top)]);
    state.profile.xp = 900;
    state.budget = 12.0;
    let defaults = VibeState::fresh(day(2025, 1, 1), vibewear::domain::DEFAULT_QUESTS);

    let step = reduce(state, Action::ClearData(Box::new(defaults.clone())));
    assert_eq!(step.state, defaults);
}

#[test]
fn unrecognized_command_leaves_state_unchanged() {
    let state = state_with(vec![item("a", Category::Top)]);
    let command = Command::parse(r#"{"type":"TELEPORT","to":"Mars"}"#).unwrap();
    assert_eq!(command, Command::Unrecognized);
    let step = reduce(state.clone(), Action::Unrecognized);
    assert_eq!(step.state, state);
    assert!(step.effects.is_empty());
}

#[test]
fn update_item_merges_patch_and_ignores_unknown_id() {
    let state = state_with(vec![item("a", Category::Top)]);
    let patch = ItemPatch {
        name: Some("Denim Jacket".into()),
        price: Some(120.0),
        ..Default::default()
    };
    let step = reduce(
        state,
        Action::UpdateItem {
            id: "a".into(),
            patch: patch.clone(),
        },
    );
    let a = step.state.item("a").unwrap();
    assert_eq!(a.name, "Denim Jacket");
    assert_eq!(a.price, Some(120.0));
    assert_eq!(a.category, Category::Top);

    let again = reduce(
        step.state.clone(),
        Action::UpdateItem {
            id: "zzz".into(),
            patch,
        },
    );
    assert_eq!(again.state, step.state);
}

#[test]
fn wishlist_add_and_remove() {
    let step = reduce(VibeState::default(), Action::AddToWishlist(wish("w", 30.0)));
    assert_eq!(step.state.wishlist.len(), 1);
    assert_eq!(step.state.profile.xp, rewards::WISHLIST_ADD);

    let step = reduce(step.state, Action::RemoveFromWishlist("w".into()));
    assert!(step.state.wishlist.is_empty());
    assert!(step.effects.is_empty());
}

#[test]
fn transform_update_sees_latest_value() {
    let mut state = VibeState::default();
    state.budget = 100.0;
    let step = reduce(
        state,
        Action::SetSlice(SliceUpdate::Budget(Update::transform(|b: f64| b - 140.0))),
    );
    assert_eq!(step.state.budget, -40.0);
}

#[test]
fn chat_messages_append_in_order() {
    let first = ChatMessage::user("What should I wear?", at(2025, 1, 1));
    let second = ChatMessage::ai("The blue shirt.", at(2025, 1, 1));
    let step = reduce(VibeState::default(), Action::AppendChatMessage(first.clone()));
    let step = reduce(step.state, Action::AppendChatMessage(second.clone()));
    assert_eq!(step.state.chat_messages, vec![first, second]);
}

#[test]
fn duplicate_wishlist_add_changes_nothing() {
    let first = reduce(VibeState::default(), Action::AddToWishlist(wish("w", 30.0)));
    let mut renamed = wish("w", 99.0);
    renamed.name = "Other".into();

    let again = reduce(first.state.clone(), Action::AddToWishlist(renamed));
    assert_eq!(again.state, first.state);
    assert_eq!(again.state.profile.xp, rewards::WISHLIST_ADD);
    assert!(again.effects.is_empty());
}

#[test]
fn editing_an_item_does_not_rewrite_logged_snapshots() {
    let state = state_with(vec![item("a", Category::Top)]);
    let logged = log(state, &["a"], day(2025, 3, 1)).state;
    let snapshot = logged.outfit_logs[0].items.clone();

    let step = reduce(
        logged,
        Action::UpdateItem {
            id: "a".into(),
            patch: ItemPatch {
                name: Some("Renamed Tee".into()),
                wear_count: Some(40),
                ..Default::default()
            },
        },
    );
    assert_eq!(step.state.item("a").unwrap().name, "Renamed Tee");
    assert_eq!(step.state.outfit_logs[0].items, snapshot);
    assert_eq!(step.state.outfit_logs[0].items[0].name, "Item a");
    assert_eq!(step.state.outfit_logs[0].items[0].wear_count, 0);
}

#[test]
fn buying_an_unpriced_item_leaves_budget_alone() {
    let mut state = VibeState::default();
    let mut free = wish("w1", 0.0);
    free.price = None;
    state.wishlist = vec![free.clone()];
    state.budget = 75.0;

    let step = reduce(
        state,
        Action::BuyItem {
            item: free,
            purchased_at: at(2025, 6, 1),
        },
    );
    assert_eq!(step.state.budget, 75.0);
    assert_eq!(step.state.inventory.len(), 1);
    assert!(step.state.item("w1").unwrap().price.is_none());
    assert_eq!(step.effects, vec![Effect::ItemPurchased { xp: ADD_ITEM }]);
}

#[test]
fn buying_an_id_already_owned_is_a_noop() {
    let mut state = state_with(vec![item("w1", Category::Shoes)]);
    state.wishlist = vec![wish("w1", 40.0)];
    state.budget = 100.0;
    let bought = state.wishlist[0].clone();

    let step = reduce(
        state.clone(),
        Action::BuyItem {
            item: bought,
            purchased_at: at(2025, 6, 1),
        },
    );
    assert_eq!(step.state, state);
    assert_eq!(step.state.inventory.len(), 1);
    assert!(step.effects.is_empty());
}
