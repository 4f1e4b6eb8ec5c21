//! Inventory actions: stashing found goods, dropping them, and the two
//! consumables with an in-world effect.
//!
//! The inventory is one shared bag with a slot cap; every unit takes a
//! slot. Buying at the market goes through the trade actions, so this
//! module only covers goods entering the bag from elsewhere.

use crate::{
    action::ActionOutcome,
    config::GameConfig,
    event::GameEvent,
    state::{Crop, GameState},
};

const FEED_HEALTH_GAIN: i64 = 20;

/// Put found or gifted goods into the bag.
pub fn store_item(state: &mut GameState, item: &str, quantity: i64) -> ActionOutcome {
    if quantity <= 0 {
        return ActionOutcome::rejected("Nothing to store.");
    }
    if state.trade.slots_used() + quantity > state.trade.max_slots {
        return ActionOutcome::rejected("Your inventory is full.");
    }
    state.trade.add_item(item, quantity);
    ActionOutcome::applied(
        Vec::new(),
        vec![format!("Stored {quantity} {item}.")],
    )
}

/// Throw one unit away.
pub fn drop_item(state: &mut GameState, item: &str) -> ActionOutcome {
    if state.trade.inventory.get(item).copied().unwrap_or(0) <= 0 {
        return ActionOutcome::rejected(format!("You hold no {item}."));
    }
    state.trade.remove_item(item, 1);
    ActionOutcome::applied(
        Vec::new(),
        vec![format!("Dropped one {item}.")],
    )
}

/// Consume one unit of an item with an effect. Feed goes to the
/// hungriest animal; seeds put a free wheat crop in the ground.
pub fn use_item(state: &mut GameState, config: &GameConfig, item: &str) -> ActionOutcome {
    if state.trade.inventory.get(item).copied().unwrap_or(0) <= 0 {
        return ActionOutcome::rejected(format!("You hold no {item}."));
    }
    match item {
        "Ração" => use_feed(state),
        "Sementes" => use_seeds(state, config),
        _ => ActionOutcome::rejected(format!("{item} has no use on its own.")),
    }
}

fn use_feed(state: &mut GameState) -> ActionOutcome {
    if state.location != "Fazenda" {
        return ActionOutcome::rejected("Animal feed is used at the farm.");
    }
    let Some(index) = state
        .farm
        .animals
        .iter()
        .enumerate()
        .min_by_key(|(_, a)| a.health)
        .map(|(i, _)| i)
    else {
        return ActionOutcome::rejected("There is no animal to feed.");
    };

    let day = state.calendar.day_count;
    state.trade.remove_item("Ração", 1);
    let animal = &mut state.farm.animals[index];
    animal.health = (animal.health + FEED_HEALTH_GAIN).min(100);
    animal.last_fed_day = day;
    let kind = animal.kind.clone();
    ActionOutcome::applied(
        Vec::new(),
        vec![format!("You feed the {kind} from your stores.")],
    )
}

fn use_seeds(state: &mut GameState, config: &GameConfig) -> ActionOutcome {
    if state.location != "Fazenda" {
        return ActionOutcome::rejected("Seeds are sown at the farm.");
    }
    // The seed packet is generic; it always yields the staple crop.
    let kind = "Trigo";
    if config.crop(kind).is_none() {
        return ActionOutcome::rejected("These seeds will not grow here.");
    }

    let day = state.calendar.day_count;
    state.trade.remove_item("Sementes", 1);
    state.farm.crops.push(Crop {
        kind: kind.to_string(),
        planted_day: day,
        progress: 0,
    });
    ActionOutcome::applied(
        vec![GameEvent::CropPlanted {
            day_count: day,
            kind: kind.to_string(),
        }],
        vec![format!("You sow a packet of seeds: {kind}.")],
    )
}
