//! Relationship actions: spending time with family at home or with
//! townsfolk at their spot around town.
//!
//! Social skill makes every interaction count for more. A first chat
//! with an npc creates the contact record; family members are part of
//! the household from day one.

use crate::{action::ActionOutcome, config::GameConfig, state::Contact, state::GameState};

const INTERACT_ENERGY_COST: i64 = 5;
const BASE_RELATIONSHIP_GAIN: i64 = 5;
const CLOSE_FAMILY_THRESHOLD: i64 = 80;
const CLOSE_FAMILY_MOOD_GAIN: i64 = 10;

fn relationship_gain(state: &GameState) -> i64 {
    BASE_RELATIONSHIP_GAIN + state.trade.social_skill / 10
}

/// Spend time with a family member or an npc. Family is visited at
/// home; townsfolk are found at their own location.
pub fn interact(state: &mut GameState, config: &GameConfig, target: &str) -> ActionOutcome {
    if state
        .family
        .members
        .iter()
        .any(|m| m.name == target)
    {
        return interact_family(state, target);
    }
    if let Some(npc) = config.npc(target) {
        let location = npc.location.clone();
        let role = npc.role.clone();
        return interact_npc(state, target, &location, &role);
    }
    ActionOutcome::rejected(format!("You do not know anyone called {target}."))
}

fn interact_family(state: &mut GameState, name: &str) -> ActionOutcome {
    if state.location != "Lar Familiar" {
        return ActionOutcome::rejected("Your family is at home.");
    }
    let Some(index) = state.family.members.iter().position(|m| m.name == name) else {
        return ActionOutcome::rejected(format!("{name} is not part of the household."));
    };
    if !state.character.try_spend_energy(INTERACT_ENERGY_COST) {
        return ActionOutcome::rejected("You are too tired to socialize.");
    }

    let gain = relationship_gain(state);
    let member = &mut state.family.members[index];
    member.relationship = (member.relationship + gain).min(100);
    let close = member.relationship >= CLOSE_FAMILY_THRESHOLD;
    if close {
        state.character.add_mood(CLOSE_FAMILY_MOOD_GAIN);
    }
    ActionOutcome::applied(
        Vec::new(),
        vec![format!("You spend time with {name}.")],
    )
}

fn interact_npc(state: &mut GameState, name: &str, location: &str, role: &str) -> ActionOutcome {
    if state.location != location {
        return ActionOutcome::rejected(format!("{name} is over at {location}."));
    }
    if !state.character.try_spend_energy(INTERACT_ENERGY_COST) {
        return ActionOutcome::rejected("You are too tired to socialize.");
    }

    let gain = relationship_gain(state);
    match state.relationships.contact_mut(name) {
        Some(contact) => {
            contact.relationship = (contact.relationship + gain).min(100);
        }
        None => {
            state.relationships.contacts.push(Contact {
                name: name.to_string(),
                role: role.to_string(),
                location: location.to_string(),
                relationship: gain,
            });
        }
    }
    ActionOutcome::applied(
        Vec::new(),
        vec![format!("You chat with {name}.")],
    )
}
