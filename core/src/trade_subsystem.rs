//! Trade subsystem: the weekly market refresh and buy/sell actions.
//!
//! Prices wobble around the base price on every refresh; the trading
//! skill gives the player a permanent edge on both sides of a deal.

use crate::{
    action::ActionOutcome,
    config::GameConfig,
    error::SimResult,
    event::GameEvent,
    rng::SubsystemRng,
    state::{GameState, MarketEntry},
    subsystem::GameSubsystem,
    types::Day,
};

const REFRESH_INTERVAL_DAYS: u64 = 7;
const PRICE_SWING_PCT: i64 = 30;

pub struct TradeSubsystem;

impl TradeSubsystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TradeSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSubsystem for TradeSubsystem {
    fn name(&self) -> &'static str {
        "trade"
    }

    fn on_day(
        &mut self,
        state: &mut GameState,
        config: &GameConfig,
        day: Day,
        _events_in: &[GameEvent],
        rng: &mut SubsystemRng,
    ) -> SimResult<Vec<GameEvent>> {
        let due = state.trade.market.is_empty() || day % REFRESH_INTERVAL_DAYS == 0;
        if !due {
            return Ok(Vec::new());
        }

        state.trade.market = config
            .market
            .iter()
            .map(|good| {
                let swing = rng.next_i64_in(-PRICE_SWING_PCT, PRICE_SWING_PCT);
                let price = (good.base_price * (100 + swing) / 100).max(1);
                let stock = rng.next_i64_in(good.base_stock / 2, good.base_stock * 3 / 2);
                MarketEntry {
                    item: good.item.clone(),
                    price,
                    stock,
                }
            })
            .collect();

        Ok(vec![GameEvent::MarketRefreshed { day_count: day }])
    }
}

/// Buy one unit at the market. Trading skill discounts the price.
pub fn buy(state: &mut GameState, item: &str) -> ActionOutcome {
    if state.location != "Shopping" {
        return ActionOutcome::rejected("Shopping happens at the mall.");
    }
    let Some(index) = state.trade.market.iter().position(|e| e.item == item) else {
        return ActionOutcome::rejected(format!("The market does not carry {item}."));
    };
    if state.trade.market[index].stock <= 0 {
        return ActionOutcome::rejected(format!("{item} is sold out."));
    }
    let cost = (state.trade.market[index].price * (100 - state.trade.trading_skill) / 100).max(1);
    if state.trade.slots_used() >= state.trade.max_slots {
        return ActionOutcome::rejected("Your inventory is full.");
    }
    if state.resources.coins < cost {
        return ActionOutcome::rejected(format!("{item} costs {cost} coins."));
    }

    state.trade.market[index].stock -= 1;
    state.resources.coins -= cost;
    state.trade.add_item(item, 1);
    ActionOutcome::applied(
        vec![GameEvent::ItemBought {
            day_count: state.calendar.day_count,
            item: item.to_string(),
            cost,
        }],
        vec![format!("Bought {item} for {cost} coins.")],
    )
}

/// Sell one held unit back to the market. Trading skill raises the price.
pub fn sell(state: &mut GameState, item: &str) -> ActionOutcome {
    if state.location != "Shopping" {
        return ActionOutcome::rejected("Selling happens at the mall.");
    }
    if state.trade.inventory.get(item).copied().unwrap_or(0) <= 0 {
        return ActionOutcome::rejected(format!("You hold no {item}."));
    }
    let trading_skill = state.trade.trading_skill;
    let Some(entry) = state.trade.market.iter_mut().find(|e| e.item == item) else {
        return ActionOutcome::rejected(format!("The market does not buy {item}."));
    };
    let revenue = (entry.price * (100 + trading_skill) / 100).max(1);
    entry.stock += 1;
    state.trade.remove_item(item, 1);
    state.resources.earn(revenue);
    ActionOutcome::applied(
        vec![GameEvent::ItemSold {
            day_count: state.calendar.day_count,
            item: item.to_string(),
            revenue,
        }],
        vec![format!("Sold {item} for {revenue} coins.")],
    )
}
