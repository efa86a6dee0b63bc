//! Status effects system
//!
//! Timed stat boosts granted by potions, and the parser that turns potion
//! effect text into boosts.

use serde::{Deserialize, Serialize};

use crate::entities::{CombatStats, Stat};

/// A temporary bonus to one stat, counted in combat rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedBoost {
    pub stat: Stat,
    pub amount: i32,
    pub turns_left: u32,
}

impl TimedBoost {
    pub fn new(stat: Stat, amount: i32, turns: u32) -> Self {
        Self {
            stat,
            amount,
            turns_left: turns,
        }
    }
}

/// Result of ticking boosts
#[derive(Debug, Clone, Default)]
pub struct StatusTickResult {
    /// Boosts that ran out this tick
    pub expired: Vec<TimedBoost>,
    /// Messages to display
    pub messages: Vec<String>,
}

impl StatusTickResult {
    pub fn effects_expired(&self) -> bool {
        !self.expired.is_empty()
    }
}

/// Active boosts on the player
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    boosts: Vec<TimedBoost>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a boost; boosts on the same stat stack independently
    pub fn add(&mut self, boost: TimedBoost) {
        if boost.turns_left > 0 {
            self.boosts.push(boost);
        }
    }

    pub fn has_boost(&self, stat: Stat) -> bool {
        self.boosts.iter().any(|b| b.stat == stat)
    }

    pub fn boosts(&self) -> &[TimedBoost] {
        &self.boosts
    }

    pub fn is_empty(&self) -> bool {
        self.boosts.is_empty()
    }

    /// Summed boost per stat
    pub fn totals(&self) -> CombatStats {
        let mut totals = CombatStats::default();
        for boost in &self.boosts {
            totals.add(boost.stat, boost.amount);
        }
        totals
    }

    /// Advance one combat round
    pub fn tick(&mut self) -> StatusTickResult {
        let mut result = StatusTickResult::default();

        for boost in &mut self.boosts {
            boost.turns_left = boost.turns_left.saturating_sub(1);
        }

        let (expired, active): (Vec<_>, Vec<_>) =
            self.boosts.drain(..).partition(|b| b.turns_left == 0);
        self.boosts = active;

        for boost in &expired {
            result
                .messages
                .push(format!("Your {} boost wears off.", boost.stat.name()));
        }
        result.expired = expired;
        result
    }

    /// Clear all effects
    pub fn clear(&mut self) {
        self.boosts.clear();
    }
}

/// Parse "Increases <stat> by <N>[%] for <T> turns" into boosts.
///
/// "all stats" expands to one boost per stat. A trailing `%` is read as
/// plain points. Returns an empty list for text that does not match.
pub fn parse_boost_effect(text: &str) -> Vec<TimedBoost> {
    let lower = text.trim().to_ascii_lowercase();
    let Some(rest) = lower.strip_prefix("increases ") else {
        return Vec::new();
    };
    let Some((target, rest)) = rest.split_once(" by ") else {
        return Vec::new();
    };
    let Some((amount, rest)) = rest.split_once(" for ") else {
        return Vec::new();
    };
    let Ok(amount) = amount.trim().trim_end_matches('%').parse::<i32>() else {
        return Vec::new();
    };
    let Some(turns) = rest
        .split_whitespace()
        .next()
        .and_then(|t| t.parse::<u32>().ok())
    else {
        return Vec::new();
    };

    let stats: Vec<Stat> = match target.trim() {
        "all stats" => Stat::ALL.to_vec(),
        "attack" => vec![Stat::Attack],
        "defense" => vec![Stat::Defense],
        "magic" => vec![Stat::Magic],
        "dodge" => vec![Stat::Dodge],
        "critical hit" | "crit" => vec![Stat::CriticalHit],
        "luck" => vec![Stat::Luck],
        _ => return Vec::new(),
    };

    stats
        .into_iter()
        .map(|stat| TimedBoost::new(stat, amount, turns))
        .collect()
}
