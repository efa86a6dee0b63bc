//! Stat blocks and stat identifiers

use serde::{Deserialize, Serialize};

/// Hard ceiling on dodge after aggregation
pub const DODGE_CAP: i32 = 80;

/// The six stats that have a base value and an aggregated total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatStats {
    pub attack: i32,
    pub defense: i32,
    pub magic: i32,
    pub dodge: i32,
    pub critical_hit: i32,
    pub luck: i32,
}

impl CombatStats {
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Magic => self.magic,
            Stat::Dodge => self.dodge,
            Stat::CriticalHit => self.critical_hit,
            Stat::Luck => self.luck,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Attack => &mut self.attack,
            Stat::Defense => &mut self.defense,
            Stat::Magic => &mut self.magic,
            Stat::Dodge => &mut self.dodge,
            Stat::CriticalHit => &mut self.critical_hit,
            Stat::Luck => &mut self.luck,
        }
    }

    pub fn add(&mut self, stat: Stat, amount: i32) {
        *self.get_mut(stat) += amount;
    }
}

/// Identifies one of the aggregated stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Stat {
    Attack,
    Defense,
    Magic,
    Dodge,
    CriticalHit,
    Luck,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Attack,
        Stat::Defense,
        Stat::Magic,
        Stat::Dodge,
        Stat::CriticalHit,
        Stat::Luck,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stat::Attack => "attack",
            Stat::Defense => "defense",
            Stat::Magic => "magic",
            Stat::Dodge => "dodge",
            Stat::CriticalHit => "critical hit",
            Stat::Luck => "luck",
        }
    }
}

/// Anything a skill point or a permanent upgrade can raise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    Health,
    Mana,
    Attack,
    Defense,
    Magic,
    Dodge,
    CriticalHit,
    Luck,
}

impl Attribute {
    pub const ALL: [Attribute; 8] = [
        Attribute::Health,
        Attribute::Mana,
        Attribute::Attack,
        Attribute::Defense,
        Attribute::Magic,
        Attribute::Dodge,
        Attribute::CriticalHit,
        Attribute::Luck,
    ];

    /// Amount gained per point spent
    pub fn step(&self) -> i32 {
        match self {
            Attribute::Health | Attribute::Mana => 10,
            Attribute::Attack | Attribute::Defense | Attribute::Magic | Attribute::Dodge => 1,
            Attribute::CriticalHit | Attribute::Luck => 2,
        }
    }

    /// The aggregated stat this attribute feeds, if any
    pub fn stat(&self) -> Option<Stat> {
        match self {
            Attribute::Health | Attribute::Mana => None,
            Attribute::Attack => Some(Stat::Attack),
            Attribute::Defense => Some(Stat::Defense),
            Attribute::Magic => Some(Stat::Magic),
            Attribute::Dodge => Some(Stat::Dodge),
            Attribute::CriticalHit => Some(Stat::CriticalHit),
            Attribute::Luck => Some(Stat::Luck),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Health => "health",
            Attribute::Mana => "mana",
            Attribute::Attack => "attack",
            Attribute::Defense => "defense",
            Attribute::Magic => "magic",
            Attribute::Dodge => "dodge",
            Attribute::CriticalHit => "critical hit",
            Attribute::Luck => "luck",
        }
    }
}

impl std::str::FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "health" => Ok(Attribute::Health),
            "mana" => Ok(Attribute::Mana),
            "attack" => Ok(Attribute::Attack),
            "defense" => Ok(Attribute::Defense),
            "magic" => Ok(Attribute::Magic),
            "dodge" => Ok(Attribute::Dodge),
            "criticalhit" | "critical_hit" | "crit" => Ok(Attribute::CriticalHit),
            "luck" => Ok(Attribute::Luck),
            other => Err(format!("unknown attribute '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_add() {
        let mut stats = CombatStats::default();
        stats.add(Stat::Dodge, 7);
        stats.add(Stat::Dodge, 3);
        assert_eq!(stats.get(Stat::Dodge), 10);
        assert_eq!(stats.get(Stat::Luck), 0);
    }

    #[test]
    fn test_attribute_steps() {
        assert_eq!(Attribute::Health.step(), 10);
        assert_eq!(Attribute::Magic.step(), 1);
        assert_eq!(Attribute::Luck.step(), 2);
        assert_eq!(Attribute::Mana.stat(), None);
        assert_eq!(Attribute::CriticalHit.stat(), Some(Stat::CriticalHit));
        assert_eq!("crit".parse::<Attribute>(), Ok(Attribute::CriticalHit));
    }
}
