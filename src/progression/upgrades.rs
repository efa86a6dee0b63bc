//! Permanent upgrades bought with meta skill points

use serde::{Deserialize, Serialize};

use crate::entities::Attribute;

/// Upgrade counts per attribute, carried across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermanentUpgrades {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
    pub magic: u32,
    pub dodge: u32,
    pub mana: u32,
    pub critical_hit: u32,
    pub luck: u32,
}

impl PermanentUpgrades {
    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Health => self.health,
            Attribute::Mana => self.mana,
            Attribute::Attack => self.attack,
            Attribute::Defense => self.defense,
            Attribute::Magic => self.magic,
            Attribute::Dodge => self.dodge,
            Attribute::CriticalHit => self.critical_hit,
            Attribute::Luck => self.luck,
        }
    }

    pub fn increment(&mut self, attribute: Attribute) {
        let slot = match attribute {
            Attribute::Health => &mut self.health,
            Attribute::Mana => &mut self.mana,
            Attribute::Attack => &mut self.attack,
            Attribute::Defense => &mut self.defense,
            Attribute::Magic => &mut self.magic,
            Attribute::Dodge => &mut self.dodge,
            Attribute::CriticalHit => &mut self.critical_hit,
            Attribute::Luck => &mut self.luck,
        };
        *slot = slot.saturating_add(1);
    }

    /// Non-zero counts in attribute order
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, u32)> + '_ {
        Attribute::ALL
            .into_iter()
            .map(move |attr| (attr, self.get(attr)))
            .filter(|(_, n)| *n > 0)
    }

    pub fn total(&self) -> u32 {
        Attribute::ALL.iter().map(|a| self.get(*a)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_and_iter() {
        let mut upgrades = PermanentUpgrades::default();
        upgrades.increment(Attribute::Luck);
        upgrades.increment(Attribute::Luck);
        upgrades.increment(Attribute::Health);

        assert_eq!(upgrades.get(Attribute::Luck), 2);
        assert_eq!(upgrades.total(), 3);
        let listed: Vec<_> = upgrades.iter().collect();
        assert_eq!(listed, vec![(Attribute::Health, 1), (Attribute::Luck, 2)]);
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let upgrades: PermanentUpgrades = serde_json::from_str(r#"{"attack": 3}"#).unwrap();
        assert_eq!(upgrades.attack, 3);
        assert_eq!(upgrades.critical_hit, 0);
    }
}
