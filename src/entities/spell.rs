//! Spell definitions

use serde::{Deserialize, Serialize};

use super::CharacterClass;

/// Effect text marker that stuns the target for one enemy turn
pub const STUN_MARKER: &str = "Stuns enemy";

/// A castable spell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    pub id: String,
    pub name: String,
    pub mana_cost: i32,
    #[serde(default)]
    pub damage: Option<i32>,
    #[serde(default)]
    pub healing: Option<i32>,
    #[serde(default)]
    pub effect: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub class_restriction: Option<Vec<CharacterClass>>,
    #[serde(default)]
    pub level_requirement: Option<u32>,
    /// Sold by the archmage when present and non-zero
    #[serde(default)]
    pub price: Option<u32>,
}

impl Spell {
    pub fn new(id: &str, name: &str, mana_cost: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            mana_cost,
            damage: None,
            healing: None,
            effect: None,
            description: String::new(),
            class_restriction: None,
            level_requirement: None,
            price: None,
        }
    }

    pub fn damage(mut self, amount: i32) -> Self {
        self.damage = Some(amount);
        self
    }

    pub fn healing(mut self, amount: i32) -> Self {
        self.healing = Some(amount);
        self
    }

    pub fn effect(mut self, text: &str) -> Self {
        self.effect = Some(text.to_string());
        self
    }

    pub fn describe(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    pub fn classes(mut self, classes: &[CharacterClass]) -> Self {
        self.class_restriction = Some(classes.to_vec());
        self
    }

    pub fn level(mut self, requirement: u32) -> Self {
        self.level_requirement = Some(requirement);
        self
    }

    pub fn price(mut self, gold: u32) -> Self {
        self.price = Some(gold);
        self
    }

    pub fn required_level(&self) -> u32 {
        self.level_requirement.unwrap_or(1)
    }

    pub fn allows_class(&self, class: CharacterClass) -> bool {
        self.class_restriction
            .as_ref()
            .map_or(true, |classes| classes.contains(&class))
    }

    pub fn is_for_sale(&self) -> bool {
        self.price.map_or(false, |p| p > 0)
    }

    pub fn stuns(&self) -> bool {
        self.effect
            .as_deref()
            .map_or(false, |text| text.contains(STUN_MARKER))
    }
}
