//! Card definitions - static card data.
//!
//! A `Card` is pure data: identity, display text, and an effect descriptor.
//! What the descriptor *does* is decided by the rules engine.

use serde::{Deserialize, Serialize};

use crate::effects::CardEffect;

/// Identifier of a card definition (e.g. `"powderKeg"`).
///
/// Copies of the same card in a deck share an ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Which pool a card belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    Action,
    Loot,
    Event,
    Starter,
}

/// Static card definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    /// Display label: Action, Item, Resource, Special, Event, Setback.
    #[serde(rename = "type")]
    pub card_type: String,
    pub category: CardCategory,
    pub description: String,
    pub effect: CardEffect,
}

impl Card {
    /// Create a new card definition.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        card_type: impl Into<String>,
        category: CardCategory,
        description: impl Into<String>,
        effect: CardEffect,
    ) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            card_type: card_type.into(),
            category,
            description: description.into(),
            effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::from("gold5");
        assert_eq!(id.as_str(), "gold5");
        assert_eq!(format!("{}", id), "gold5");
    }

    #[test]
    fn test_card_wire_format() {
        let card = Card::new(
            "gold5",
            "5 Gold",
            "Resource",
            CardCategory::Loot,
            "Gain 5 gold.",
            CardEffect::Gold { value: 5 },
        );

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["id"], "gold5");
        assert_eq!(json["type"], "Resource");
        assert_eq!(json["category"], "loot");
        assert_eq!(json["effect"]["type"], "gold");
        assert_eq!(json["effect"]["value"], 5);

        let back: Card = serde_json::from_value(json).unwrap();
        assert_eq!(back, card);
    }
}
