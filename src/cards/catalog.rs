//! The four card pools and a lookup registry over them.

use rustc_hash::FxHashMap;

use super::definition::{Card, CardCategory, CardId};
use crate::core::ActionKind;
use crate::effects::{CardEffect, EventCondition};

fn action(id: &str, name: &str, ty: &str, text: &str, effect: CardEffect) -> Card {
    Card::new(id, name, ty, CardCategory::Action, text, effect)
}

fn loot(id: &str, name: &str, ty: &str, text: &str, effect: CardEffect) -> Card {
    Card::new(id, name, ty, CardCategory::Loot, text, effect)
}

fn event(id: &str, name: &str, text: &str, effect: CardEffect) -> Card {
    Card::new(id, name, "Event", CardCategory::Event, text, effect)
}

fn starter(id: &str, name: &str, ty: &str, text: &str, effect: CardEffect) -> Card {
    Card::new(id, name, ty, CardCategory::Starter, text, effect)
}

/// Action and item cards.
#[must_use]
pub fn action_cards() -> Vec<Card> {
    use CardEffect as E;
    vec![
        action("enhancedCannonballs", "Enhanced Cannonballs", "Action",
            "Adds +3 damage to your next attack.",
            E::DamageBonus { value: 3, recoil: None }),
        action("explosiveShell", "Explosive Shell", "Action",
            "Your next attack deals +50% damage.",
            E::DamageMultiplier { value: 1.5 }),
        action("chainShot", "Chain Shot", "Action",
            "Target loses their Maneuver action on their next turn.",
            E::DisableAction { action: ActionKind::Maneuver, duration: 1 }),
        action("fireShot", "Fire Shot", "Action",
            "Your next attack applies Burn (2 damage for 3 rounds).",
            E::Burn { damage: 2, duration: 3, bonus_damage: 2 }),
        action("hullPlating", "Hull Plating", "Item",
            "Reduce the next incoming damage by 50%.",
            E::DamageReduction { value: 0.5, duration: 1 }),
        action("reinforcedHull", "Reinforced Hull", "Item",
            "Permanently increase your maximum HP by 10.",
            E::MaxHpIncrease { value: 10 }),
        action("evasiveHelmsman", "Evasive Helmsman", "Item",
            "Your next Maneuver blocks all additional effects (Burn, Chain, Sabotage).",
            E::PerfectManeuver { duration: 1 }),
        action("surgeon", "Surgeon", "Item",
            "Recover HP (roll two dice).",
            E::Heal { value: 15 }),
        action("extraCrew", "Extra Crew", "Item",
            "Gain 1 crew token (active if capacity allows, otherwise becomes inactive).",
            E::AddCrew { value: 1 }),
        action("smokeBomb", "Smoke Bomb", "Item",
            "Cancel an incoming attack completely.",
            E::CancelAttack),
        action("trapNet", "Trap Net", "Action",
            "Target player skips their next turn.",
            E::SkipTurn { duration: 1 }),
        action("spyglass", "Spyglass", "Item",
            "Look at the top two Loot cards, keep one.",
            E::PeekLoot { count: 2 }),
        action("sabotage", "Sabotage", "Action",
            "Target discards one random card.",
            E::DiscardRandom),
        action("powderKeg", "Powder Keg", "Item",
            "Your next attack gains +10 damage but you take 5 damage in recoil.",
            E::DamageBonus { value: 10, recoil: Some(5) }),
        action("anchorDrop", "Anchor Drop", "Action",
            "Prevent all Maneuver and movement-related effects next round.",
            E::DisableManeuver { global: true, duration: 1 }),
    ]
}

/// Loot cards drawn by Plunder.
#[must_use]
pub fn loot_cards() -> Vec<Card> {
    use CardEffect as E;
    vec![
        loot("gold5", "5 Gold", "Resource", "Gain 5 gold.", E::Gold { value: 5 }),
        loot("barrelsOfRum", "Barrels of Rum", "Resource",
            "Heal HP (roll two dice) and remove all debuffs (Burn, Chain, etc.).",
            E::HealAndCleanse { value: 10 }),
        loot("ammunitionCrate", "Ammunition Crate", "Resource",
            "Gain 4 ammunition tokens.",
            E::Ammunition { value: 4 }),
        loot("reinforcedRope", "Reinforced Rope", "Item",
            "Negate the next Trap Net or Sabotage used on you.",
            E::NegateDebuff { duration: 1 }),
        loot("treasureMapFragment", "Treasure Map Fragment", "Special",
            "Collect three fragments to win the game.",
            E::MapFragment),
    ]
}

/// Event cards drawn between rounds.
#[must_use]
pub fn event_cards() -> Vec<Card> {
    use CardEffect as E;
    vec![
        event("stormFront", "Storm Front",
            "All ships take 5 damage unless they choose Maneuver next turn.",
            E::ConditionalDamage { damage: 5, condition: EventCondition::NotManeuvering }),
        event("krakenTentacle", "Kraken Tentacle",
            "Randomly deals 12 damage to one ship (highest roll is hit).",
            E::RandomDamage { damage: 12 }),
        event("merchantShip", "Merchant Ship",
            "First player to Plunder twice gains 10 gold.",
            E::PlunderReward { gold: 10, plunders_needed: 2 }),
        event("ghostShip", "Ghost Ship",
            "All attacks deal +5 damage this round.",
            E::GlobalDamageBonus { value: 5, duration: 1 }),
        event("calmWaters", "Calm Waters",
            "All damage this round is reduced by 50%.",
            E::GlobalDamageReduction { value: 0.5, duration: 1 }),
    ]
}

/// Starter cards dealt at the beginning of the game, good and bad.
#[must_use]
pub fn starter_cards() -> Vec<Card> {
    use CardEffect as E;
    vec![
        starter("starterAmmoCrate", "Ammunition Crate", "Resource",
            "Gain 2 ammunition tokens.", E::Ammunition { value: 2 }),
        starter("starterHullPatch", "Hull Patch", "Item",
            "Restore HP (roll two dice).", E::Heal { value: 5 }),
        starter("starterCrewMate", "Crew Mate", "Item",
            "Gain 1 crew token.", E::AddCrew { value: 1 }),
        starter("starterWeakCannons", "Weak Cannonballs", "Action",
            "Adds +1 damage to your next attack.", E::DamageBonus { value: 1, recoil: None }),
        starter("starterSpyglass", "Spyglass Peek", "Item",
            "Look at the top Loot card.", E::PeekLoot { count: 1 }),
        starter("starterArmorPlating", "Basic Armor Plating", "Item",
            "Reduce next incoming damage by 20%.", E::DamageReduction { value: 0.2, duration: 1 }),
        starter("starterGrapplingHook", "Grappling Hook", "Action",
            "Your next attack cannot be dodged by Maneuver.", E::Undodgeable { duration: 1 }),
        starter("starterWindGust", "Wind Gust", "Item",
            "Your next Maneuver is more effective.", E::ManeuverBonus { value: 0.1, duration: 1 }),
        starter("starterRumFlask", "Rum Flask", "Resource",
            "Restore HP (roll two dice).", E::Heal { value: 3 }),
        starter("starterGold2", "2 Gold", "Resource",
            "Gain 2 gold.", E::Gold { value: 2 }),
        starter("starterLeakyBarrel", "Leaky Barrel", "Setback",
            "Take 2 damage from spoiled supplies.", E::Damage { value: 2 }),
        starter("starterJammedCannon", "Jammed Cannon", "Setback",
            "Your first attack deals -2 damage.", E::DamagePenalty { value: 2, duration: 1 }),
        starter("starterLazyCrew", "Lazy Crew", "Setback",
            "Cannot use crew rerolls on your first turn.", E::DisableRerolls { duration: 1 }),
        starter("starterWetGunpowder", "Wet Gunpowder", "Setback",
            "Your first attack deals -3 damage.", E::DamagePenalty { value: 3, duration: 1 }),
        starter("starterRottenFood", "Rotten Food", "Setback",
            "Discard this card immediately.", E::Discard),
    ]
}

/// Lookup over every card in every pool.
///
/// ```
/// use broadside::cards::{CardCatalog, CardId};
///
/// let catalog = CardCatalog::standard();
/// let keg = catalog.card(&CardId::from("powderKeg")).unwrap();
/// assert_eq!(keg.name, "Powder Keg");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Card>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the four standard pools.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for card in action_cards()
            .into_iter()
            .chain(loot_cards())
            .chain(event_cards())
            .chain(starter_cards())
        {
            catalog.register(card);
        }
        catalog
    }

    /// Register a card. A card with the same ID is replaced and returned.
    pub fn register(&mut self, card: Card) -> Option<Card> {
        self.cards.insert(card.id.clone(), card)
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Cards of one category (unordered).
    pub fn by_category(&self, category: CardCategory) -> impl Iterator<Item = &Card> {
        self.cards.values().filter(move |c| c.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_sizes() {
        assert_eq!(action_cards().len(), 15);
        assert_eq!(loot_cards().len(), 5);
        assert_eq!(event_cards().len(), 5);
        assert_eq!(starter_cards().len(), 15);
    }

    #[test]
    fn test_categories_match_pool() {
        assert!(action_cards().iter().all(|c| c.category == CardCategory::Action));
        assert!(loot_cards().iter().all(|c| c.category == CardCategory::Loot));
        assert!(event_cards().iter().all(|c| c.category == CardCategory::Event));
        assert!(starter_cards().iter().all(|c| c.category == CardCategory::Starter));
    }

    #[test]
    fn test_standard_catalog_ids_are_unique() {
        let catalog = CardCatalog::standard();
        assert_eq!(catalog.len(), 40);
        assert!(catalog.contains(&CardId::from("treasureMapFragment")));
        assert!(!catalog.contains(&CardId::from("blackSpot")));
        assert_eq!(catalog.by_category(CardCategory::Event).count(), 5);
    }

    #[test]
    fn test_register_replaces() {
        let mut catalog = CardCatalog::new();
        assert!(catalog.is_empty());
        let gold = loot_cards().remove(0);
        assert!(catalog.register(gold.clone()).is_none());
        assert_eq!(catalog.register(gold.clone()), Some(gold));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_powder_keg_carries_recoil() {
        let catalog = CardCatalog::standard();
        let keg = catalog.card(&CardId::from("powderKeg")).unwrap();
        assert_eq!(keg.effect, CardEffect::DamageBonus { value: 10, recoil: Some(5) });
    }
}
