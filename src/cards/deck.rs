//! Shuffled draw piles.
//!
//! Decks are `im::Vector`s so a snapshot shares structure with the live
//! piles instead of copying every card.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::catalog::{action_cards, event_cards, loot_cards, starter_cards};
use super::definition::Card;
use crate::core::{DeckCopies, RandomSource};

/// The four piles in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckKind {
    Action,
    Loot,
    Event,
    Starter,
}

impl DeckKind {
    pub const ALL: [DeckKind; 4] = [
        DeckKind::Action,
        DeckKind::Loot,
        DeckKind::Event,
        DeckKind::Starter,
    ];
}

impl std::fmt::Display for DeckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DeckKind::Action => "action",
            DeckKind::Loot => "loot",
            DeckKind::Event => "event",
            DeckKind::Starter => "starter",
        };
        f.write_str(name)
    }
}

/// A draw pile. The front is the top.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the top card.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Look at the top card without drawing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Card> {
        self.cards.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate from the top down.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

/// Build a deck holding `copies` of every card in `pool`, shuffled.
///
/// Fisher-Yates from the last position down, each swap partner drawn
/// uniformly from `0..=i`.
///
/// ```
/// use broadside::cards::{build_deck, loot_cards};
/// use broadside::core::GameRng;
///
/// let deck = build_deck(&loot_cards(), 5, &mut GameRng::new(1));
/// assert_eq!(deck.len(), 25);
/// ```
pub fn build_deck<R: RandomSource + ?Sized>(pool: &[Card], copies: usize, rng: &mut R) -> Deck {
    let mut cards: Vec<Card> = Vec::with_capacity(pool.len() * copies);
    for _ in 0..copies {
        cards.extend(pool.iter().cloned());
    }
    for i in (1..cards.len()).rev() {
        let j = rng.gen_index(i + 1);
        cards.swap(i, j);
    }
    cards.into_iter().collect()
}

/// All four draw piles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Decks {
    pub action: Deck,
    pub loot: Deck,
    pub event: Deck,
    pub starter: Deck,
}

impl Decks {
    /// Build and shuffle the standard piles.
    pub fn new<R: RandomSource + ?Sized>(copies: DeckCopies, rng: &mut R) -> Self {
        Self {
            action: build_deck(&action_cards(), copies.action, rng),
            loot: build_deck(&loot_cards(), copies.loot, rng),
            event: build_deck(&event_cards(), copies.event, rng),
            starter: build_deck(&starter_cards(), copies.starter, rng),
        }
    }

    #[must_use]
    pub fn get(&self, kind: DeckKind) -> &Deck {
        match kind {
            DeckKind::Action => &self.action,
            DeckKind::Loot => &self.loot,
            DeckKind::Event => &self.event,
            DeckKind::Starter => &self.starter,
        }
    }

    pub fn get_mut(&mut self, kind: DeckKind) -> &mut Deck {
        match kind {
            DeckKind::Action => &mut self.action,
            DeckKind::Loot => &mut self.loot,
            DeckKind::Event => &mut self.event,
            DeckKind::Starter => &mut self.starter,
        }
    }
}
