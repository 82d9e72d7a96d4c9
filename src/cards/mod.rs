//! Card and ship content.
//!
//! ## Key Types
//!
//! - `Card`: Static card data with an effect descriptor
//! - `Ship` / `ShipId`: Ship templates and their captain buffs
//! - `CardCatalog`: Card lookup by ID
//! - `Deck` / `Decks`: Shuffled draw piles

pub mod definition;
pub mod ship;
pub mod catalog;
pub mod deck;

pub use definition::{Card, CardCategory, CardId};
pub use ship::{random_ship, ship_by_id, ship_template, CaptainBuff, Ship, ShipId, ShipTraits};
pub use catalog::{action_cards, event_cards, loot_cards, starter_cards, CardCatalog};
pub use deck::{build_deck, Deck, DeckKind, Decks};
