//! Playing cards from hand.

use super::GameEngine;
use crate::cards::CardId;
use crate::core::{CardOutcome, DicePair, Phase, PlayerId, RandomSource};
use crate::effects::{ActiveEffect, CardEffect};
use crate::error::EngineError;

impl<R: RandomSource> GameEngine<R> {
    /// Play a card from a player's hand.
    ///
    /// Cards may be played by any living player during the action phase,
    /// not only the one whose turn it is. Cards that need a target are
    /// refused before the card leaves the hand.
    pub fn play_card(
        &mut self,
        id: &PlayerId,
        card: &CardId,
        target: Option<&PlayerId>,
    ) -> Result<CardOutcome, EngineError> {
        self.require_phase(Phase::Action)?;
        let seat = self.seat(id)?;
        self.require_afloat(seat)?;
        let position = self.players[seat]
            .find_card(card)
            .ok_or(EngineError::CardNotInHand)?;

        let victim = if self.players[seat].hand[position].effect.needs_target() {
            Some(self.living_target(seat, target)?)
        } else {
            None
        };

        let card = self.players[seat].hand.remove(position);
        let message = format!("{} plays {}!", self.players[seat].name, card.name);
        self.record(message);

        let (message, dice) = match victim {
            Some(victim) => (self.apply_to_target(victim, &card.effect), None),
            None => self.apply_to_self(seat, &card.effect),
        };
        Ok(CardOutcome { card, message, dice })
    }

    fn apply_to_self(&mut self, seat: usize, effect: &CardEffect) -> (String, Option<DicePair>) {
        let fragments_to_win = self.config.map_fragments_to_win;
        let Self { players, rng, .. } = self;
        let player = &mut players[seat];
        let mut dice = None;

        let message = match *effect {
            CardEffect::DamageBonus { value, recoil } => {
                player.effects.push(ActiveEffect::DamageBonus { value, recoil });
                format!("Next attack deals +{} damage!", value)
            }
            CardEffect::DamageMultiplier { value } => {
                player.effects.push(ActiveEffect::DamageMultiplier { value });
                format!("Next attack deals {}% more damage!", ((value - 1.0) * 100.0).round())
            }
            CardEffect::DamagePenalty { value, duration } => {
                player.effects.push(ActiveEffect::DamagePenalty { value, duration });
                format!("Next attack deals {} less damage.", value)
            }
            CardEffect::Burn { damage, duration, bonus_damage } => {
                player.effects.push(ActiveEffect::BurnShot { damage, duration, bonus_damage });
                "Next attack applies burn effect!".to_string()
            }
            CardEffect::DamageReduction { value, duration } => {
                player.effects.push(ActiveEffect::DamageReduction { value, duration });
                format!("Next incoming damage reduced by {}%!", (value * 100.0).round())
            }
            CardEffect::Heal { .. } => {
                let roll = DicePair::roll(rng);
                dice = Some(roll);
                let healed = player.heal(i32::from(roll.total()));
                format!("Healed {} HP! (Rolled {})", healed, roll)
            }
            CardEffect::HealAndCleanse { .. } => {
                let roll = DicePair::roll(rng);
                dice = Some(roll);
                let healed = player.heal(i32::from(roll.total()));
                player.effects.cleanse();
                format!("Healed {} HP (Rolled {}) and cleansed all debuffs!", healed, roll)
            }
            CardEffect::Damage { value } => {
                let lost = player.take_damage(value);
                format!("Took {} damage!", lost)
            }
            CardEffect::MaxHpIncrease { value } => {
                player.ship.max_hp += value;
                player.ship.hp += value;
                format!("Maximum HP increased by {}!", value)
            }
            CardEffect::Ammunition { value } => {
                player.ammunition += value;
                format!("Gained {} ammunition!", value)
            }
            CardEffect::Gold { value } => {
                player.gold += value;
                format!("Gained {} gold!", value)
            }
            CardEffect::AddCrew { value } => {
                for _ in 0..value {
                    player.add_crew();
                }
                if value == 1 {
                    "Added 1 crew member!".to_string()
                } else {
                    format!("Added {} crew members!", value)
                }
            }
            CardEffect::MapFragment => {
                player.map_fragments += 1;
                format!("Found a map fragment! ({}/{})", player.map_fragments, fragments_to_win)
            }
            CardEffect::ManeuverBonus { .. } => {
                player.has_maneuver_bonus = true;
                "Next maneuver is more effective!".to_string()
            }
            CardEffect::Discard => "Card discarded.".to_string(),
            CardEffect::PerfectManeuver { .. }
            | CardEffect::CancelAttack
            | CardEffect::NegateDebuff { .. }
            | CardEffect::PeekLoot { .. }
            | CardEffect::DisableManeuver { .. }
            | CardEffect::Undodgeable { .. }
            | CardEffect::DisableRerolls { .. }
            | CardEffect::SkipTurn { .. }
            | CardEffect::DiscardRandom
            | CardEffect::DisableAction { .. }
            | CardEffect::ConditionalDamage { .. }
            | CardEffect::RandomDamage { .. }
            | CardEffect::PlunderReward { .. }
            | CardEffect::GlobalDamageBonus { .. }
            | CardEffect::GlobalDamageReduction { .. } => "Card effect applied!".to_string(),
        };
        (message, dice)
    }

    fn apply_to_target(&mut self, victim: usize, effect: &CardEffect) -> String {
        match *effect {
            CardEffect::SkipTurn { .. } => {
                let target = &mut self.players[victim];
                target.skip_next_turn = true;
                format!("{} will skip their next turn!", target.name)
            }
            CardEffect::DiscardRandom => {
                let len = self.players[victim].hand.len();
                if len == 0 {
                    return format!("{} has no cards to discard.", self.players[victim].name);
                }
                let index = self.rng.gen_index(len);
                let target = &mut self.players[victim];
                let discarded = target.hand.remove(index);
                format!("{} discarded {}!", target.name, discarded.name)
            }
            CardEffect::DisableAction { action, duration } => {
                let target = &mut self.players[victim];
                target.effects.push(ActiveEffect::ActionDisabled { action, duration });
                format!("{} cannot {} next turn!", target.name, action)
            }
            _ => "Card effect applied!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{id, started};
    use super::*;
    use crate::cards::{action_cards, loot_cards, starter_cards, Card};
    use crate::core::{ActionKind, ScriptedRng};

    fn find(pool: Vec<Card>, card: &str) -> Card {
        pool.into_iter().find(|c| c.id.as_str() == card).unwrap()
    }

    fn give(engine: &mut GameEngine<ScriptedRng>, seat: usize, card: Card) -> CardId {
        let card_id = card.id.clone();
        engine.players[seat].hand.push(card);
        card_id
    }

    #[test]
    fn test_card_not_in_hand() {
        let mut engine = started(ScriptedRng::new(0));
        assert_eq!(
            engine.play_card(&id("a"), &CardId::from("powderKeg"), None),
            Err(EngineError::CardNotInHand)
        );
    }

    #[test]
    fn test_attack_modifier_goes_to_effects() {
        let mut engine = started(ScriptedRng::new(0));
        let keg = give(&mut engine, 0, find(action_cards(), "powderKeg"));
        let hand = engine.players[0].hand.len();

        let outcome = engine.play_card(&id("a"), &keg, None).unwrap();
        assert_eq!(outcome.message, "Next attack deals +10 damage!");
        assert_eq!(engine.players[0].hand.len(), hand - 1);
        assert_eq!(
            engine.players[0].effects.iter().last(),
            Some(&ActiveEffect::DamageBonus { value: 10, recoil: Some(5) })
        );
    }

    #[test]
    fn test_out_of_turn_play_is_allowed() {
        let mut engine = started(ScriptedRng::new(0));
        let gold = give(&mut engine, 2, find(loot_cards(), "gold5"));
        engine.play_card(&id("c"), &gold, None).unwrap();
        assert_eq!(engine.players[2].gold, 5);
    }

    #[test]
    fn test_heal_rolls_two_dice() {
        let mut engine = started(ScriptedRng::new(0));
        engine.players[0].ship.hp = 60;
        let rum = give(&mut engine, 0, find(starter_cards(), "starterRumFlask"));
        engine.rng_mut().push_dice([6, 5]);
        let outcome = engine.play_card(&id("a"), &rum, None).unwrap();
        assert_eq!(outcome.dice, Some(DicePair::new(6, 5)));
        assert_eq!(engine.players[0].ship.hp, 71);
    }

    #[test]
    fn test_barrels_of_rum_cleanse() {
        let mut engine = started(ScriptedRng::new(0));
        engine.players[0].ship.hp = 99;
        engine.players[0].effects.ignite(2, 3);
        engine.players[0]
            .effects
            .push(ActiveEffect::DamagePenalty { value: 3, duration: 1 });
        let rum = give(&mut engine, 0, find(loot_cards(), "barrelsOfRum"));
        engine.rng_mut().push_dice([4, 4]);
        engine.play_card(&id("a"), &rum, None).unwrap();
        assert_eq!(engine.players[0].ship.hp, 100);
        assert!(engine.players[0].effects.is_empty());
    }

    #[test]
    fn test_targeted_card_needs_a_living_target() {
        let mut engine = started(ScriptedRng::new(0));
        let net = give(&mut engine, 0, find(action_cards(), "trapNet"));
        assert_eq!(engine.play_card(&id("a"), &net, None), Err(EngineError::TargetRequired));
        assert_eq!(
            engine.play_card(&id("a"), &net, Some(&id("a"))),
            Err(EngineError::InvalidTarget)
        );
        engine.players[1].ship.hp = 0;
        assert_eq!(
            engine.play_card(&id("a"), &net, Some(&id("b"))),
            Err(EngineError::InvalidTarget)
        );
        assert!(engine.players[0].find_card(&net).is_some());

        engine.play_card(&id("a"), &net, Some(&id("c"))).unwrap();
        assert!(engine.players[2].skip_next_turn);
    }

    #[test]
    fn test_sabotage_discards_random_card() {
        let mut engine = started(ScriptedRng::new(0));
        let sabotage = give(&mut engine, 0, find(action_cards(), "sabotage"));
        let before = engine.players[1].hand.len();
        engine.rng_mut().push_index(0);
        let doomed = engine.players[1].hand[0].name.clone();

        let outcome = engine.play_card(&id("a"), &sabotage, Some(&id("b"))).unwrap();
        assert_eq!(outcome.message, format!("Bart discarded {}!", doomed));
        assert_eq!(engine.players[1].hand.len(), before - 1);
    }

    #[test]
    fn test_chain_shot_disables_maneuver() {
        let mut engine = started(ScriptedRng::new(0));
        let chain = give(&mut engine, 0, find(action_cards(), "chainShot"));
        engine.play_card(&id("a"), &chain, Some(&id("b"))).unwrap();
        assert!(engine.players[1].effects.is_disabled(ActionKind::Maneuver));
    }

    #[test]
    fn test_reinforced_hull_raises_both() {
        let mut engine = started(ScriptedRng::new(0));
        let hull = give(&mut engine, 1, find(action_cards(), "reinforcedHull"));
        engine.play_card(&id("b"), &hull, None).unwrap();
        assert_eq!(engine.players[1].ship.max_hp, 120);
        assert_eq!(engine.players[1].ship.hp, 120);
    }

    #[test]
    fn test_fire_card_loads_a_burn_shot() {
        let mut engine = started(ScriptedRng::new(0));
        let fire = give(&mut engine, 0, find(action_cards(), "fireShot"));
        engine.play_card(&id("a"), &fire, None).unwrap();
        assert_eq!(engine.players[0].effects.burn(), Some((2, 3)));
        assert_eq!(engine.players[0].effects.take_burn_shot(), Some((2, 3)));
    }

    #[test]
    fn test_held_fire_shot_scorches_its_holder() {
        let mut engine = started(ScriptedRng::new(0));
        let fire = give(&mut engine, 0, find(action_cards(), "fireShot"));
        engine.play_card(&id("a"), &fire, None).unwrap();

        engine.end_round().unwrap();
        assert_eq!(engine.players[0].ship.hp, 98);
        assert_eq!(engine.players[0].effects.burn(), Some((2, 2)));
        assert!(engine
            .log()
            .iter()
            .any(|e| e.message == "Anne takes 2 burn damage! (98/100 HP)"));
    }
}
