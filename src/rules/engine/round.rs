//! Turn advance, round end and event cards.

use super::{GameEngine, RoundOutcome, TurnAdvance};
use crate::cards::Card;
use crate::core::{Phase, RandomSource};
use crate::effects::{CardEffect, EventCondition, GlobalEffect};
use crate::error::EngineError;
use crate::rules::victory::{Victory, WinKind};

impl<R: RandomSource> GameEngine<R> {
    /// Hand the turn to the next living player, closing the round when
    /// everyone in the turn order has had a turn.
    pub fn next_turn(&mut self) -> Result<TurnAdvance, EngineError> {
        self.require_phase(Phase::Action)?;
        loop {
            self.current_index += 1;
            let Some(id) = self.turn_order.get(self.current_index) else {
                let outcome = self.end_round()?;
                return Ok(TurnAdvance::RoundEnded { outcome });
            };
            if self.player(id).is_some_and(|p| p.is_alive()) {
                return Ok(TurnAdvance::NextPlayer { player: id.clone() });
            }
            log::debug!("skipping sunk ship {}", id);
        }
    }

    /// Close the round.
    ///
    /// Resolves storms, ticks every living player's effects (burn damage
    /// first), clears per-round flags, ticks table effects and checks the
    /// win conditions. Without a winner the next round opens, possibly
    /// with an event card, and the win conditions are checked once more
    /// after the event has struck.
    pub fn end_round(&mut self) -> Result<RoundOutcome, EngineError> {
        self.require_phase(Phase::Action)?;
        let round = self.round;
        self.record(format!("=== End of Round {} ===", round));

        self.resolve_storms();

        for seat in 0..self.players.len() {
            if !self.players[seat].is_alive() {
                continue;
            }
            let player = &mut self.players[seat];
            let tick = player.effects.tick();
            player.last_damage_taken = 0;
            player.maneuvering = false;
            if player.cannot_maneuver_next && round > player.reload_round {
                player.cannot_maneuver_next = false;
            }

            if let Some(burn) = tick {
                player.take_damage(burn.damage);
                let message = format!(
                    "{} takes {} burn damage! ({}/{} HP)",
                    player.name, burn.damage, player.ship.hp, player.ship.max_hp
                );
                let ended = burn.remaining == 0;
                let name = player.name.clone();
                self.record(message);
                if ended {
                    self.record(format!("{}'s burn effect has ended.", name));
                }
            }
        }

        self.active_effects.retain_mut(|effect| effect.tick());

        if let Some(victory) = self.check_win_conditions() {
            return Ok(self.finish(victory));
        }

        self.round += 1;
        self.current_index = 0;
        let event = if self.rng.gen_bool(self.config.event_chance) {
            self.draw_event()
        } else {
            None
        };

        // A kraken strike can sink a ship before the new round starts
        if let Some(victory) = self.check_win_conditions() {
            return Ok(self.finish(victory));
        }

        let Self { turn_order, players, seats, .. } = self;
        turn_order.retain(|id| seats.get(id).is_some_and(|&seat| players[seat].is_alive()));

        if self.config.reroll_priority_each_round {
            for player in &mut self.players {
                player.priority_roll = 0;
            }
            self.priority_rolled = false;
            self.set_phase(Phase::Priority);
        } else {
            self.set_phase(Phase::Action);
        }

        Ok(RoundOutcome::Continue { round: self.round, event })
    }

    /// Draw the top event card and announce it.
    fn draw_event(&mut self) -> Option<Card> {
        let Some(card) = self.decks.event.draw() else {
            log::warn!("event deck is empty");
            self.record("Event deck is empty!");
            return None;
        };
        self.current_event = Some(card.clone());
        self.record(format!("EVENT: {} - {}", card.name, card.description));
        if self.config.apply_event_effects {
            self.apply_event(&card);
        }
        Some(card)
    }

    fn apply_event(&mut self, card: &Card) {
        match card.effect {
            CardEffect::GlobalDamageBonus { value, duration } => {
                self.active_effects
                    .push(GlobalEffect::GlobalDamageBonus { value, duration });
            }
            CardEffect::GlobalDamageReduction { value, duration } => {
                self.active_effects
                    .push(GlobalEffect::GlobalDamageReduction { value, duration });
            }
            CardEffect::ConditionalDamage { damage, condition: EventCondition::NotManeuvering } => {
                self.active_effects.push(GlobalEffect::StormFront { damage });
            }
            CardEffect::PlunderReward { gold, plunders_needed } => {
                self.active_effects.push(GlobalEffect::PlunderBounty {
                    gold,
                    plunders_needed,
                    tallies: Vec::new(),
                });
            }
            CardEffect::RandomDamage { damage } => self.kraken_strike(&card.name, damage),
            _ => log::debug!("event {} has no table effect", card.id),
        }
    }

    /// Strike the living ship with the highest priority roll. Ties go to
    /// whoever comes first in the turn order.
    fn kraken_strike(&mut self, event: &str, damage: i32) {
        let mut chosen: Option<usize> = None;
        for id in &self.turn_order {
            let Some(&seat) = self.seats.get(id) else { continue };
            let player = &self.players[seat];
            if !player.is_alive() {
                continue;
            }
            if chosen.map_or(true, |best| player.priority_roll > self.players[best].priority_roll) {
                chosen = Some(seat);
            }
        }
        let Some(seat) = chosen else { return };
        self.event_hit(seat, event, damage);
    }

    /// Storms hit every living ship that is not maneuvering.
    fn resolve_storms(&mut self) {
        let storms: Vec<i32> = self
            .active_effects
            .iter()
            .filter_map(|e| match e {
                GlobalEffect::StormFront { damage } => Some(*damage),
                _ => None,
            })
            .collect();
        for damage in storms {
            for seat in 0..self.players.len() {
                let player = &self.players[seat];
                if player.is_alive() && !player.maneuvering {
                    self.event_hit(seat, "Storm Front", damage);
                }
            }
        }
    }

    /// Event damage, unless the ship's captain can shrug it off.
    fn event_hit(&mut self, seat: usize, event: &str, damage: i32) {
        let player = &mut self.players[seat];
        if player.ship.traits().event_shield && !player.event_shield_used {
            player.event_shield_used = true;
            let message = format!("{} slips through the {} unharmed!", player.name, event);
            self.record(message);
            return;
        }
        let lost = player.take_damage(damage);
        let message = format!(
            "{} is struck by the {} for {} damage! ({}/{} HP)",
            player.name, event, lost, player.ship.hp, player.ship.max_hp
        );
        self.record(message);
    }

    fn finish(&mut self, victory: Victory) -> RoundOutcome {
        self.set_phase(Phase::GameOver);
        let message = self.describe(&victory);
        self.record(message);
        RoundOutcome::GameOver { victory }
    }

    fn describe(&self, victory: &Victory) -> String {
        let name = victory
            .player
            .as_ref()
            .and_then(|id| self.player(id))
            .map_or("Nobody", |p| p.name.as_str());
        match victory.kind {
            WinKind::LastStanding => format!("{} is the last ship afloat and wins!", name),
            WinKind::Draw => "Every ship has sunk. The game is a draw!".to_string(),
            WinKind::MapFragments => format!("{} assembled the treasure map and wins!", name),
            WinKind::Gold => format!("{} hoarded enough gold and wins!", name),
        }
    }
}
