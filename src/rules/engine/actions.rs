//! The five turn actions.

use super::GameEngine;
use crate::cards::DeckKind;
use crate::core::{ActionKind, ActionOutcome, DicePair, Phase, PlayerId, RandomSource, ShotReport};
use crate::effects::{attack_bonus, attack_reduction, GlobalEffect, PlunderTally};
use crate::error::EngineError;
use crate::rules::combat::{resolve_damage, DamageInputs};

impl<R: RandomSource> GameEngine<R> {
    /// Take the current player's turn action.
    ///
    /// A trapped player (`skip_next_turn`) loses the turn instead: the flag
    /// is consumed and [`ActionOutcome::Skipped`] returned. The turn does
    /// not advance by itself; call [`next_turn`](Self::next_turn).
    ///
    /// The engine does not count actions: the current player may act again
    /// until `next_turn` is called. Holding each player to one action per
    /// turn is up to the driver.
    pub fn perform_action(
        &mut self,
        id: &PlayerId,
        action: ActionKind,
        target: Option<&PlayerId>,
    ) -> Result<ActionOutcome, EngineError> {
        self.require_phase(Phase::Action)?;
        let seat = self.seat(id)?;
        if self.turn_order.get(self.current_index) != Some(id) {
            return Err(EngineError::NotYourTurn);
        }
        self.require_afloat(seat)?;

        if self.players[seat].skip_next_turn {
            self.players[seat].skip_next_turn = false;
            let message = format!("{} is trapped and skips their turn!", self.players[seat].name);
            self.record(message);
            return Ok(ActionOutcome::Skipped);
        }
        if self.players[seat].effects.is_disabled(action) {
            return Err(EngineError::ActionDisabled(action));
        }

        let outcome = match action {
            ActionKind::Fire => self.fire(seat, target)?,
            ActionKind::Repair => self.repair(seat)?,
            ActionKind::Plunder => self.plunder(seat)?,
            ActionKind::Reload => self.reload(seat),
            ActionKind::Maneuver => self.maneuver(seat)?,
        };
        self.players[seat].last_action = Some(action);
        Ok(outcome)
    }

    fn fire(&mut self, seat: usize, target: Option<&PlayerId>) -> Result<ActionOutcome, EngineError> {
        if self.players[seat].ammunition == 0 {
            return Err(EngineError::NoAmmunition);
        }
        let victim = self.living_target(seat, target)?;

        let dice = DicePair::roll(&mut self.rng);
        let table_bonus = attack_bonus(&self.active_effects);
        let table_reduction = attack_reduction(&self.active_effects);
        let base_maneuver = self.config.base_maneuver_reduction;
        let critical_bonus = self.config.critical_maneuver_bonus;

        let (shooter, defender) = Self::pair_mut(&mut self.players, seat, victim);
        shooter.ammunition -= 1;

        let (bonus, recoil) = shooter.effects.take_damage_bonus().unwrap_or((0, None));
        let multiplier = shooter.effects.take_damage_multiplier().unwrap_or(1.0);
        let penalty = shooter.effects.take_damage_penalty().unwrap_or(0);

        let maneuver = defender.maneuvering.then(|| {
            let mut reduction = defender.ship.traits().maneuver_reduction.unwrap_or(base_maneuver);
            if defender.has_maneuver_bonus {
                reduction += critical_bonus;
                defender.has_maneuver_bonus = false;
            }
            reduction
        });
        let plating = defender.effects.take_damage_reduction();

        let inputs = DamageInputs {
            dice,
            attack_bonus: shooter.ship.attack_bonus,
            bonus: bonus + table_bonus - penalty,
            multiplier,
            defense: defender.ship.defense,
            maneuver_reduction: maneuver,
            damage_reduction: plating,
            global_reduction: table_reduction,
        };
        let damage = resolve_damage(&inputs);
        defender.take_damage(damage);
        defender.last_damage_taken = damage;

        let retaliation = if damage > 0 {
            shooter.take_damage(defender.ship.traits().retaliation_damage)
        } else {
            0
        };
        let burn = shooter.effects.take_burn_shot();
        if let Some((burn_damage, duration)) = burn {
            defender.effects.ignite(burn_damage, duration);
        }
        let recoil = shooter.take_damage(recoil.unwrap_or(0));

        let shooter_name = shooter.name.clone();
        let shooter_hp = (shooter.ship.hp, shooter.ship.max_hp);
        let target_name = defender.name.clone();
        let target_hp = (defender.ship.hp, defender.ship.max_hp);
        let target_id = defender.id.clone();

        if let Some(reduction) = maneuver {
            self.record(format!(
                "{} maneuvered and reduced damage by {}%!",
                target_name,
                (reduction * 100.0).round()
            ));
        }
        if plating.is_some() {
            self.record(format!("{}'s hull plating absorbed some damage!", target_name));
        }
        self.record(format!(
            "{} fires at {}! Rolled {}, dealt {} damage! ({}/{} HP remaining)",
            shooter_name, target_name, dice, damage, target_hp.0, target_hp.1
        ));
        if retaliation > 0 {
            self.record(format!(
                "Vengeful Wrath! {} takes {} retaliation damage! ({}/{} HP)",
                shooter_name, retaliation, shooter_hp.0, shooter_hp.1
            ));
        }
        if let Some((burn_damage, duration)) = burn {
            self.record(format!(
                "{} is burning! {} damage per round for {} rounds.",
                target_name, burn_damage, duration
            ));
        }
        if recoil > 0 {
            self.record(format!(
                "Powder Keg recoil! {} takes {} damage! ({}/{} HP)",
                shooter_name, recoil, shooter_hp.0, shooter_hp.1
            ));
        }

        Ok(ActionOutcome::Fired(ShotReport {
            target: target_id,
            dice,
            damage,
            retaliation,
            recoil,
            burn,
        }))
    }

    fn repair(&mut self, seat: usize) -> Result<ActionOutcome, EngineError> {
        let round = self.round;
        let player = &self.players[seat];
        if player.ship.hp >= player.ship.max_hp {
            return Err(EngineError::AlreadyAtFullHp);
        }
        let repaired_now = player.last_repair_round == round;
        let repaired_last_round = player.last_repair_round > 0
            && player.last_repair_round + 1 == round
            && player.last_damage_taken == 0;
        if repaired_now || repaired_last_round {
            return Err(EngineError::RepairCooldown);
        }

        let dice = DicePair::roll(&mut self.rng);
        let player = &mut self.players[seat];
        let amount = i32::from(dice.total()) + player.ship.traits().repair_bonus;
        let healed = player.heal(amount);
        player.deactivate_crew();
        player.last_repair_round = round;

        let message = format!(
            "{} repairs! Rolled {}, healed {} HP! ({}/{} HP)",
            player.name, dice, healed, player.ship.hp, player.ship.max_hp
        );
        self.record(message);
        Ok(ActionOutcome::Repaired { healed, dice })
    }

    fn plunder(&mut self, seat: usize) -> Result<ActionOutcome, EngineError> {
        let player = &self.players[seat];
        let room = self.config.max_hand_size.saturating_sub(player.hand.len());
        let draws = player
            .ship
            .traits()
            .plunder_draws
            .min(room)
            .min(self.decks.loot.len());
        if draws == 0 {
            log::warn!(
                "{} cannot plunder: {} loot left, room for {}",
                player.name,
                self.decks.loot.len(),
                room
            );
            return Err(EngineError::LootUnavailable);
        }

        let cards: Vec<_> = (0..draws)
            .filter_map(|_| self.draw_into_hand(seat, DeckKind::Loot))
            .collect();
        let message = format!(
            "{} plunders and draws {} loot card(s)!",
            self.players[seat].name,
            cards.len()
        );
        self.record(message);

        let bounty = self.tally_plunder(seat);
        Ok(ActionOutcome::Plundered { cards, bounty })
    }

    /// Count a plunder toward an open merchant bounty and pay it out once
    /// the player reaches the target.
    fn tally_plunder(&mut self, seat: usize) -> Option<u32> {
        let id = self.players[seat].id.clone();
        let position = self
            .active_effects
            .iter()
            .position(|e| matches!(e, GlobalEffect::PlunderBounty { .. }))?;

        let GlobalEffect::PlunderBounty { gold, plunders_needed, tallies } =
            &mut self.active_effects[position]
        else {
            return None;
        };
        let count = match tallies.iter_mut().find(|t| t.player == id) {
            Some(tally) => {
                tally.count += 1;
                tally.count
            }
            None => {
                tallies.push(PlunderTally { player: id, count: 1 });
                1
            }
        };
        if count < *plunders_needed {
            return None;
        }

        let gold = *gold;
        self.active_effects.remove(position);
        self.players[seat].gold += gold;
        let message = format!("{} claims the merchant's bounty of {} gold!", self.players[seat].name, gold);
        self.record(message);
        Some(gold)
    }

    fn reload(&mut self, seat: usize) -> ActionOutcome {
        let amount = self.config.reload_amount;
        let round = self.round;
        let player = &mut self.players[seat];
        player.ammunition += amount;
        player.cannot_maneuver_next = true;
        player.reload_round = round;

        let total = player.ammunition;
        let message = format!("{} reloads and gains {} ammunition! (Total: {})", player.name, amount, total);
        self.record(message);
        ActionOutcome::Reloaded { gained: amount, total }
    }

    fn maneuver(&mut self, seat: usize) -> Result<ActionOutcome, EngineError> {
        if self.players[seat].cannot_maneuver_next {
            return Err(EngineError::ManeuverBlocked);
        }

        let dice = DicePair::roll(&mut self.rng);
        let critical = dice.total() >= self.config.critical_maneuver_threshold;
        let player = &mut self.players[seat];
        player.maneuvering = true;
        if critical {
            player.has_maneuver_bonus = true;
        }

        let message = if critical {
            format!(
                "{} maneuvers expertly! Rolled {}={} - CRITICAL! Extra damage reduction!",
                player.name,
                dice,
                dice.total()
            )
        } else {
            format!("{} maneuvers to evade! Rolled {}={}", player.name, dice, dice.total())
        };
        self.record(message);
        Ok(ActionOutcome::Maneuvered { dice, critical })
    }
}
