//! End-to-end engine tests: setup, priority, turn flow, cards, loot and
//! the win conditions.

use broadside::cards::{loot_cards, CardId, ShipId};
use broadside::core::{
    ActionKind, ActionOutcome, GameConfig, GameRng, GameSnapshot, Phase, PlayerId, ScriptedRng,
};
use broadside::error::EngineError;
use broadside::rules::{GameEngine, PlayerSetup, RoundOutcome, TurnAdvance, Victory, WinKind};

fn pid(s: &str) -> PlayerId {
    PlayerId::from(s)
}

fn fleet() -> Vec<PlayerSetup> {
    vec![
        PlayerSetup::new("anne", "Anne", ShipId::BlackSerpent),
        PlayerSetup::new("bart", "Bart", ShipId::GoldenHarpoon),
        PlayerSetup::new("cora", "Cora", ShipId::AzureWave),
    ]
}

/// Three captains in the action phase, turn order = seat order.
fn start(config: GameConfig) -> GameEngine<ScriptedRng> {
    let mut engine = GameEngine::new(config, ScriptedRng::new(11));
    engine.initialize_game(&fleet()).unwrap();
    engine.rng_mut().push_dice([6, 5, 4, 3, 2, 1]);
    for id in ["anne", "bart", "cora"] {
        engine.roll_priority(&pid(id)).unwrap();
    }
    engine.determine_turn_order().unwrap();
    engine
}

fn quiet() -> GameConfig {
    GameConfig::default().with_event_chance(0.0)
}

fn restore(engine: &mut GameEngine<ScriptedRng>, snapshot: GameSnapshot) -> GameEngine<ScriptedRng> {
    let rng = engine.rng_mut().clone();
    GameEngine::restore(snapshot, engine.config().clone(), rng).unwrap()
}

/// A whole game can be set up and played through a round with a real RNG.
#[test]
fn test_seeded_game_plays_a_round() {
    let mut engine = GameEngine::with_seed(quiet(), 2024);
    engine.initialize_game(&fleet()).unwrap();
    for id in ["anne", "bart", "cora"] {
        let roll = engine.roll_priority(&pid(id)).unwrap();
        assert_eq!(roll.total, roll.dice.total());
        assert!((2..=12).contains(&roll.total));
    }
    engine.determine_turn_order().unwrap();
    assert_eq!(engine.turn_order().len(), 3);

    for _ in 0..3 {
        let current = engine.current_player().unwrap().id.clone();
        engine.perform_action(&current, ActionKind::Reload, None).unwrap();
        engine.next_turn().unwrap();
    }
    assert_eq!(engine.round(), 2);
    assert!(engine.players().iter().all(|p| p.ammunition == 5));
}

/// Nothing but priority rolls are accepted before the turn order exists.
#[test]
fn test_actions_wait_for_turn_order() {
    let mut engine = GameEngine::with_seed(quiet(), 1);
    engine.initialize_game(&fleet()).unwrap();
    assert_eq!(
        engine.perform_action(&pid("anne"), ActionKind::Reload, None),
        Err(EngineError::WrongPhase { expected: Phase::Action, actual: Phase::Priority })
    );
    assert_eq!(
        engine.play_card(&pid("anne"), &CardId::from("gold5"), None),
        Err(EngineError::WrongPhase { expected: Phase::Action, actual: Phase::Priority })
    );
    assert!(engine.current_player().is_none());
}

/// Action names arrive as strings from the driver.
#[test]
fn test_action_names_parse() {
    assert_eq!("plunder".parse::<ActionKind>(), Ok(ActionKind::Plunder));
    assert_eq!(
        "board".parse::<ActionKind>(),
        Err(EngineError::UnknownAction("board".to_string()))
    );
}

/// Golden Harpoon draws two loot cards, everyone else one.
#[test]
fn test_plunder_draw_counts() {
    let mut engine = start(quiet());
    let loot_before = engine.decks().loot.len();

    let ActionOutcome::Plundered { cards, .. } = engine
        .perform_action(&pid("anne"), ActionKind::Plunder, None)
        .unwrap()
    else {
        panic!("expected loot");
    };
    assert_eq!(cards.len(), 1);
    engine.next_turn().unwrap();

    let ActionOutcome::Plundered { cards, .. } = engine
        .perform_action(&pid("bart"), ActionKind::Plunder, None)
        .unwrap()
    else {
        panic!("expected loot");
    };
    assert_eq!(cards.len(), 2);
    assert_eq!(engine.player(&pid("bart")).unwrap().hand.len(), 5);
    assert_eq!(engine.decks().loot.len(), loot_before - 3);
}

/// Plunder fails cleanly when there is no room or no loot.
#[test]
fn test_plunder_refusals() {
    let mut engine = start(quiet().with_max_hand_size(3));
    let before = engine.snapshot();
    assert_eq!(
        engine.perform_action(&pid("anne"), ActionKind::Plunder, None),
        Err(EngineError::LootUnavailable)
    );
    assert_eq!(engine.snapshot(), before);

    let mut empty = start(quiet());
    let mut snapshot = empty.snapshot();
    snapshot.decks.loot = Default::default();
    let mut empty = restore(&mut empty, snapshot);
    assert_eq!(
        empty.perform_action(&pid("anne"), ActionKind::Plunder, None),
        Err(EngineError::LootUnavailable)
    );
    assert_eq!(empty.player(&pid("anne")).unwrap().last_action, None);
}

/// Reloading blocks the next maneuver, and only that one.
#[test]
fn test_reload_then_maneuver() {
    let mut engine = start(quiet());
    let outcome = engine.perform_action(&pid("anne"), ActionKind::Reload, None).unwrap();
    assert_eq!(outcome, ActionOutcome::Reloaded { gained: 2, total: 5 });
    for _ in 0..3 {
        engine.next_turn().unwrap();
    }

    assert_eq!(
        engine.perform_action(&pid("anne"), ActionKind::Maneuver, None),
        Err(EngineError::ManeuverBlocked)
    );
    engine.perform_action(&pid("anne"), ActionKind::Plunder, None).unwrap();
    for _ in 0..3 {
        engine.next_turn().unwrap();
    }
    assert!(engine.perform_action(&pid("anne"), ActionKind::Maneuver, None).is_ok());
}

/// Trap Net makes the target lose their next turn.
#[test]
fn test_trap_net_skips_a_turn() {
    let mut engine = start(quiet());
    let mut snapshot = engine.snapshot();
    let net = broadside::cards::action_cards()
        .into_iter()
        .find(|c| c.id.as_str() == "trapNet")
        .unwrap();
    snapshot.player_mut(&pid("anne")).unwrap().hand.push(net);
    let mut engine = restore(&mut engine, snapshot);

    let outcome = engine
        .play_card(&pid("anne"), &CardId::from("trapNet"), Some(&pid("bart")))
        .unwrap();
    assert_eq!(outcome.message, "Bart will skip their next turn!");
    engine.next_turn().unwrap();

    assert_eq!(
        engine.perform_action(&pid("bart"), ActionKind::Fire, Some(&pid("anne"))),
        Ok(ActionOutcome::Skipped)
    );
    assert_eq!(engine.player(&pid("anne")).unwrap().ship.hp, 100);
    assert_eq!(engine.player(&pid("bart")).unwrap().ammunition, 3);
}

/// Three treasure map fragments end the game at the round's end.
#[test]
fn test_map_fragment_victory() {
    let mut engine = start(quiet());
    let fragment = loot_cards()
        .into_iter()
        .find(|c| c.id.as_str() == "treasureMapFragment")
        .unwrap();
    let mut snapshot = engine.snapshot();
    let cora = snapshot.player_mut(&pid("cora")).unwrap();
    cora.map_fragments = 2;
    cora.hand.push(fragment.clone());
    let mut engine = restore(&mut engine, snapshot);

    let outcome = engine.play_card(&pid("cora"), &fragment.id, None).unwrap();
    assert_eq!(outcome.message, "Found a map fragment! (3/3)");
    assert_eq!(
        engine.check_win_conditions(),
        Some(Victory::new(WinKind::MapFragments, Some(pid("cora"))))
    );

    let outcome = engine.end_round().unwrap();
    assert_eq!(
        outcome,
        RoundOutcome::GameOver { victory: Victory::new(WinKind::MapFragments, Some(pid("cora"))) }
    );
    assert_eq!(engine.phase(), Phase::GameOver);
}

/// Gold wins only when no fragment winner exists.
#[test]
fn test_gold_victory() {
    let mut engine = start(quiet());
    let mut snapshot = engine.snapshot();
    snapshot.player_mut(&pid("bart")).unwrap().gold = 20;
    let engine = restore(&mut engine, snapshot);
    assert_eq!(
        engine.check_win_conditions(),
        Some(Victory::new(WinKind::Gold, Some(pid("bart"))))
    );
}

/// With three captains: two wrecks leave a survivor, three are a draw.
#[test]
fn test_last_standing_and_draw() {
    let mut engine = start(quiet());
    assert_eq!(engine.check_win_conditions(), None);

    let mut snapshot = engine.snapshot();
    snapshot.player_mut(&pid("anne")).unwrap().ship.hp = 0;
    snapshot.player_mut(&pid("cora")).unwrap().ship.hp = 0;
    let mut two_sunk = restore(&mut engine, snapshot.clone());
    assert_eq!(
        two_sunk.check_win_conditions(),
        Some(Victory::new(WinKind::LastStanding, Some(pid("bart"))))
    );
    assert!(two_sunk.end_round().unwrap().is_game_over());

    snapshot.player_mut(&pid("bart")).unwrap().ship.hp = 0;
    let all_sunk = restore(&mut engine, snapshot);
    assert_eq!(
        all_sunk.check_win_conditions(),
        Some(Victory::new(WinKind::Draw, None))
    );
}

/// The round closes after the last player and play wraps around.
#[test]
fn test_round_wraps_to_first_player() {
    let mut engine = start(quiet());
    assert_eq!(
        engine.next_turn(),
        Ok(TurnAdvance::NextPlayer { player: pid("bart") })
    );
    engine.next_turn().unwrap();
    let advance = engine.next_turn().unwrap();
    assert!(matches!(
        advance,
        TurnAdvance::RoundEnded { outcome: RoundOutcome::Continue { round: 2, .. } }
    ));
    assert_eq!(engine.current_player().unwrap().id, pid("anne"));
    assert!(engine
        .log()
        .iter()
        .any(|e| e.message == "=== End of Round 1 ==="));
}

/// Priority can be re-rolled every round when configured.
#[test]
fn test_priority_each_round() {
    let mut engine = start(quiet().with_priority_each_round());
    engine.end_round().unwrap();
    assert_eq!(engine.phase(), Phase::Priority);

    // Reverse the order this time
    engine.rng_mut().push_dice([1, 1, 3, 3, 6, 6]);
    for id in ["anne", "bart", "cora"] {
        engine.roll_priority(&pid(id)).unwrap();
    }
    engine.determine_turn_order().unwrap();
    assert_eq!(engine.turn_order(), &[pid("cora"), pid("bart"), pid("anne")]);
}

/// With event effects on, the Ghost Ship adds 5 to every shot that round.
#[test]
fn test_applied_ghost_ship_event() {
    let mut engine = start(quiet().with_event_effects());
    let mut snapshot = engine.snapshot();
    let ghost: Vec<_> = broadside::cards::event_cards()
        .into_iter()
        .filter(|c| c.id.as_str() == "ghostShip")
        .collect();
    snapshot.decks.event = ghost.into_iter().collect();
    let mut engine = restore(&mut engine, snapshot);

    engine.rng_mut().push_coin(true);
    let outcome = engine.end_round().unwrap();
    let RoundOutcome::Continue { event: Some(card), .. } = outcome else {
        panic!("expected the ghost ship");
    };
    assert_eq!(card.name, "Ghost Ship");

    // 1+1+2+5 into Golden Harpoon
    engine.rng_mut().push_dice([1, 1]);
    engine
        .perform_action(&pid("anne"), ActionKind::Fire, Some(&pid("bart")))
        .unwrap();
    assert_eq!(engine.player(&pid("bart")).unwrap().ship.hp, 81);
}

/// Seeds make whole games reproducible.
#[test]
fn test_same_seed_same_game() {
    let play = |seed: u64| {
        let mut engine = GameEngine::new(quiet(), GameRng::new(seed));
        engine.initialize_game(&fleet()).unwrap();
        for id in ["anne", "bart", "cora"] {
            engine.roll_priority(&pid(id)).unwrap();
        }
        engine.determine_turn_order().unwrap();
        let first = engine.current_player().unwrap().id.clone();
        let target = engine
            .turn_order()
            .iter()
            .find(|id| **id != first)
            .cloned()
            .unwrap();
        engine.perform_action(&first, ActionKind::Fire, Some(&target)).unwrap();
        engine.snapshot().players
    };
    assert_eq!(play(99), play(99));
}
