//! Integration tests for starting and resolving battles.

mod common;

use common::{
    current_battle_ids, decent, disaster, engine, engine_with_flips, fight, nothing, sides, strong,
    tournament_with,
};
use startup_rush::{
    BattleEventInput, BattleStatus, Engine, EngineError, EngineRandom, InMemoryStore,
    ParticipationStatus, Store, TournamentStatus,
};
use uuid::Uuid;

#[test]
fn higher_score_wins_and_loser_is_eliminated() {
    let e = engine();
    let (t, _) = tournament_with(&e, 4);
    e.launch_tournament(t).unwrap();
    let battle = current_battle_ids(&e, t)[0];
    let (a, b) = sides(&e, battle);

    let summary = fight(&e, battle, strong(), disaster());
    assert_eq!(summary.winner_id, a);
    assert_eq!(summary.loser_id, b);
    assert!(!summary.tie_broken);
    assert!(!summary.tournament_finished);
    assert_eq!(summary.scores[0].points, 9);
    assert_eq!(summary.scores[1].points, -9);

    let standings = e.participants(t).unwrap();
    let winner = standings.iter().find(|s| s.participation.startup_id == a).unwrap();
    assert_eq!(winner.participation.score, 39);
    assert_eq!(winner.participation.battle_wins, 1);
    assert_eq!(winner.participation.status, ParticipationStatus::Active);
    let loser = standings.iter().find(|s| s.participation.startup_id == b).unwrap();
    assert_eq!(loser.participation.score, -9);
    assert_eq!(loser.participation.status, ParticipationStatus::Eliminated);

    let winner = e.startup(a).unwrap();
    assert_eq!(winner.total_score, 39);
    assert_eq!(winner.battle_wins, 1);
    assert_eq!(winner.events.persuasive_pitch, 1);
    assert_eq!(winner.events.user_traction, 1);
    let loser = e.startup(b).unwrap();
    assert_eq!(loser.events.fake_news, 1);
    assert_eq!(loser.battle_wins, 0);

    let view = e.battle(battle).unwrap();
    assert_eq!(view.battle.status, BattleStatus::Finished);
    assert_eq!(view.battle.winner_id, Some(a));
    let events = e.store().read(|db| Ok(db.battle_events.len())).unwrap();
    assert_eq!(events, 2);
}

#[test]
fn second_sided_winner() {
    let e = engine();
    let (t, _) = tournament_with(&e, 4);
    e.launch_tournament(t).unwrap();
    let battle = current_battle_ids(&e, t)[0];
    let (_, b) = sides(&e, battle);
    let summary = fight(&e, battle, nothing(), decent());
    assert_eq!(summary.winner_id, b);
}

#[test]
fn pending_battle_cannot_be_resolved() {
    let e = engine();
    let (t, _) = tournament_with(&e, 4);
    e.launch_tournament(t).unwrap();
    let battle = current_battle_ids(&e, t)[0];
    let (a, b) = sides(&e, battle);
    let events = [BattleEventInput::new(a, strong()), BattleEventInput::new(b, nothing())];
    assert_eq!(e.resolve_battle(battle, &events), Err(EngineError::BattleNotInProgress));
}

#[test]
fn battle_starts_only_once() {
    let e = engine();
    let (t, _) = tournament_with(&e, 4);
    e.launch_tournament(t).unwrap();
    let battle = current_battle_ids(&e, t)[0];
    assert_eq!(e.start_battle(battle).unwrap().status, BattleStatus::InProgress);
    assert_eq!(e.start_battle(battle), Err(EngineError::BattleNotPending));
    let ghost = Uuid::new_v4();
    assert_eq!(e.start_battle(ghost), Err(EngineError::BattleNotFound(ghost)));
}

#[test]
fn finished_battle_cannot_be_resolved_again() {
    let e = engine();
    let (t, _) = tournament_with(&e, 4);
    e.launch_tournament(t).unwrap();
    let battle = current_battle_ids(&e, t)[0];
    let (a, b) = sides(&e, battle);
    fight(&e, battle, strong(), nothing());
    let events = [BattleEventInput::new(a, strong()), BattleEventInput::new(b, nothing())];
    assert_eq!(e.resolve_battle(battle, &events), Err(EngineError::BattleNotInProgress));
}

#[test]
fn events_must_cover_both_participants_once() {
    let e = engine();
    let (t, s) = tournament_with(&e, 4);
    e.launch_tournament(t).unwrap();
    let battle = current_battle_ids(&e, t)[0];
    let (a, b) = sides(&e, battle);
    e.start_battle(battle).unwrap();

    let one = [BattleEventInput::new(a, strong())];
    assert_eq!(e.resolve_battle(battle, &one), Err(EngineError::InvalidEventCount(1)));

    let dup = [BattleEventInput::new(a, strong()), BattleEventInput::new(a, nothing())];
    assert_eq!(e.resolve_battle(battle, &dup), Err(EngineError::InvalidEventCount(2)));

    let stranger = *s.iter().find(|&&id| id != a && id != b).unwrap();
    let wrong = [BattleEventInput::new(a, strong()), BattleEventInput::new(stranger, nothing())];
    assert_eq!(e.resolve_battle(battle, &wrong), Err(EngineError::InvalidEventCount(2)));

    let three = [
        BattleEventInput::new(a, strong()),
        BattleEventInput::new(b, nothing()),
        BattleEventInput::new(stranger, nothing()),
    ];
    assert_eq!(e.resolve_battle(battle, &three), Err(EngineError::InvalidEventCount(3)));

    assert_eq!(e.battle(battle).unwrap().battle.status, BattleStatus::InProgress);
}

#[test]
fn failed_resolution_leaves_no_partial_state() {
    let e = engine();
    let (t, _) = tournament_with(&e, 4);
    e.launch_tournament(t).unwrap();
    let battle = current_battle_ids(&e, t)[0];
    let (a, b) = sides(&e, battle);
    e.start_battle(battle).unwrap();

    // Drop the second startup's participation so resolution fails after the first event applied.
    e.store()
        .transaction(|db| {
            db.participations
                .retain(|p| !(p.tournament_id == t && p.startup_id == b));
            Ok(())
        })
        .unwrap();

    let events = [BattleEventInput::new(a, strong()), BattleEventInput::new(b, nothing())];
    assert_eq!(
        e.resolve_battle(battle, &events),
        Err(EngineError::ParticipationNotFound {
            tournament_id: t,
            startup_id: b
        })
    );

    let startup = e.startup(a).unwrap();
    assert_eq!(startup.total_score, 0);
    assert_eq!(startup.events.persuasive_pitch, 0);
    let recorded = e.store().read(|db| Ok(db.battle_events.len())).unwrap();
    assert_eq!(recorded, 0);
    assert_eq!(e.battle(battle).unwrap().battle.status, BattleStatus::InProgress);
}

#[test]
fn tie_goes_to_coin_flip() {
    for (flip, first_wins) in [(true, true), (false, false)] {
        let e = engine_with_flips(&[flip]);
        let (t, _) = tournament_with(&e, 4);
        e.launch_tournament(t).unwrap();
        let battle = current_battle_ids(&e, t)[0];
        let (a, b) = sides(&e, battle);
        let summary = fight(&e, battle, nothing(), nothing());
        assert!(summary.tie_broken);
        assert_eq!(summary.winner_id, if first_wins { a } else { b });
        assert_eq!(summary.loser_id, if first_wins { b } else { a });
    }
}

#[test]
fn tie_break_is_roughly_fair() {
    const TRIALS: usize = 400;
    let mut first_wins = 0;
    for seed in 0..TRIALS as u64 {
        let e = Engine::new(InMemoryStore::new(), EngineRandom::from_seed(Some(seed)));
        let (t, _) = tournament_with(&e, 4);
        e.launch_tournament(t).unwrap();
        let battle = current_battle_ids(&e, t)[0];
        let (a, _) = sides(&e, battle);
        if fight(&e, battle, nothing(), nothing()).winner_id == a {
            first_wins += 1;
        }
    }
    assert!((120..=280).contains(&first_wins), "first side won {first_wins}/{TRIALS}");
}

#[test]
fn final_battle_crowns_champion() {
    let e = engine();
    let (t, _) = tournament_with(&e, 4);
    e.launch_tournament(t).unwrap();
    for battle in current_battle_ids(&e, t) {
        fight(&e, battle, strong(), nothing());
    }
    e.advance_round().unwrap();
    let final_battle = current_battle_ids(&e, t)[0];
    let (a, _) = sides(&e, final_battle);

    let summary = fight(&e, final_battle, decent(), nothing());
    assert!(summary.tournament_finished);

    let tournament = e.tournament(t).unwrap();
    assert_eq!(tournament.status, TournamentStatus::Finished);
    assert_eq!(tournament.champion_id, Some(a));
    assert_eq!(e.startup(a).unwrap().tournament_wins, 1);
    assert_eq!(e.battle(final_battle).unwrap().battle.status, BattleStatus::Finished);
}

#[test]
fn missing_startup_is_reported_before_missing_participation() {
    let e = engine();
    let (t, _) = tournament_with(&e, 4);
    e.launch_tournament(t).unwrap();
    let battle = current_battle_ids(&e, t)[0];
    let (a, b) = sides(&e, battle);
    e.start_battle(battle).unwrap();

    e.store()
        .transaction(|db| {
            db.startups.retain(|s| s.id != a);
            db.participations.retain(|p| p.startup_id != a);
            Ok(())
        })
        .unwrap();

    let events = [BattleEventInput::new(a, strong()), BattleEventInput::new(b, nothing())];
    assert_eq!(e.resolve_battle(battle, &events), Err(EngineError::StartupNotFound(a)));
}

#[test]
fn deleting_a_battle_removes_its_rows() {
    let e = engine();
    let (t, _) = tournament_with(&e, 4);
    e.launch_tournament(t).unwrap();
    let battles = current_battle_ids(&e, t);
    let summary = fight(&e, battles[0], strong(), nothing());

    let deleted = e.delete_battle(battles[0]).unwrap();
    assert_eq!(deleted.id, battles[0]);
    assert_eq!(e.battle(battles[0]), Err(EngineError::BattleNotFound(battles[0])));
    assert_eq!(e.delete_battle(battles[0]), Err(EngineError::BattleNotFound(battles[0])));

    let (participants, events) = e
        .store()
        .read(|db| Ok((db.battle_participants.len(), db.battle_events.len())))
        .unwrap();
    assert_eq!(participants, 2);
    assert_eq!(events, 0);
    // Points already earned are kept.
    assert_eq!(e.startup(summary.winner_id).unwrap().total_score, 39);
    assert_eq!(current_battle_ids(&e, t), vec![battles[1]]);
}
