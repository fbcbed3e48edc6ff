//! Shared helpers for the integration tests.
#![allow(dead_code)]

use startup_rush::{
    BattleEventInput, BattleId, Engine, EventFlags, InMemoryStore, ParticipationStatus,
    RandomSource, ResolutionSummary, StartupId, Store, TournamentId,
};
use std::collections::VecDeque;

/// Never shuffles (pairs follow admission order) and returns scripted coin flips.
/// With no flips left, `coin_flip` returns `true`.
#[derive(Debug, Default)]
pub struct ScriptedRandom {
    flips: VecDeque<bool>,
}

impl ScriptedRandom {
    pub fn with_flips(flips: &[bool]) -> Self {
        Self {
            flips: flips.iter().copied().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}

    fn coin_flip(&mut self) -> bool {
        self.flips.pop_front().unwrap_or(true)
    }
}

pub type TestEngine = Engine<InMemoryStore, ScriptedRandom>;

pub fn engine() -> TestEngine {
    Engine::new(InMemoryStore::new(), ScriptedRandom::default())
}

pub fn engine_with_flips(flips: &[bool]) -> TestEngine {
    Engine::new(InMemoryStore::new(), ScriptedRandom::with_flips(flips))
}

/// Register `n` startups named "Startup 0".."Startup n-1".
pub fn register<S: Store, R: RandomSource>(engine: &Engine<S, R>, n: usize) -> Vec<StartupId> {
    (0..n)
        .map(|i| {
            engine
                .create_startup(&format!("Startup {i}"), "Move fast", 2015)
                .unwrap()
                .id
        })
        .collect()
}

/// A waiting tournament with `n` startups admitted (in order).
pub fn tournament_with<S: Store, R: RandomSource>(
    engine: &Engine<S, R>,
    n: usize,
) -> (TournamentId, Vec<StartupId>) {
    let startups = register(engine, n);
    let t = engine.create_tournament("Startup Rush").unwrap();
    for &s in &startups {
        engine.admit_startup(t.id, s).unwrap();
    }
    (t.id, startups)
}

/// Force every participation of the tournament to Active, bypassing pairwise admission.
pub fn activate_all<S: Store, R: RandomSource>(engine: &Engine<S, R>, tournament_id: TournamentId) {
    engine
        .store()
        .transaction(|db| {
            for p in db
                .participations
                .iter_mut()
                .filter(|p| p.tournament_id == tournament_id)
            {
                p.status = ParticipationStatus::Active;
            }
            Ok(())
        })
        .unwrap();
}

/// Pitch + traction: 9 points.
pub fn strong() -> EventFlags {
    EventFlags {
        persuasive_pitch: true,
        user_traction: true,
        ..EventFlags::default()
    }
}

/// Pitch only: 6 points.
pub fn decent() -> EventFlags {
    EventFlags {
        persuasive_pitch: true,
        ..EventFlags::default()
    }
}

/// Everything at once: 6 - 4 + 3 - 6 - 8 = -9 points.
pub fn disaster() -> EventFlags {
    EventFlags {
        persuasive_pitch: true,
        buggy_product: true,
        user_traction: true,
        investor_upset: true,
        fake_news: true,
    }
}

pub fn nothing() -> EventFlags {
    EventFlags::default()
}

/// Participant ids of a battle, in insertion order.
pub fn sides<S: Store, R: RandomSource>(engine: &Engine<S, R>, battle_id: BattleId) -> (StartupId, StartupId) {
    let view = engine.battle(battle_id).unwrap();
    (view.participants[0].startup_id, view.participants[1].startup_id)
}

/// Start a battle and resolve it with `first` for its first participant, `second` for the other.
pub fn fight<S: Store, R: RandomSource>(
    engine: &Engine<S, R>,
    battle_id: BattleId,
    first: EventFlags,
    second: EventFlags,
) -> ResolutionSummary {
    let (a, b) = sides(engine, battle_id);
    engine.start_battle(battle_id).unwrap();
    engine
        .resolve_battle(
            battle_id,
            &[BattleEventInput::new(a, first), BattleEventInput::new(b, second)],
        )
        .unwrap()
}

/// Ids of the tournament's open battles in the current round.
pub fn current_battle_ids<S: Store, R: RandomSource>(
    engine: &Engine<S, R>,
    tournament_id: TournamentId,
) -> Vec<BattleId> {
    engine
        .current_battles(tournament_id)
        .unwrap()
        .into_iter()
        .map(|v| v.battle.id)
        .collect()
}
