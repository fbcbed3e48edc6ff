//! The engine facade: every operation runs as one store transaction.

use crate::logic::{
    self, queries, AdvanceSummary, RankingEntry, ResolutionSummary, Standing, StartupPatch,
};
use crate::models::{
    Battle, BattleEventInput, BattleId, BattleView, EngineError, Participation, ParticipationId,
    Startup, StartupId, Tournament, TournamentId,
};
use crate::random::{EngineRandom, RandomSource};
use crate::store::{Database, InMemoryStore, Store};
use std::sync::Mutex;

/// Tournament engine over a store `S` and a random source `R`.
#[derive(Debug)]
pub struct Engine<S = InMemoryStore, R = EngineRandom> {
    store: S,
    rng: Mutex<R>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(InMemoryStore::new(), EngineRandom::default())
    }
}

impl<S: Store, R: RandomSource> Engine<S, R> {
    pub fn new(store: S, rng: R) -> Self {
        Self {
            store,
            rng: Mutex::new(rng),
        }
    }

    /// Direct access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn transaction<T>(
        &self,
        f: impl FnOnce(&mut Database) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        self.store.transaction(f)
    }

    /// Transaction that also draws from the random source.
    fn transaction_with_rng<T>(
        &self,
        f: impl FnOnce(&mut Database, &mut R) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| EngineError::Storage("lock error".to_string()))?;
        self.store.transaction(|db| f(db, &mut *rng))
    }

    // Startups

    pub fn create_startup(&self, name: &str, slogan: &str, founding_year: i32) -> Result<Startup, EngineError> {
        self.transaction(|db| logic::create_startup(db, name, slogan, founding_year))
    }

    pub fn update_startup(&self, id: StartupId, patch: StartupPatch) -> Result<Startup, EngineError> {
        self.transaction(|db| logic::update_startup(db, id, patch))
    }

    pub fn delete_startup(&self, id: StartupId) -> Result<Startup, EngineError> {
        self.transaction(|db| logic::delete_startup(db, id))
    }

    pub fn startup(&self, id: StartupId) -> Result<Startup, EngineError> {
        self.store
            .read(|db| db.startup(id).cloned().ok_or(EngineError::StartupNotFound(id)))
    }

    pub fn startups(&self) -> Result<Vec<Startup>, EngineError> {
        self.store.read(|db| Ok(db.startups.clone()))
    }

    pub fn ranking(&self) -> Result<Vec<RankingEntry>, EngineError> {
        self.store.read(|db| Ok(queries::ranking(db)))
    }

    // Tournaments

    pub fn create_tournament(&self, name: &str) -> Result<Tournament, EngineError> {
        self.transaction(|db| logic::create_tournament(db, name))
    }

    pub fn rename_tournament(&self, id: TournamentId, name: &str) -> Result<Tournament, EngineError> {
        self.transaction(|db| logic::rename_tournament(db, id, name))
    }

    pub fn delete_tournament(&self, id: TournamentId) -> Result<Tournament, EngineError> {
        self.transaction(|db| logic::delete_tournament(db, id))
    }

    pub fn admit_startup(&self, tournament_id: TournamentId, startup_id: StartupId) -> Result<Participation, EngineError> {
        self.transaction(|db| logic::admit_startup(db, tournament_id, startup_id))
    }

    pub fn launch_tournament(&self, id: TournamentId) -> Result<Tournament, EngineError> {
        self.transaction_with_rng(|db, rng| logic::launch_tournament(db, id, rng))
    }

    pub fn advance_round(&self) -> Result<AdvanceSummary, EngineError> {
        self.transaction_with_rng(logic::advance_round)
    }

    pub fn tournament(&self, id: TournamentId) -> Result<Tournament, EngineError> {
        self.store.read(|db| queries::tournament(db, id))
    }

    pub fn tournaments(&self) -> Result<Vec<Tournament>, EngineError> {
        self.store.read(|db| Ok(db.tournaments.clone()))
    }

    pub fn latest_tournament(&self) -> Result<Tournament, EngineError> {
        self.store.read(queries::latest_tournament)
    }

    pub fn waiting_tournament(&self) -> Result<Tournament, EngineError> {
        self.store.read(queries::waiting_tournament)
    }

    pub fn tournament_in_progress(&self) -> Result<Tournament, EngineError> {
        self.store.read(queries::tournament_in_progress)
    }

    pub fn open_tournament(&self) -> Result<Tournament, EngineError> {
        self.store.read(queries::open_tournament)
    }

    pub fn participants(&self, id: TournamentId) -> Result<Vec<Standing>, EngineError> {
        self.store.read(|db| queries::participants(db, id))
    }

    pub fn available_startups(&self) -> Result<Vec<Startup>, EngineError> {
        self.store.read(queries::available_startups)
    }

    pub fn participation(&self, id: ParticipationId) -> Result<Participation, EngineError> {
        self.store.read(|db| queries::participation(db, id))
    }

    // Battles

    pub fn start_battle(&self, id: BattleId) -> Result<Battle, EngineError> {
        self.transaction(|db| logic::start_battle(db, id))
    }

    pub fn resolve_battle(&self, id: BattleId, events: &[BattleEventInput]) -> Result<ResolutionSummary, EngineError> {
        self.transaction_with_rng(|db, rng| logic::resolve_battle(db, id, events, rng))
    }

    pub fn delete_battle(&self, id: BattleId) -> Result<Battle, EngineError> {
        self.transaction(|db| logic::delete_battle(db, id))
    }

    pub fn battle(&self, id: BattleId) -> Result<BattleView, EngineError> {
        self.store.read(|db| queries::battle(db, id))
    }

    pub fn battles(&self) -> Result<Vec<BattleView>, EngineError> {
        self.store
            .read(|db| Ok(db.battles.iter().map(|b| queries::battle_view(db, b)).collect()))
    }

    pub fn current_battles(&self, tournament_id: TournamentId) -> Result<Vec<BattleView>, EngineError> {
        self.store.read(|db| queries::current_battles(db, tournament_id))
    }
}
