//! Startup Rush: single-elimination battle tournaments between startups.
//! Library with models, business logic, the transactional store, and the REST API.

pub mod api;
pub mod config;
pub mod engine;
pub mod logic;
pub mod models;
pub mod random;
pub mod store;

pub use config::AppConfig;
pub use engine::Engine;
pub use logic::{
    admit_startup, advance_round, create_startup, create_tournament, delete_battle, delete_startup,
    delete_tournament, launch_tournament, rename_tournament, resolve_battle, resolve_phase, score,
    start_battle, update_startup, AdvanceSummary, EventScore, RankingEntry, ResolutionSummary,
    Standing, StartupPatch,
};
pub use models::{
    Battle, BattleEvent, BattleEventInput, BattleId, BattleParticipant, BattleStatus, BattleView,
    EngineError, ErrorKind, EventCounters, EventFlags, ParticipantName, Participation,
    ParticipationId, ParticipationStatus, Round, Startup, StartupId, Tournament, TournamentId,
    TournamentStatus,
};
pub use random::{EngineRandom, RandomSource, SeededRandom, ThreadRandom};
pub use store::{Database, InMemoryStore, Store};
