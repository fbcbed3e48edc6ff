//! Data structures for the startup tournament: startups, tournaments, battles, errors.

mod battle;
mod error;
mod startup;
mod tournament;

pub use battle::{
    Battle, BattleEvent, BattleEventInput, BattleId, BattleParticipant, BattleStatus, BattleView,
    EventFlags, ParticipantName, Round,
};
pub use error::{EngineError, ErrorKind};
pub use startup::{EventCounters, Startup, StartupId};
pub use tournament::{
    Participation, ParticipationId, ParticipationStatus, Tournament, TournamentId,
    TournamentStatus,
};
