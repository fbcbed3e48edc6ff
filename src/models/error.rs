//! Errors that can occur during engine operations.

use crate::models::battle::BattleId;
use crate::models::startup::StartupId;
use crate::models::tournament::{ParticipationId, TournamentId};
use thiserror::Error;

/// Broad category of an [`EngineError`], used by callers to pick a response.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Missing or out-of-range input.
    Validation,
    /// Entity is in the wrong lifecycle state for the operation.
    Conflict,
    /// Referenced id does not resolve.
    NotFound,
    /// Bracket rule would be broken.
    Invariant,
    /// The store itself failed.
    Storage,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum EngineError {
    #[error("Field `{0}` is required")]
    MissingField(&'static str),

    #[error("No field to update was provided")]
    NothingToUpdate,

    #[error("Founding year {0} is out of range")]
    InvalidFoundingYear(i32),

    /// Resolution needs exactly one event for each of the battle's two startups.
    #[error("A battle must be resolved with exactly one event per participant (got {0})")]
    InvalidEventCount(usize),

    #[error("Tournament {0} not found")]
    TournamentNotFound(TournamentId),

    #[error("Startup {0} not found")]
    StartupNotFound(StartupId),

    #[error("Battle {0} not found")]
    BattleNotFound(BattleId),

    #[error("Startup {startup_id} is not entered in tournament {tournament_id}")]
    ParticipationNotFound {
        tournament_id: TournamentId,
        startup_id: StartupId,
    },

    #[error("Participation {0} not found")]
    ParticipationIdNotFound(ParticipationId),

    #[error("No tournament found")]
    NoTournaments,

    #[error("No tournament is waiting for entrants")]
    NoWaitingTournament,

    #[error("No tournament is in progress")]
    NoTournamentInProgress,

    #[error("No unfinished tournament found")]
    NoOpenTournament,

    #[error("No open battles in the current round")]
    NoCurrentBattles,

    #[error("Tournament has already started or finished")]
    TournamentAlreadyStarted,

    #[error("A tournament is already waiting for entrants")]
    WaitingTournamentExists,

    #[error("Another tournament is already in progress")]
    TournamentInProgressExists,

    #[error("Battle belongs to a tournament that is not in progress")]
    TournamentNotInProgress,

    #[error("A tournament with this name already exists")]
    DuplicateTournamentName,

    #[error("A startup with this name already exists")]
    DuplicateStartupName,

    #[error("Startup is already entered in this tournament")]
    DuplicateEntry,

    #[error("Startup is entered in a tournament that has not finished")]
    StartupInUse,

    #[error("Battle is not pending")]
    BattleNotPending,

    #[error("Battle is not in progress")]
    BattleNotInProgress,

    #[error("Tournament needs an even number of active startups between 4 and 8 (has {0})")]
    InvalidParticipantCount(usize),

    #[error("{0} active startups is not a supported bracket size")]
    InvalidBracketSize(usize),

    #[error("There are still pending or running battles in this round")]
    RoundNotComplete,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        use EngineError::*;
        match self {
            MissingField(_) | NothingToUpdate | InvalidFoundingYear(_) | InvalidEventCount(_) => {
                ErrorKind::Validation
            }
            TournamentNotFound(_)
            | StartupNotFound(_)
            | BattleNotFound(_)
            | ParticipationNotFound { .. }
            | ParticipationIdNotFound(_)
            | NoTournaments
            | NoWaitingTournament
            | NoTournamentInProgress
            | NoOpenTournament
            | NoCurrentBattles => ErrorKind::NotFound,
            TournamentAlreadyStarted
            | WaitingTournamentExists
            | TournamentInProgressExists
            | TournamentNotInProgress
            | DuplicateTournamentName
            | DuplicateStartupName
            | DuplicateEntry
            | StartupInUse
            | BattleNotPending
            | BattleNotInProgress => ErrorKind::Conflict,
            InvalidParticipantCount(_) | InvalidBracketSize(_) | RoundNotComplete => {
                ErrorKind::Invariant
            }
            Storage(_) => ErrorKind::Storage,
        }
    }
}
