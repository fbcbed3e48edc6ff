//! Tournament, TournamentStatus, and a startup's Participation in one tournament.

use crate::models::battle::EventFlags;
use crate::models::startup::{EventCounters, StartupId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Unique identifier for a participation row.
pub type ParticipationId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Accepting entrants; no battles yet. At most one tournament is waiting at a time.
    #[default]
    Waiting,
    /// Launched; battles are being fought round by round.
    InProgress,
    /// Champion crowned.
    Finished,
}

/// Top-level competition container.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub status: TournamentStatus,
    pub champion_id: Option<StartupId>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Waiting state with no entrants.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: TournamentStatus::Waiting,
            champion_id: None,
            created_at: Utc::now(),
        }
    }

    /// Close the tournament with `champion` as winner.
    pub fn crown(&mut self, champion: StartupId) {
        self.status = TournamentStatus::Finished;
        self.champion_id = Some(champion);
    }
}

/// Where a startup stands within one tournament. Only ever moves forward.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationStatus {
    /// Entered, waiting for a partner so both can join the bracket together.
    #[default]
    Waitlisted,
    Active,
    Eliminated,
    /// Tournament closed with this startup still standing (or swept at close).
    Completed,
}

/// A startup's membership record within one tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participation {
    pub id: ParticipationId,
    pub tournament_id: TournamentId,
    pub startup_id: StartupId,
    pub status: ParticipationStatus,
    /// Tournament score, independent of the startup's lifetime score.
    pub score: i32,
    pub battle_wins: u32,
    pub events: EventCounters,
    pub joined_at: DateTime<Utc>,
}

impl Participation {
    pub fn new(tournament_id: TournamentId, startup_id: StartupId) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            startup_id,
            status: ParticipationStatus::Waitlisted,
            score: 0,
            battle_wins: 0,
            events: EventCounters::default(),
            joined_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ParticipationStatus::Active
    }

    /// Apply one battle's events and score delta.
    pub fn record_battle(&mut self, flags: &EventFlags, delta: i32) {
        self.events.record(flags);
        self.score += delta;
    }

    /// Record a battle win together with its bonus.
    pub fn add_win(&mut self, bonus: i32) {
        self.battle_wins += 1;
        self.score += bonus;
    }

    pub fn eliminate(&mut self) {
        self.status = ParticipationStatus::Eliminated;
    }

    pub fn complete(&mut self) {
        self.status = ParticipationStatus::Completed;
    }
}
