//! Battle, Round, and the events recorded when a battle is resolved.

use crate::models::startup::StartupId;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a battle.
pub type BattleId = Uuid;

/// Bracket round. Ordered: Quarterfinal < Semifinal < Final.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    Quarterfinal,
    Semifinal,
    Final,
}

/// Lifecycle of a battle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleStatus {
    #[default]
    Pending,
    InProgress,
    Finished,
}

/// A head-to-head contest (or a single-participant bye record).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Battle {
    pub id: BattleId,
    pub tournament_id: TournamentId,
    pub round: Round,
    pub status: BattleStatus,
    /// None until resolved.
    pub winner_id: Option<StartupId>,
    pub created_at: DateTime<Utc>,
}

impl Battle {
    /// A new pending battle.
    pub fn new(tournament_id: TournamentId, round: Round) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            status: BattleStatus::Pending,
            winner_id: None,
            created_at: Utc::now(),
        }
    }

    /// An already finished battle with a single participant who advanced on a bye.
    pub fn bye(tournament_id: TournamentId, round: Round, winner_id: StartupId) -> Self {
        Self {
            status: BattleStatus::Finished,
            winner_id: Some(winner_id),
            ..Self::new(tournament_id, round)
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, BattleStatus::Pending | BattleStatus::InProgress)
    }
}

/// Join row: a startup taking part in a battle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BattleParticipant {
    pub battle_id: BattleId,
    pub startup_id: StartupId,
}

/// The five things that can happen to a startup during a battle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventFlags {
    #[serde(default)]
    pub persuasive_pitch: bool,
    #[serde(default)]
    pub buggy_product: bool,
    #[serde(default)]
    pub user_traction: bool,
    #[serde(default)]
    pub investor_upset: bool,
    #[serde(default)]
    pub fake_news: bool,
}

/// Caller input for one side of a battle resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BattleEventInput {
    pub startup_id: StartupId,
    #[serde(flatten)]
    pub flags: EventFlags,
}

impl BattleEventInput {
    pub fn new(startup_id: StartupId, flags: EventFlags) -> Self {
        Self { startup_id, flags }
    }
}

/// Stored record of one startup's events in one battle. Written once, never updated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BattleEvent {
    pub id: Uuid,
    pub battle_id: BattleId,
    pub startup_id: StartupId,
    pub flags: EventFlags,
    pub recorded_at: DateTime<Utc>,
}

impl BattleEvent {
    pub fn new(battle_id: BattleId, startup_id: StartupId, flags: EventFlags) -> Self {
        Self {
            id: Uuid::new_v4(),
            battle_id,
            startup_id,
            flags,
            recorded_at: Utc::now(),
        }
    }
}

/// Battle plus the names of the startups in it (for API / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BattleView {
    #[serde(flatten)]
    pub battle: Battle,
    pub participants: Vec<ParticipantName>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ParticipantName {
    pub startup_id: StartupId,
    pub name: String,
}
