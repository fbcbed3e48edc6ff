//! Read-only views over the tables.

use crate::logic::scoring::{
    BUGGY_PRODUCT_POINTS, FAKE_NEWS_POINTS, INVESTOR_UPSET_POINTS, PERSUASIVE_PITCH_POINTS,
    USER_TRACTION_POINTS,
};
use crate::models::{
    Battle, BattleId, BattleView, EngineError, ParticipantName, Participation, ParticipationId,
    ParticipationStatus, Round, Startup, Tournament, TournamentId, TournamentStatus,
};
use crate::store::Database;
use serde::{Deserialize, Serialize};

/// A participation together with its startup's name (for API / display).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub name: String,
    #[serde(flatten)]
    pub participation: Participation,
}

/// Ranking row: a startup and its lifetime plus-minus.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    #[serde(flatten)]
    pub startup: Startup,
    pub plus_minus: i32,
}

/// Round priority for "current battles": the latest round with open battles wins.
const CURRENT_ROUND_ORDER: [Round; 3] = [Round::Final, Round::Semifinal, Round::Quarterfinal];

pub fn tournament(db: &Database, id: TournamentId) -> Result<Tournament, EngineError> {
    db.tournament(id).cloned().ok_or(EngineError::TournamentNotFound(id))
}

pub fn latest_tournament(db: &Database) -> Result<Tournament, EngineError> {
    db.tournaments.last().cloned().ok_or(EngineError::NoTournaments)
}

pub fn waiting_tournament(db: &Database) -> Result<Tournament, EngineError> {
    db.latest_tournament_with(TournamentStatus::Waiting)
        .cloned()
        .ok_or(EngineError::NoWaitingTournament)
}

pub fn tournament_in_progress(db: &Database) -> Result<Tournament, EngineError> {
    db.latest_tournament_with(TournamentStatus::InProgress)
        .cloned()
        .ok_or(EngineError::NoTournamentInProgress)
}

/// Most recent tournament that is waiting or in progress.
pub fn open_tournament(db: &Database) -> Result<Tournament, EngineError> {
    db.tournaments
        .iter()
        .rev()
        .find(|t| t.status != TournamentStatus::Finished)
        .cloned()
        .ok_or(EngineError::NoOpenTournament)
}

pub fn battle(db: &Database, id: BattleId) -> Result<BattleView, EngineError> {
    let b = db.battle(id).ok_or(EngineError::BattleNotFound(id))?;
    Ok(battle_view(db, b))
}

pub fn battle_view(db: &Database, battle: &Battle) -> BattleView {
    let participants = db
        .battle_startups(battle.id)
        .into_iter()
        .map(|startup_id| ParticipantName {
            startup_id,
            name: db
                .startup(startup_id)
                .map(|s| s.name.clone())
                .unwrap_or_default(),
        })
        .collect();
    BattleView {
        battle: battle.clone(),
        participants,
    }
}

/// Unfinished battles of the tournament's current round.
pub fn current_battles(db: &Database, tournament_id: TournamentId) -> Result<Vec<BattleView>, EngineError> {
    if db.tournament(tournament_id).is_none() {
        return Err(EngineError::TournamentNotFound(tournament_id));
    }
    CURRENT_ROUND_ORDER
        .iter()
        .map(|&round| {
            db.battles_of(tournament_id)
                .filter(|b| b.round == round && b.is_open())
                .map(|b| battle_view(db, b))
                .collect::<Vec<_>>()
        })
        .find(|battles| !battles.is_empty())
        .ok_or(EngineError::NoCurrentBattles)
}

pub fn participation(db: &Database, id: ParticipationId) -> Result<Participation, EngineError> {
    db.participations
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .ok_or(EngineError::ParticipationIdNotFound(id))
}

/// Bracket entrants (waitlisted excluded), highest tournament score first.
pub fn participants(db: &Database, tournament_id: TournamentId) -> Result<Vec<Standing>, EngineError> {
    if db.tournament(tournament_id).is_none() {
        return Err(EngineError::TournamentNotFound(tournament_id));
    }
    let mut standings: Vec<_> = db
        .participations_of(tournament_id)
        .filter(|p| p.status != ParticipationStatus::Waitlisted)
        .map(|p| Standing {
            name: db
                .startup(p.startup_id)
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            participation: p.clone(),
        })
        .collect();
    standings.sort_by(|a, b| b.participation.score.cmp(&a.participation.score));
    Ok(standings)
}

/// Startups not yet entered in the waiting tournament.
pub fn available_startups(db: &Database) -> Result<Vec<Startup>, EngineError> {
    let waiting = db
        .latest_tournament_with(TournamentStatus::Waiting)
        .ok_or(EngineError::NoWaitingTournament)?;
    Ok(db
        .startups
        .iter()
        .filter(|s| db.participation(waiting.id, s.id).is_none())
        .cloned()
        .collect())
}

/// Lifetime plus-minus: the battle event weights applied to the lifetime counters,
/// saturating at the `i32` bounds.
pub fn plus_minus(startup: &Startup) -> i32 {
    let e = &startup.events;
    [
        (e.persuasive_pitch, PERSUASIVE_PITCH_POINTS),
        (e.buggy_product, BUGGY_PRODUCT_POINTS),
        (e.user_traction, USER_TRACTION_POINTS),
        (e.investor_upset, INVESTOR_UPSET_POINTS),
        (e.fake_news, FAKE_NEWS_POINTS),
    ]
    .into_iter()
    .map(|(count, points)| i64::from(count) * i64::from(points))
    .sum::<i64>()
    .clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Every startup ordered by plus-minus, best first; ties by name.
pub fn ranking(db: &Database) -> Vec<RankingEntry> {
    let mut entries: Vec<_> = db
        .startups
        .iter()
        .map(|s| RankingEntry {
            plus_minus: plus_minus(s),
            startup: s.clone(),
        })
        .collect();
    entries.sort_by(|a, b| {
        b.plus_minus
            .cmp(&a.plus_minus)
            .then_with(|| a.startup.name.cmp(&b.startup.name))
    });
    entries
}
