//! Battles: start a pending battle, and resolve a running one from its events.

use crate::logic::scoring::{score, ROUND_BONUS};
use crate::models::{
    Battle, BattleEvent, BattleEventInput, BattleId, BattleStatus, EngineError, Round, StartupId,
    TournamentId, TournamentStatus,
};
use crate::random::RandomSource;
use crate::store::Database;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Points one startup earned from its events in a battle (bonus not included).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventScore {
    pub startup_id: StartupId,
    pub name: String,
    pub points: i32,
}

/// Outcome of a resolved battle.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    pub battle_id: BattleId,
    pub round: Round,
    pub winner_id: StartupId,
    pub loser_id: StartupId,
    pub scores: Vec<EventScore>,
    /// Scores were level and the winner was drawn at random.
    pub tie_broken: bool,
    /// This was the title battle; the tournament is now finished.
    pub tournament_finished: bool,
}

/// Battles can only be played while their tournament is running.
fn check_tournament_running(db: &Database, tournament_id: TournamentId) -> Result<(), EngineError> {
    let status = db
        .tournament(tournament_id)
        .map(|t| t.status)
        .ok_or(EngineError::TournamentNotFound(tournament_id))?;
    if status == TournamentStatus::InProgress {
        Ok(())
    } else {
        Err(EngineError::TournamentNotInProgress)
    }
}

/// Move a pending battle to InProgress.
pub fn start_battle(db: &mut Database, battle_id: BattleId) -> Result<Battle, EngineError> {
    let tournament_id = db
        .battle(battle_id)
        .map(|b| b.tournament_id)
        .ok_or(EngineError::BattleNotFound(battle_id))?;
    check_tournament_running(db, tournament_id)?;
    let battle = db
        .battle_mut(battle_id)
        .ok_or(EngineError::BattleNotFound(battle_id))?;
    if battle.status != BattleStatus::Pending {
        return Err(EngineError::BattleNotPending);
    }
    battle.status = BattleStatus::InProgress;
    log::info!("Battle {} started ({:?})", battle.id, battle.round);
    Ok(battle.clone())
}

/// Events must name each of the battle's two startups exactly once.
fn check_events(participants: &[StartupId], events: &[BattleEventInput]) -> Result<(), EngineError> {
    let valid = events.len() == 2
        && participants.len() == 2
        && events[0].startup_id != events[1].startup_id
        && events.iter().all(|e| participants.contains(&e.startup_id));
    if valid {
        Ok(())
    } else {
        Err(EngineError::InvalidEventCount(events.len()))
    }
}

/// Apply one startup's events to its lifetime and tournament records.
fn apply_event(
    db: &mut Database,
    battle_id: BattleId,
    tournament_id: TournamentId,
    event: &BattleEventInput,
) -> Result<EventScore, EngineError> {
    let startup_id = event.startup_id;
    if db.startup(startup_id).is_none() {
        return Err(EngineError::StartupNotFound(startup_id));
    }
    if db.participation(tournament_id, startup_id).is_none() {
        return Err(EngineError::ParticipationNotFound {
            tournament_id,
            startup_id,
        });
    }
    let points = score(&event.flags);

    let startup = db
        .startup_mut(startup_id)
        .ok_or(EngineError::StartupNotFound(startup_id))?;
    startup.record_battle(&event.flags, points);
    let name = startup.name.clone();

    db.participation_mut(tournament_id, startup_id)
        .ok_or(EngineError::ParticipationNotFound {
            tournament_id,
            startup_id,
        })?
        .record_battle(&event.flags, points);

    db.battle_events
        .push(BattleEvent::new(battle_id, startup_id, event.flags));

    Ok(EventScore {
        startup_id,
        name,
        points,
    })
}

/// Resolve a running battle.
///
/// Higher score wins; level scores are settled by a coin flip. The winner gets the
/// round bonus and a win on both its startup and participation, the loser is
/// eliminated. Resolving the final crowns the winner and finishes the tournament.
pub fn resolve_battle<R: RandomSource>(
    db: &mut Database,
    battle_id: BattleId,
    events: &[BattleEventInput],
    rng: &mut R,
) -> Result<ResolutionSummary, EngineError> {
    let battle = db
        .battle(battle_id)
        .cloned()
        .ok_or(EngineError::BattleNotFound(battle_id))?;
    check_tournament_running(db, battle.tournament_id)?;
    if battle.status != BattleStatus::InProgress {
        return Err(EngineError::BattleNotInProgress);
    }
    check_events(&db.battle_startups(battle_id), events)?;

    let tournament_id = battle.tournament_id;
    let scores = events
        .iter()
        .map(|e| apply_event(db, battle_id, tournament_id, e))
        .collect::<Result<Vec<_>, _>>()?;

    let (a, b) = (scores[0].startup_id, scores[1].startup_id);
    let (winner_id, loser_id, tie_broken) = match scores[0].points.cmp(&scores[1].points) {
        Ordering::Greater => (a, b, false),
        Ordering::Less => (b, a, false),
        Ordering::Equal if rng.coin_flip() => (a, b, true),
        Ordering::Equal => (b, a, true),
    };

    db.startup_mut(winner_id)
        .ok_or(EngineError::StartupNotFound(winner_id))?
        .add_win(ROUND_BONUS);
    db.participation_mut(tournament_id, winner_id)
        .ok_or(EngineError::ParticipationNotFound {
            tournament_id,
            startup_id: winner_id,
        })?
        .add_win(ROUND_BONUS);
    db.participation_mut(tournament_id, loser_id)
        .ok_or(EngineError::ParticipationNotFound {
            tournament_id,
            startup_id: loser_id,
        })?
        .eliminate();

    let b = db
        .battle_mut(battle_id)
        .ok_or(EngineError::BattleNotFound(battle_id))?;
    b.status = BattleStatus::Finished;
    b.winner_id = Some(winner_id);

    let tournament_finished = battle.round == Round::Final;
    if tournament_finished {
        db.tournament_mut(tournament_id)
            .ok_or(EngineError::TournamentNotFound(tournament_id))?
            .crown(winner_id);
        db.startup_mut(winner_id)
            .ok_or(EngineError::StartupNotFound(winner_id))?
            .add_tournament_win();
        if let Some(p) = db.participation_mut(tournament_id, winner_id) {
            p.complete();
        }
        log::info!("Tournament {} won by {}", tournament_id, winner_id);
    }

    log::info!(
        "Battle {} resolved: winner {} ({} vs {}){}",
        battle_id,
        winner_id,
        scores[0].points,
        scores[1].points,
        if tie_broken { ", tie broken at random" } else { "" }
    );

    Ok(ResolutionSummary {
        battle_id,
        round: battle.round,
        winner_id,
        loser_id,
        scores,
        tie_broken,
        tournament_finished,
    })
}

/// Delete a battle with its participant and event rows. Scores already applied stay.
pub fn delete_battle(db: &mut Database, battle_id: BattleId) -> Result<Battle, EngineError> {
    let battle = db
        .remove_battle(battle_id)
        .ok_or(EngineError::BattleNotFound(battle_id))?;
    log::info!("Deleted battle {} ({:?})", battle.id, battle.round);
    Ok(battle)
}
