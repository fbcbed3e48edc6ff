//! Tournament registry: create, rename, and delete tournaments.

use crate::models::{EngineError, Tournament, TournamentId, TournamentStatus};
use crate::store::{fold_name, Database};
use std::collections::HashSet;

fn name_taken(db: &Database, name: &str, except: Option<TournamentId>) -> bool {
    let key = fold_name(name);
    db.tournaments
        .iter()
        .any(|t| Some(t.id) != except && fold_name(&t.name) == key)
}

/// Create an empty Waiting tournament. Fails if another tournament is already waiting.
pub fn create_tournament(db: &mut Database, name: &str) -> Result<Tournament, EngineError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EngineError::MissingField("name"));
    }
    if db.latest_tournament_with(TournamentStatus::Waiting).is_some() {
        return Err(EngineError::WaitingTournamentExists);
    }
    if name_taken(db, name, None) {
        return Err(EngineError::DuplicateTournamentName);
    }
    let tournament = Tournament::new(name);
    log::info!("Created tournament {} ({})", tournament.name, tournament.id);
    db.tournaments.push(tournament.clone());
    Ok(tournament)
}

/// Rename a tournament that has not started yet.
pub fn rename_tournament(db: &mut Database, id: TournamentId, name: &str) -> Result<Tournament, EngineError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(EngineError::NothingToUpdate);
    }
    let status = db
        .tournament(id)
        .map(|t| t.status)
        .ok_or(EngineError::TournamentNotFound(id))?;
    if status != TournamentStatus::Waiting {
        return Err(EngineError::TournamentAlreadyStarted);
    }
    if name_taken(db, name, Some(id)) {
        return Err(EngineError::DuplicateTournamentName);
    }
    let t = db.tournament_mut(id).ok_or(EngineError::TournamentNotFound(id))?;
    t.name = name.to_string();
    Ok(t.clone())
}

/// Delete a tournament with its participations, battles, and battle records.
pub fn delete_tournament(db: &mut Database, id: TournamentId) -> Result<Tournament, EngineError> {
    let idx = db
        .tournaments
        .iter()
        .position(|t| t.id == id)
        .ok_or(EngineError::TournamentNotFound(id))?;
    let battle_ids: HashSet<_> = db.battles_of(id).map(|b| b.id).collect();
    db.battle_participants.retain(|bp| !battle_ids.contains(&bp.battle_id));
    db.battle_events.retain(|e| !battle_ids.contains(&e.battle_id));
    db.battles.retain(|b| b.tournament_id != id);
    db.participations.retain(|p| p.tournament_id != id);
    let tournament = db.tournaments.remove(idx);
    log::info!("Deleted tournament {} ({})", tournament.name, tournament.id);
    Ok(tournament)
}
