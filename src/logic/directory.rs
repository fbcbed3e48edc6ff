//! Startup directory: register, edit, and remove startups.

use crate::models::{EngineError, Startup, StartupId, TournamentStatus};
use crate::store::{fold_name, Database};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::collections::HashSet;

/// Oldest founding year accepted.
pub const MIN_FOUNDING_YEAR: i32 = 1800;

/// Partial update for a startup. `None` leaves the field as is.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StartupPatch {
    pub name: Option<String>,
    pub slogan: Option<String>,
    pub founding_year: Option<i32>,
}

fn check_founding_year(year: i32) -> Result<(), EngineError> {
    if (MIN_FOUNDING_YEAR..=Utc::now().year()).contains(&year) {
        Ok(())
    } else {
        Err(EngineError::InvalidFoundingYear(year))
    }
}

fn name_taken(db: &Database, name: &str, except: Option<StartupId>) -> bool {
    let key = fold_name(name);
    db.startups
        .iter()
        .any(|s| Some(s.id) != except && fold_name(&s.name) == key)
}

/// Register a new startup. Name and slogan are required; names are unique (case-insensitive).
pub fn create_startup(
    db: &mut Database,
    name: &str,
    slogan: &str,
    founding_year: i32,
) -> Result<Startup, EngineError> {
    let name = name.trim();
    let slogan = slogan.trim();
    if name.is_empty() {
        return Err(EngineError::MissingField("name"));
    }
    if slogan.is_empty() {
        return Err(EngineError::MissingField("slogan"));
    }
    check_founding_year(founding_year)?;
    if name_taken(db, name, None) {
        return Err(EngineError::DuplicateStartupName);
    }
    let startup = Startup::new(name, slogan, founding_year);
    log::info!("Registered startup {} ({})", startup.name, startup.id);
    db.startups.push(startup.clone());
    Ok(startup)
}

/// Apply a partial update. At least one field must be given.
pub fn update_startup(db: &mut Database, id: StartupId, patch: StartupPatch) -> Result<Startup, EngineError> {
    let name = patch.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
    let slogan = patch.slogan.as_deref().map(str::trim).filter(|s| !s.is_empty());
    if name.is_none() && slogan.is_none() && patch.founding_year.is_none() {
        return Err(EngineError::NothingToUpdate);
    }
    if let Some(year) = patch.founding_year {
        check_founding_year(year)?;
    }
    if let Some(n) = name {
        if name_taken(db, n, Some(id)) {
            return Err(EngineError::DuplicateStartupName);
        }
    }
    let startup = db.startup_mut(id).ok_or(EngineError::StartupNotFound(id))?;
    if let Some(n) = name {
        startup.name = n.to_string();
    }
    if let Some(s) = slogan {
        startup.slogan = s.to_string();
    }
    if let Some(year) = patch.founding_year {
        startup.founding_year = year;
    }
    Ok(startup.clone())
}

/// Remove a startup and scrub every historical reference to it.
///
/// Refused while the startup is entered in a tournament that has not finished.
pub fn delete_startup(db: &mut Database, id: StartupId) -> Result<Startup, EngineError> {
    let idx = db
        .startups
        .iter()
        .position(|s| s.id == id)
        .ok_or(EngineError::StartupNotFound(id))?;

    let unfinished: HashSet<_> = db
        .tournaments
        .iter()
        .filter(|t| t.status != TournamentStatus::Finished)
        .map(|t| t.id)
        .collect();
    if db
        .participations
        .iter()
        .any(|p| p.startup_id == id && unfinished.contains(&p.tournament_id))
    {
        return Err(EngineError::StartupInUse);
    }

    db.battle_participants.retain(|bp| bp.startup_id != id);
    db.battle_events.retain(|e| e.startup_id != id);
    db.participations.retain(|p| p.startup_id != id);
    for b in db.battles.iter_mut().filter(|b| b.winner_id == Some(id)) {
        b.winner_id = None;
    }
    for t in db.tournaments.iter_mut().filter(|t| t.champion_id == Some(id)) {
        t.champion_id = None;
    }
    let startup = db.startups.remove(idx);
    log::info!("Deleted startup {} ({})", startup.name, startup.id);
    Ok(startup)
}
