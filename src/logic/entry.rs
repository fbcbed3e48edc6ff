//! Entry phase: admit startups into a waiting tournament, activating them in pairs.

use crate::models::{
    EngineError, Participation, ParticipationStatus, StartupId, TournamentId, TournamentStatus,
};
use crate::store::Database;

/// Enter `startup_id` into a waiting tournament.
///
/// The new entrant is waitlisted. As soon as two startups are waitlisted both are
/// promoted to Active together, so the bracket only ever grows by pairs.
pub fn admit_startup(
    db: &mut Database,
    tournament_id: TournamentId,
    startup_id: StartupId,
) -> Result<Participation, EngineError> {
    let tournament = db
        .tournament(tournament_id)
        .ok_or(EngineError::TournamentNotFound(tournament_id))?;
    if tournament.status != TournamentStatus::Waiting {
        return Err(EngineError::TournamentAlreadyStarted);
    }
    if db.participation(tournament_id, startup_id).is_some() {
        return Err(EngineError::DuplicateEntry);
    }
    if db.startup(startup_id).is_none() {
        return Err(EngineError::StartupNotFound(startup_id));
    }

    db.participations.push(Participation::new(tournament_id, startup_id));

    if db.count_with_status(tournament_id, ParticipationStatus::Waitlisted) == 2 {
        for p in db
            .participations
            .iter_mut()
            .filter(|p| p.tournament_id == tournament_id && p.status == ParticipationStatus::Waitlisted)
        {
            p.status = ParticipationStatus::Active;
            log::info!("Startup {} activated in tournament {}", p.startup_id, tournament_id);
        }
    }

    db.participation(tournament_id, startup_id)
        .cloned()
        .ok_or(EngineError::ParticipationNotFound {
            tournament_id,
            startup_id,
        })
}
