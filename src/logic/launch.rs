//! Launch: close entry and generate the opening round.

use crate::logic::bracket::{first_round, pair_into_battles};
use crate::models::{EngineError, Tournament, TournamentId, TournamentStatus};
use crate::random::RandomSource;
use crate::store::Database;

/// Smallest and largest supported bracket.
pub const MIN_ENTRANTS: usize = 4;
pub const MAX_ENTRANTS: usize = 8;

/// Start a waiting tournament: require an even 4..=8 active startups, shuffle them into
/// pending battles, and move the tournament to InProgress. Battles are not started.
/// Only one tournament runs at a time.
pub fn launch_tournament<R: RandomSource>(
    db: &mut Database,
    tournament_id: TournamentId,
    rng: &mut R,
) -> Result<Tournament, EngineError> {
    let tournament = db
        .tournament(tournament_id)
        .ok_or(EngineError::TournamentNotFound(tournament_id))?;
    if tournament.status != TournamentStatus::Waiting {
        return Err(EngineError::TournamentAlreadyStarted);
    }
    if db.latest_tournament_with(TournamentStatus::InProgress).is_some() {
        return Err(EngineError::TournamentInProgressExists);
    }

    let active = db.active_startups(tournament_id);
    let n = active.len();
    if !(MIN_ENTRANTS..=MAX_ENTRANTS).contains(&n) || n % 2 != 0 {
        return Err(EngineError::InvalidParticipantCount(n));
    }

    let round = first_round(n);
    let battles = pair_into_battles(db, tournament_id, round, active, rng);

    let t = db
        .tournament_mut(tournament_id)
        .ok_or(EngineError::TournamentNotFound(tournament_id))?;
    t.status = TournamentStatus::InProgress;
    log::info!(
        "Launched tournament {} with {} startups: {} {:?} battles",
        t.id,
        n,
        battles.len(),
        round
    );
    Ok(t.clone())
}
