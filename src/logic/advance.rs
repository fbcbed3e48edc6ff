//! Round advancement: crown a sole survivor, or pair survivors into the next round.

use crate::logic::bracket::{pair_into_battles, resolve_phase};
use crate::logic::scoring::BYE_BONUS;
use crate::models::{Battle, BattleId, EngineError, Round, StartupId, TournamentStatus};
use crate::random::RandomSource;
use crate::store::Database;
use serde::{Deserialize, Serialize};

/// What `advance_round` did.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceSummary {
    /// One startup was left standing and has been crowned.
    Finished { phase: Round, champion_id: StartupId },
    /// A new round of battles was created.
    Advanced {
        phase: Round,
        /// Startups to be paired this round (the bye is reported separately).
        contenders: Vec<StartupId>,
        bye_id: Option<StartupId>,
        battles: Vec<BattleId>,
    },
}

/// Advance the tournament in progress to its next round.
///
/// With a single active startup the tournament is closed and every participation
/// completed. Otherwise every battle of the current round must be finished; an
/// even field is shuffled into pairs, an odd field first gives the top scorer a
/// bye worth [`BYE_BONUS`].
pub fn advance_round<R: RandomSource>(db: &mut Database, rng: &mut R) -> Result<AdvanceSummary, EngineError> {
    let tournament_id = db
        .latest_tournament_with(TournamentStatus::InProgress)
        .map(|t| t.id)
        .ok_or(EngineError::NoTournamentInProgress)?;

    let active = db.active_startups(tournament_id);
    let phase = resolve_phase(active.len())?;

    if let [champion_id] = *active.as_slice() {
        db.tournament_mut(tournament_id)
            .ok_or(EngineError::TournamentNotFound(tournament_id))?
            .crown(champion_id);
        db.startup_mut(champion_id)
            .ok_or(EngineError::StartupNotFound(champion_id))?
            .add_tournament_win();
        for p in db
            .participations
            .iter_mut()
            .filter(|p| p.tournament_id == tournament_id)
        {
            p.complete();
        }
        log::info!("Tournament {} finished, sole survivor {}", tournament_id, champion_id);
        return Ok(AdvanceSummary::Finished { phase, champion_id });
    }

    if db.battles_of(tournament_id).any(Battle::is_open) {
        return Err(EngineError::RoundNotComplete);
    }

    if active.len() % 2 == 0 {
        let battles = pair_into_battles(db, tournament_id, phase, active.clone(), rng);
        log::info!(
            "Tournament {} advanced to {:?}: {} battles",
            tournament_id,
            phase,
            battles.len()
        );
        return Ok(AdvanceSummary::Advanced {
            phase,
            contenders: active,
            bye_id: None,
            battles,
        });
    }

    // Highest score takes the bye; on a tie the earliest entrant keeps it.
    let bye_id = db
        .participations_of(tournament_id)
        .filter(|p| p.is_active())
        .fold(None, |best: Option<(StartupId, i32)>, p| match best {
            Some((_, top)) if top >= p.score => best,
            _ => Some((p.startup_id, p.score)),
        })
        .map(|(id, _)| id)
        .ok_or(EngineError::InvalidBracketSize(0))?;

    db.participation_mut(tournament_id, bye_id)
        .ok_or(EngineError::ParticipationNotFound {
            tournament_id,
            startup_id: bye_id,
        })?
        .score += BYE_BONUS;
    db.startup_mut(bye_id)
        .ok_or(EngineError::StartupNotFound(bye_id))?
        .total_score += BYE_BONUS;

    // Bye rounds are always labeled Semifinal, whatever the resolved phase.
    let rest: Vec<_> = active.iter().copied().filter(|&id| id != bye_id).collect();
    let battles = pair_into_battles(db, tournament_id, Round::Semifinal, rest.clone(), rng);
    db.insert_battle(Battle::bye(tournament_id, Round::Semifinal, bye_id), &[bye_id]);

    log::info!(
        "Tournament {} advanced ({:?}): {} battles, bye for {}",
        tournament_id,
        phase,
        battles.len(),
        bye_id
    );
    Ok(AdvanceSummary::Advanced {
        phase,
        contenders: rest,
        bye_id: Some(bye_id),
        battles,
    })
}
