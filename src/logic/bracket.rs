//! Bracket shape: which round a given field size plays, and pairing into battles.

use crate::models::{Battle, BattleId, EngineError, Round, StartupId, TournamentId};
use crate::random::RandomSource;
use crate::store::Database;

/// Round label for the number of startups still active.
///
/// Only brackets of 4, 6, or 8 entrants are supported, so the reachable counts are
/// 1 to 4, 6, or 8. Anything else is `InvalidBracketSize`.
pub fn resolve_phase(active: usize) -> Result<Round, EngineError> {
    match active {
        1 | 2 => Ok(Round::Final),
        3 | 4 => Ok(Round::Semifinal),
        6 | 8 => Ok(Round::Quarterfinal),
        n => Err(EngineError::InvalidBracketSize(n)),
    }
}

/// Label of the opening round, decided by entrant count alone.
pub fn first_round(entrants: usize) -> Round {
    if entrants == 4 {
        Round::Semifinal
    } else {
        Round::Quarterfinal
    }
}

/// Shuffle `startups`, then create one pending battle per consecutive pair.
///
/// Callers guarantee an even count; a trailing odd startup is never paired.
pub fn pair_into_battles<R: RandomSource>(
    db: &mut Database,
    tournament_id: TournamentId,
    round: Round,
    mut startups: Vec<StartupId>,
    rng: &mut R,
) -> Vec<BattleId> {
    rng.shuffle(&mut startups);
    startups
        .chunks_exact(2)
        .map(|pair| {
            log::debug!("Pairing {} vs {} ({:?})", pair[0], pair[1], round);
            db.insert_battle(Battle::new(tournament_id, round), pair)
        })
        .collect()
}
