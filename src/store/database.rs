//! Entity tables and lookups. Rows keep insertion order.

use crate::models::{
    Battle, BattleEvent, BattleId, BattleParticipant, EngineError, Participation, ParticipationStatus,
    Startup, StartupId, Tournament, TournamentId, TournamentStatus,
};
use std::collections::HashSet;

/// Case folding used for every name uniqueness check.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

#[derive(Clone, Debug, Default)]
pub struct Database {
    pub startups: Vec<Startup>,
    pub tournaments: Vec<Tournament>,
    pub participations: Vec<Participation>,
    pub battles: Vec<Battle>,
    pub battle_participants: Vec<BattleParticipant>,
    pub battle_events: Vec<BattleEvent>,
}

impl Database {
    pub fn startup(&self, id: StartupId) -> Option<&Startup> {
        self.startups.iter().find(|s| s.id == id)
    }

    pub fn startup_mut(&mut self, id: StartupId) -> Option<&mut Startup> {
        self.startups.iter_mut().find(|s| s.id == id)
    }

    pub fn tournament(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.iter().find(|t| t.id == id)
    }

    pub fn tournament_mut(&mut self, id: TournamentId) -> Option<&mut Tournament> {
        self.tournaments.iter_mut().find(|t| t.id == id)
    }

    /// Most recently created tournament with the given status.
    pub fn latest_tournament_with(&self, status: TournamentStatus) -> Option<&Tournament> {
        self.tournaments.iter().rev().find(|t| t.status == status)
    }

    pub fn participation(&self, tournament_id: TournamentId, startup_id: StartupId) -> Option<&Participation> {
        self.participations
            .iter()
            .find(|p| p.tournament_id == tournament_id && p.startup_id == startup_id)
    }

    pub fn participation_mut(
        &mut self,
        tournament_id: TournamentId,
        startup_id: StartupId,
    ) -> Option<&mut Participation> {
        self.participations
            .iter_mut()
            .find(|p| p.tournament_id == tournament_id && p.startup_id == startup_id)
    }

    /// Participations of one tournament, in admission order.
    pub fn participations_of(&self, tournament_id: TournamentId) -> impl Iterator<Item = &Participation> {
        self.participations
            .iter()
            .filter(move |p| p.tournament_id == tournament_id)
    }

    pub fn count_with_status(&self, tournament_id: TournamentId, status: ParticipationStatus) -> usize {
        self.participations_of(tournament_id)
            .filter(|p| p.status == status)
            .count()
    }

    /// Startup ids of the Active participations, in admission order.
    pub fn active_startups(&self, tournament_id: TournamentId) -> Vec<StartupId> {
        self.participations_of(tournament_id)
            .filter(|p| p.is_active())
            .map(|p| p.startup_id)
            .collect()
    }

    pub fn battle(&self, id: BattleId) -> Option<&Battle> {
        self.battles.iter().find(|b| b.id == id)
    }

    pub fn battle_mut(&mut self, id: BattleId) -> Option<&mut Battle> {
        self.battles.iter_mut().find(|b| b.id == id)
    }

    pub fn battles_of(&self, tournament_id: TournamentId) -> impl Iterator<Item = &Battle> {
        self.battles
            .iter()
            .filter(move |b| b.tournament_id == tournament_id)
    }

    pub fn battle_startups(&self, battle_id: BattleId) -> Vec<StartupId> {
        self.battle_participants
            .iter()
            .filter(|bp| bp.battle_id == battle_id)
            .map(|bp| bp.startup_id)
            .collect()
    }

    /// Insert a battle and its participant rows.
    pub fn insert_battle(&mut self, battle: Battle, startups: &[StartupId]) -> BattleId {
        let id = battle.id;
        self.battles.push(battle);
        self.battle_participants.extend(startups.iter().map(|&startup_id| BattleParticipant {
            battle_id: id,
            startup_id,
        }));
        id
    }

    /// Remove a battle together with its participant and event rows.
    pub fn remove_battle(&mut self, id: BattleId) -> Option<Battle> {
        let idx = self.battles.iter().position(|b| b.id == id)?;
        self.battle_participants.retain(|bp| bp.battle_id != id);
        self.battle_events.retain(|e| e.battle_id != id);
        Some(self.battles.remove(idx))
    }

    /// Table-level constraints, checked before every commit.
    pub fn check_constraints(&self) -> Result<(), EngineError> {
        let waiting = self
            .tournaments
            .iter()
            .filter(|t| t.status == TournamentStatus::Waiting)
            .count();
        if waiting > 1 {
            return Err(EngineError::WaitingTournamentExists);
        }
        let running = self
            .tournaments
            .iter()
            .filter(|t| t.status == TournamentStatus::InProgress)
            .count();
        if running > 1 {
            return Err(EngineError::TournamentInProgressExists);
        }

        let mut names = HashSet::new();
        if !self
            .tournaments
            .iter()
            .all(|t| names.insert(fold_name(&t.name)))
        {
            return Err(EngineError::DuplicateTournamentName);
        }

        let mut names = HashSet::new();
        if !self
            .startups
            .iter()
            .all(|s| names.insert(fold_name(&s.name)))
        {
            return Err(EngineError::DuplicateStartupName);
        }

        let mut pairs = HashSet::new();
        if !self
            .participations
            .iter()
            .all(|p| pairs.insert((p.tournament_id, p.startup_id)))
        {
            return Err(EngineError::DuplicateEntry);
        }

        Ok(())
    }
}
