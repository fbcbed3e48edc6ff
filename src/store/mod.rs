//! Persistence: the entity tables and the transactional store trait.
//!
//! Every engine mutation runs inside [`Store::transaction`]. The in-memory
//! implementation works on a copy of the tables and only swaps it in when the
//! operation and the table constraints both succeed, so a failed operation
//! leaves no partial state behind.

mod database;

pub use database::{fold_name, Database};

use crate::models::EngineError;
use std::sync::RwLock;

/// Atomic read-modify-write access to the entity tables.
pub trait Store {
    /// Run a read-only query against a consistent view.
    fn read<T>(&self, f: impl FnOnce(&Database) -> Result<T, EngineError>) -> Result<T, EngineError>;

    /// Run `f` as one all-or-nothing unit. On `Err` (from `f` or from a
    /// constraint check at commit) nothing is written.
    fn transaction<T>(
        &self,
        f: impl FnOnce(&mut Database) -> Result<T, EngineError>,
    ) -> Result<T, EngineError>;
}

/// Store backed by process memory. Transactions are serialized by the write lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Database>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing tables (e.g. fixtures in tests).
    pub fn with_database(db: Database) -> Self {
        Self {
            inner: RwLock::new(db),
        }
    }
}

impl Store for InMemoryStore {
    fn read<T>(&self, f: impl FnOnce(&Database) -> Result<T, EngineError>) -> Result<T, EngineError> {
        let g = self
            .inner
            .read()
            .map_err(|_| EngineError::Storage("lock error".to_string()))?;
        f(&g)
    }

    fn transaction<T>(
        &self,
        f: impl FnOnce(&mut Database) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let mut g = self
            .inner
            .write()
            .map_err(|_| EngineError::Storage("lock error".to_string()))?;
        let mut working = g.clone();
        let out = f(&mut working)?;
        if let Err(e) = working.check_constraints() {
            log::warn!("Transaction rejected at commit: {}", e);
            return Err(e);
        }
        *g = working;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Startup, Tournament, TournamentStatus};

    #[test]
    fn failed_transaction_leaves_tables_untouched() {
        let store = InMemoryStore::new();
        let res: Result<(), EngineError> = store.transaction(|db| {
            db.startups.push(Startup::new("Acme", "We build", 2020));
            Err(EngineError::NothingToUpdate)
        });
        assert_eq!(res, Err(EngineError::NothingToUpdate));
        let count = store.read(|db| Ok(db.startups.len())).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn commit_rejects_second_waiting_tournament() {
        let store = InMemoryStore::new();
        store
            .transaction(|db| {
                db.tournaments.push(Tournament::new("Spring"));
                Ok(())
            })
            .unwrap();
        let res = store.transaction(|db| {
            db.tournaments.push(Tournament::new("Summer"));
            Ok(())
        });
        assert_eq!(res, Err(EngineError::WaitingTournamentExists));
        let waiting = store
            .read(|db| {
                Ok(db
                    .tournaments
                    .iter()
                    .filter(|t| t.status == TournamentStatus::Waiting)
                    .count())
            })
            .unwrap();
        assert_eq!(waiting, 1);
    }

    #[test]
    fn commit_rejects_duplicate_startup_names() {
        let store = InMemoryStore::new();
        let res = store.transaction(|db| {
            db.startups.push(Startup::new("Acme", "One", 2020));
            db.startups.push(Startup::new("ACME", "Two", 2021));
            Ok(())
        });
        assert_eq!(res, Err(EngineError::DuplicateStartupName));
    }

    #[test]
    fn commit_rejects_second_running_tournament() {
        let store = InMemoryStore::new();
        let res = store.transaction(|db| {
            for name in ["Spring", "Summer"] {
                let mut t = Tournament::new(name);
                t.status = TournamentStatus::InProgress;
                db.tournaments.push(t);
            }
            Ok(())
        });
        assert_eq!(res, Err(EngineError::TournamentInProgressExists));
    }

    #[test]
    fn name_folding_is_unicode_aware() {
        assert_eq!(fold_name("ÉCLAIR"), fold_name("éclair"));
        let store = InMemoryStore::new();
        let res = store.transaction(|db| {
            db.startups.push(Startup::new("Ärger", "One", 2020));
            db.startups.push(Startup::new("äRGER", "Two", 2021));
            Ok(())
        });
        assert_eq!(res, Err(EngineError::DuplicateStartupName));
    }
}
