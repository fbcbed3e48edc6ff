//! Startup and its lifetime statistics.

use crate::models::battle::EventFlags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a startup (used in participations, battles, and lookups).
pub type StartupId = Uuid;

/// How many times each battle event has been recorded.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct EventCounters {
    pub persuasive_pitch: u32,
    pub buggy_product: u32,
    pub user_traction: u32,
    pub investor_upset: u32,
    pub fake_news: u32,
}

impl EventCounters {
    /// Add one to every counter whose flag is set.
    pub fn record(&mut self, flags: &EventFlags) {
        self.persuasive_pitch += u32::from(flags.persuasive_pitch);
        self.buggy_product += u32::from(flags.buggy_product);
        self.user_traction += u32::from(flags.user_traction);
        self.investor_upset += u32::from(flags.investor_upset);
        self.fake_news += u32::from(flags.fake_news);
    }
}

/// A startup registered in the directory. Outlives any single tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Startup {
    pub id: StartupId,
    pub name: String,
    pub slogan: String,
    pub founding_year: i32,
    /// Lifetime event counters across every battle fought.
    pub events: EventCounters,
    /// Lifetime score: battle deltas plus round and bye bonuses.
    pub total_score: i32,
    pub battle_wins: u32,
    pub tournament_wins: u32,
    pub created_at: DateTime<Utc>,
}

impl Startup {
    /// Create a new startup. Counters start at zero.
    pub fn new(name: impl Into<String>, slogan: impl Into<String>, founding_year: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            slogan: slogan.into(),
            founding_year,
            events: EventCounters::default(),
            total_score: 0,
            battle_wins: 0,
            tournament_wins: 0,
            created_at: Utc::now(),
        }
    }

    /// Apply one battle's events and score delta.
    pub fn record_battle(&mut self, flags: &EventFlags, delta: i32) {
        self.events.record(flags);
        self.total_score += delta;
    }

    /// Record a battle win together with its bonus.
    pub fn add_win(&mut self, bonus: i32) {
        self.battle_wins += 1;
        self.total_score += bonus;
    }

    pub fn add_tournament_win(&mut self) {
        self.tournament_wins += 1;
    }
}
