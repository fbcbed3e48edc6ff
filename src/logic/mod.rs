//! Tournament business logic: scoring, bracket shape, entry, launch, battles, rounds.
//!
//! Every function here works on a [`Database`](crate::store::Database) and is
//! meant to run inside a single store transaction.

mod advance;
mod battle;
mod bracket;
mod directory;
mod entry;
mod launch;
pub mod queries;
mod registry;
mod scoring;

pub use advance::{advance_round, AdvanceSummary};
pub use battle::{delete_battle, resolve_battle, start_battle, EventScore, ResolutionSummary};
pub use bracket::{first_round, pair_into_battles, resolve_phase};
pub use directory::{create_startup, delete_startup, update_startup, StartupPatch, MIN_FOUNDING_YEAR};
pub use entry::admit_startup;
pub use launch::{launch_tournament, MAX_ENTRANTS, MIN_ENTRANTS};
pub use queries::{RankingEntry, Standing};
pub use registry::{create_tournament, delete_tournament, rename_tournament};
pub use scoring::{
    score, BUGGY_PRODUCT_POINTS, BYE_BONUS, FAKE_NEWS_POINTS, INVESTOR_UPSET_POINTS,
    PERSUASIVE_PITCH_POINTS, ROUND_BONUS, USER_TRACTION_POINTS,
};
