//! Battle scoring: how many points a startup earns from one battle's events.

use crate::models::EventFlags;

pub const PERSUASIVE_PITCH_POINTS: i32 = 6;
pub const BUGGY_PRODUCT_POINTS: i32 = -4;
pub const USER_TRACTION_POINTS: i32 = 3;
pub const INVESTOR_UPSET_POINTS: i32 = -6;
pub const FAKE_NEWS_POINTS: i32 = -8;

/// Bonus for winning a battle.
pub const ROUND_BONUS: i32 = 30;
/// Bonus for advancing on a bye.
pub const BYE_BONUS: i32 = 30;

/// Score delta for one startup in one battle: sum of the weights of the flags that are set.
pub fn score(flags: &EventFlags) -> i32 {
    [
        (flags.persuasive_pitch, PERSUASIVE_PITCH_POINTS),
        (flags.buggy_product, BUGGY_PRODUCT_POINTS),
        (flags.user_traction, USER_TRACTION_POINTS),
        (flags.investor_upset, INVESTOR_UPSET_POINTS),
        (flags.fake_news, FAKE_NEWS_POINTS),
    ]
    .into_iter()
    .filter(|(set, _)| *set)
    .map(|(_, points)| points)
    .sum()
}
