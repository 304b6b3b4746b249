use crate::Player;
use serde::{Deserialize, Serialize};

/// Maximum (exclusive) difference between the two teams' rating sums for the split to count
/// as balanced. Compared against sums, not averages.
pub const BALANCE_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Balance {
    pub rating_a: f64,
    pub rating_b: f64,
    pub is_balanced: bool,
}

impl Balance {
    pub fn difference(&self) -> f64 {
        (self.rating_a - self.rating_b).abs()
    }

    /// Team A's fraction of the combined rating; 0.5 when nobody is assigned.
    pub fn share_a(&self) -> f64 {
        let total = self.rating_a + self.rating_b;
        if total > 0.0 {
            self.rating_a / total
        } else {
            0.5
        }
    }
}

impl Default for Balance {
    fn default() -> Balance {
        evaluate(0.0, 0.0)
    }
}

pub fn sum_ratings<'a, I>(players: I) -> f64
where
    I: IntoIterator<Item = &'a Player>,
{
    // starts at +0.0 so an empty team sums to 0.0 rather than -0.0
    players
        .into_iter()
        .fold(0.0, |sum, player| sum + player.rating)
}

pub fn evaluate(rating_a: f64, rating_b: f64) -> Balance {
    Balance {
        rating_a,
        rating_b,
        is_balanced: (rating_a - rating_b).abs() < BALANCE_TOLERANCE,
    }
}

pub fn has_goalkeeper<'a, I>(players: I) -> bool
where
    I: IntoIterator<Item = &'a Player>,
{
    players.into_iter().any(|player| player.is_goalkeeper)
}
