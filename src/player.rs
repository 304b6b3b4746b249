use crate::id::PlayerId;
use serde::{Deserialize, Serialize};

/// Position labels that mark a player as a goalkeeper.
pub const GOALKEEPER_LABELS: &[&str] = &["Goleiro", "Goalkeeper"];

/// A confirmed player as seen by team formation.
///
/// Deserializing a record without a goalkeeper flag derives it from the position using
/// [`GOALKEEPER_LABELS`]; a flag that is present is kept as is.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "PlayerRecord")]
#[non_exhaustive]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub position: String,
    pub rating: f64,
    // Derived once from `position` when the record is created, never recomputed.
    pub is_goalkeeper: bool,
}

#[derive(Deserialize)]
struct PlayerRecord {
    id: PlayerId,
    name: String,
    position: String,
    rating: f64,
    #[serde(default, alias = "isGoalkeeper")]
    is_goalkeeper: Option<bool>,
}

impl From<PlayerRecord> for Player {
    fn from(record: PlayerRecord) -> Player {
        let mut player = Player::new(record.id, record.name, record.position, record.rating);
        if let Some(is_goalkeeper) = record.is_goalkeeper {
            player.is_goalkeeper = is_goalkeeper;
        }
        player
    }
}

impl Player {
    pub fn new(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        position: impl Into<String>,
        rating: f64,
    ) -> Player {
        Player::with_labels(id, name, position, rating, GOALKEEPER_LABELS)
    }

    pub fn with_labels<L: AsRef<str>>(
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        position: impl Into<String>,
        rating: f64,
        goalkeeper_labels: &[L],
    ) -> Player {
        let position = position.into();
        let is_goalkeeper = is_goalkeeper_position(&position, goalkeeper_labels);
        Player {
            id: id.into(),
            name: name.into(),
            position,
            rating,
            is_goalkeeper,
        }
    }
}

/// Case-insensitive substring match of `position` against any of `labels`.
pub fn is_goalkeeper_position<L: AsRef<str>>(position: &str, labels: &[L]) -> bool {
    let position = position.to_lowercase();
    labels.iter().any(|label| {
        let label = label.as_ref().to_lowercase();
        !label.is_empty() && position.contains(&label)
    })
}
