use crate::id::PlayerId;
use crate::player::GOALKEEPER_LABELS;
use crate::{Player, Rng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A player's attendance answer for a game, as stored in the game document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Confirmation {
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
    #[serde(default, alias = "userName")]
    pub user_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub status: ConfirmationStatus,
    #[serde(default)]
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfirmationStatus {
    Confirmed,
    Cancelled,
    #[default]
    Pending,
    Waitlist,
    OnTheWay,
    CheckedIn,
    #[serde(other)]
    Other,
}

/// How confirmations are turned into players.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IngestConfig {
    pub goalkeeper_labels: Vec<String>,
    pub default_position: String,
    /// Lower bound for ratings synthesized when a confirmation has none.
    pub rating_min: f64,
    pub rating_span: f64,
}

impl Default for IngestConfig {
    fn default() -> IngestConfig {
        IngestConfig {
            goalkeeper_labels: GOALKEEPER_LABELS.iter().map(ToString::to_string).collect(),
            default_position: "Linheiro".into(),
            rating_min: 3.0,
            rating_span: 2.0,
        }
    }
}

/// Builds the seed roster from a game's confirmations.
///
/// Only `CONFIRMED` entries are kept. Missing fields fall back to `player_<index>` for the id,
/// `Jogador <index + 1>` for the name and [`IngestConfig::default_position`] for the position,
/// where `index` counts confirmed entries only. A missing rating is drawn from `rng` in
/// `[rating_min, rating_min + rating_span)`. Repeated ids keep their first occurrence.
pub fn ingest(confirmations: &[Confirmation], config: &IngestConfig, rng: &mut Rng) -> Vec<Player> {
    let mut seen = BTreeSet::new();
    confirmations
        .iter()
        .filter(|c| c.status == ConfirmationStatus::Confirmed)
        .enumerate()
        .filter_map(|(index, c)| {
            let id = c
                .user_id
                .clone()
                .map_or_else(|| PlayerId::new(format!("player_{}", index)), PlayerId);
            // draw before the duplicate check so the rating sequence does not depend on it
            let rating = c
                .rating
                .unwrap_or_else(|| rng.uniform(config.rating_min, config.rating_span));
            if !seen.insert(id.clone()) {
                return None;
            }
            Some(Player::with_labels(
                id,
                c.user_name
                    .clone()
                    .unwrap_or_else(|| format!("Jogador {}", index + 1)),
                c.position
                    .clone()
                    .unwrap_or_else(|| config.default_position.clone()),
                rating,
                &config.goalkeeper_labels,
            ))
        })
        .collect()
}

#[allow(clippy::float_cmp)]
#[cfg(test)]
mod tests {
    use super::{ingest, Confirmation, ConfirmationStatus, IngestConfig};
    use crate::Rng;

    fn confirmed(id: &str, name: &str, position: &str) -> Confirmation {
        Confirmation {
            user_id: Some(id.into()),
            user_name: Some(name.into()),
            position: Some(position.into()),
            status: ConfirmationStatus::Confirmed,
            rating: None,
        }
    }

    #[test]
    fn keeps_only_confirmed() {
        let confirmations = vec![
            confirmed("u1", "Ronaldo", "Atacante"),
            Confirmation {
                status: ConfirmationStatus::Cancelled,
                ..confirmed("u2", "Romário", "Atacante")
            },
            Confirmation {
                status: ConfirmationStatus::Waitlist,
                ..confirmed("u3", "Bebeto", "Atacante")
            },
            confirmed("u4", "Dida", "Goleiro"),
        ];
        let players = ingest(&confirmations, &IngestConfig::default(), &mut Rng::seeded(1, 2));
        let ids = players.iter().map(|p| p.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, ["u1", "u4"]);
        assert!(!players[0].is_goalkeeper);
        assert!(players[1].is_goalkeeper);
    }

    #[test]
    fn fills_missing_fields() {
        let confirmations = vec![
            confirmed("u1", "Ronaldo", "Atacante"),
            Confirmation {
                status: ConfirmationStatus::Confirmed,
                ..Confirmation::default()
            },
        ];
        let players = ingest(&confirmations, &IngestConfig::default(), &mut Rng::seeded(1, 2));
        assert_eq!(players[1].id.as_str(), "player_1");
        assert_eq!(players[1].name, "Jogador 2");
        assert_eq!(players[1].position, "Linheiro");
        assert!(!players[1].is_goalkeeper);
    }

    #[test]
    fn synthesized_ratings_are_reproducible_and_in_range() {
        let confirmations = (0..30)
            .map(|i| confirmed(&format!("u{}", i), "x", "Meia"))
            .collect::<Vec<_>>();
        let config = IngestConfig::default();
        let first = ingest(&confirmations, &config, &mut Rng::seeded(10, 20));
        let second = ingest(&confirmations, &config, &mut Rng::seeded(10, 20));
        assert_eq!(first, second);
        assert!(first.iter().all(|p| (3.0..5.0).contains(&p.rating)));
    }

    #[test]
    fn stored_ratings_win() {
        let confirmations = vec![Confirmation {
            rating: Some(4.7),
            ..confirmed("u1", "Zico", "Meia")
        }];
        let players = ingest(&confirmations, &IngestConfig::default(), &mut Rng::seeded(1, 1));
        assert_eq!(players[0].rating, 4.7);
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let confirmations = vec![
            confirmed("u1", "Sócrates", "Meia"),
            confirmed("u1", "Sócrates de novo", "Meia"),
        ];
        let players = ingest(&confirmations, &IngestConfig::default(), &mut Rng::seeded(1, 1));
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Sócrates");
    }

    #[test]
    fn reads_document_json() {
        let confirmations: Vec<Confirmation> = serde_json::from_str(
            r#"[
                {"userId": "a", "userName": "Rivaldo", "position": "Meia", "status": "CONFIRMED"},
                {"userId": "b", "status": "CHECKED_IN"},
                {"userId": "c", "status": "SOMETHING_NEW"}
            ]"#,
        )
        .unwrap();
        assert_eq!(confirmations[1].status, ConfirmationStatus::CheckedIn);
        assert_eq!(confirmations[2].status, ConfirmationStatus::Other);
        let players = ingest(&confirmations, &IngestConfig::default(), &mut Rng::seeded(1, 1));
        assert_eq!(players.len(), 1);
    }

    #[test]
    fn config_defaults_apply_to_partial_json() {
        let config: IngestConfig =
            serde_json::from_str(r#"{"goalkeeper_labels": ["Arqueiro"]}"#).unwrap();
        assert_eq!(config.default_position, "Linheiro");
        assert_eq!(config.rating_min, 3.0);

        let players = ingest(
            &[confirmed("a", "Higuita", "Arqueiro"), confirmed("b", "Dida", "Goleiro")],
            &config,
            &mut Rng::seeded(1, 1),
        );
        assert!(players[0].is_goalkeeper);
        assert!(!players[1].is_goalkeeper);
    }
}
