use crate::confirmation::{self, Confirmation, IngestConfig};
use crate::error::StoreError;
use crate::id::{GameId, PlayerId};
use crate::{Player, Rng, TeamPair};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, info};

/// The remote side of team formation: where confirmed players come from and where a finished
/// formation goes.
///
/// Implementations are responsible for dropping results that arrive after a session was
/// abandoned; the workflow does not cancel calls in flight.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn fetch_confirmed_players(&self, game: &GameId) -> Result<Vec<Player>, StoreError>;

    async fn commit_formation(
        &self,
        game: &GameId,
        team_a: &[PlayerId],
        team_b: &[PlayerId],
    ) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GameDocument {
    pub id: GameId,
    #[serde(default)]
    pub confirmations: Vec<Confirmation>,
}

/// A [`GameStore`] over game documents held in memory.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    games: BTreeMap<GameId, GameDocument>,
    config: IngestConfig,
    rng: Mutex<Rng>,
    commits: Mutex<BTreeMap<GameId, TeamPair<Vec<PlayerId>>>>,
}

impl InMemoryGameStore {
    pub fn new(config: IngestConfig, rng: Rng) -> InMemoryGameStore {
        InMemoryGameStore {
            games: BTreeMap::new(),
            config,
            rng: Mutex::new(rng),
            commits: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn insert_game(&mut self, game: GameDocument) {
        self.games.insert(game.id.clone(), game);
    }

    /// The last formation committed for `game`, if any.
    pub fn committed(&self, game: &GameId) -> Option<TeamPair<Vec<PlayerId>>> {
        self.commits
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(game)
            .cloned()
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    async fn fetch_confirmed_players(&self, game: &GameId) -> Result<Vec<Player>, StoreError> {
        let document = self
            .games
            .get(game)
            .ok_or_else(|| StoreError::GameNotFound(game.clone()))?;
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| StoreError::Unavailable("rating generator poisoned".into()))?;
        let players = confirmation::ingest(&document.confirmations, &self.config, &mut rng);
        debug!(
            game = %game,
            confirmations = document.confirmations.len(),
            players = players.len(),
            "ingested confirmations"
        );
        Ok(players)
    }

    async fn commit_formation(
        &self,
        game: &GameId,
        team_a: &[PlayerId],
        team_b: &[PlayerId],
    ) -> Result<(), StoreError> {
        if !self.games.contains_key(game) {
            return Err(StoreError::GameNotFound(game.clone()));
        }
        let mut commits = self
            .commits
            .lock()
            .map_err(|_| StoreError::Unavailable("commit log poisoned".into()))?;
        commits.insert(
            game.clone(),
            TeamPair {
                a: team_a.to_vec(),
                b: team_b.to_vec(),
            },
        );
        info!(game = %game, team_a = team_a.len(), team_b = team_b.len(), "stored formation");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{GameDocument, GameStore, InMemoryGameStore};
    use crate::confirmation::{Confirmation, ConfirmationStatus, IngestConfig};
    use crate::error::StoreError;
    use crate::id::{GameId, PlayerId};
    use crate::Rng;

    fn store() -> InMemoryGameStore {
        let mut store = InMemoryGameStore::new(IngestConfig::default(), Rng::seeded(3, 5));
        store.insert_game(GameDocument {
            id: "quinta".into(),
            confirmations: vec![Confirmation {
                user_id: Some("u1".into()),
                user_name: Some("Cafu".into()),
                position: Some("Lateral".into()),
                status: ConfirmationStatus::Confirmed,
                rating: None,
            }],
        });
        store
    }

    #[tokio::test]
    async fn fetches_known_games() {
        let players = store()
            .fetch_confirmed_players(&"quinta".into())
            .await
            .unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Cafu");
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let missing = GameId::from("domingo");
        let err = store().fetch_confirmed_players(&missing).await.unwrap_err();
        assert_eq!(err, StoreError::GameNotFound(missing.clone()));
        let err = store()
            .commit_formation(&missing, &[], &[])
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::GameNotFound(missing));
    }

    #[tokio::test]
    async fn records_commits() {
        let store = store();
        let game = GameId::from("quinta");
        assert!(store.committed(&game).is_none());
        store
            .commit_formation(&game, &[PlayerId::from("u1")], &[])
            .await
            .unwrap();
        let committed = store.committed(&game).unwrap();
        assert_eq!(committed.a, [PlayerId::from("u1")]);
        assert!(committed.b.is_empty());
    }
}
