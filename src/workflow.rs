use crate::error::FormationError;
use crate::formation::Formation;
use crate::id::{GameId, PlayerId};
use crate::{Balance, GameStore, Rng, Side, TeamColor, TeamPair};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A formation in progress: the partition plus the colors picked for each team.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Session {
    pub formation: Formation,
    #[serde(default)]
    pub colors: TeamPair<TeamColor>,
}

impl Session {
    pub fn new(formation: Formation) -> Session {
        Session {
            formation,
            colors: TeamPair::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum WorkflowState {
    Loading,
    Ready(Session),
    /// The committed rosters.
    Confirmed(TeamPair<Vec<PlayerId>>),
    Error(String),
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Loading => "loading",
            WorkflowState::Ready(_) => "ready",
            WorkflowState::Confirmed(_) => "confirmed",
            WorkflowState::Error(_) => "error",
        }
    }
}

/// What a confirmation prompt shows. Confirming is allowed whatever these numbers are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfirmSummary {
    pub team_a_size: usize,
    pub team_b_size: usize,
    pub unassigned_count: usize,
}

impl ConfirmSummary {
    pub fn has_unassigned(&self) -> bool {
        self.unassigned_count > 0
    }
}

/// Drives one game's team formation from loading the confirmed players to committing the
/// teams.
///
/// Partition edits only apply in the ready state and are ignored otherwise. `load` and
/// `confirm` are the only calls that reach the store, and neither retries on its own.
pub struct FormationWorkflow<S> {
    store: S,
    rng: Rng,
    game: GameId,
    state: WorkflowState,
}

impl<S: GameStore> FormationWorkflow<S> {
    pub fn new(store: S, game: GameId) -> FormationWorkflow<S> {
        FormationWorkflow::with_rng(store, game, Rng::new())
    }

    /// Uses `rng` for shuffles, so a seeded generator makes them reproducible.
    pub fn with_rng(store: S, game: GameId, rng: Rng) -> FormationWorkflow<S> {
        FormationWorkflow {
            store,
            rng,
            game,
            state: WorkflowState::Loading,
        }
    }

    pub fn game(&self) -> &GameId {
        &self.game
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            WorkflowState::Ready(session) => Some(session),
            _ => None,
        }
    }

    pub fn balance(&self) -> Option<Balance> {
        self.session().map(|session| session.formation.balance())
    }

    /// Fetches the confirmed players and starts a fresh session with all of them unassigned.
    /// Also the way out of the error state.
    ///
    /// # Errors
    ///
    /// Returns [`FormationError::Load`] when the store cannot provide the players; the
    /// workflow is then in [`WorkflowState::Error`].
    pub async fn load(&mut self) -> Result<(), FormationError> {
        self.state = WorkflowState::Loading;
        match self.store.fetch_confirmed_players(&self.game).await {
            Ok(players) => {
                info!(game = %self.game, players = players.len(), "loaded confirmed players");
                self.state = WorkflowState::Ready(Session::new(Formation::new(players)));
                Ok(())
            }
            Err(source) => {
                warn!(game = %self.game, error = %source, "failed to load confirmed players");
                self.state = WorkflowState::Error(source.to_string());
                Err(FormationError::Load {
                    game: self.game.clone(),
                    source,
                })
            }
        }
    }

    /// Picks up a session saved earlier instead of loading a fresh one.
    pub fn resume(&mut self, session: Session) {
        debug!(game = %self.game, players = session.formation.len(), "resumed session");
        self.state = WorkflowState::Ready(session);
    }

    pub fn move_to_team(&mut self, player: &PlayerId, side: Side) {
        self.edit("move_to_team", |session| {
            if !session.formation.move_to_team(player, side) {
                debug!(player = %player, "ignored move of unknown player");
            }
        });
    }

    pub fn move_to_available(&mut self, player: &PlayerId) {
        self.edit("move_to_available", |session| {
            if !session.formation.move_to_available(player) {
                debug!(player = %player, "ignored move of unassigned or unknown player");
            }
        });
    }

    pub fn reset(&mut self) {
        self.edit("reset", |session| session.formation.reset());
    }

    pub fn shuffle(&mut self) {
        let rng = &mut self.rng;
        if let WorkflowState::Ready(session) = &mut self.state {
            session.formation.shuffle(rng);
            let balance = session.formation.balance();
            debug!(
                rating_a = balance.rating_a,
                rating_b = balance.rating_b,
                balanced = balance.is_balanced,
                "shuffled teams"
            );
        } else {
            debug!(state = self.state.name(), "ignored shuffle outside the ready state");
        }
    }

    pub fn set_color(&mut self, side: Side, color: TeamColor) {
        self.edit("set_color", |session| session.colors.set(side, color));
    }

    /// Team sizes and the number of players left without a team, for a confirmation prompt.
    pub fn request_confirm(&self) -> Option<ConfirmSummary> {
        self.session().map(|session| ConfirmSummary {
            team_a_size: session.formation.team(Side::A).len(),
            team_b_size: session.formation.team(Side::B).len(),
            unassigned_count: session.formation.unassigned_count(),
        })
    }

    /// Commits the current teams. Players still unassigned are simply left out.
    ///
    /// # Errors
    ///
    /// Returns [`FormationError::NotReady`] outside the ready state and
    /// [`FormationError::Commit`] when the store rejects the formation. After a failed commit
    /// the session is untouched and `confirm` can be called again.
    pub async fn confirm(&mut self) -> Result<(), FormationError> {
        let WorkflowState::Ready(session) = &self.state else {
            return Err(FormationError::NotReady(self.state.name()));
        };
        let teams = TeamPair {
            a: session.formation.team(Side::A).ids(),
            b: session.formation.team(Side::B).ids(),
        };
        let unassigned = session.formation.unassigned_count();

        match self
            .store
            .commit_formation(&self.game, &teams.a, &teams.b)
            .await
        {
            Ok(()) => {
                info!(
                    game = %self.game,
                    team_a = teams.a.len(),
                    team_b = teams.b.len(),
                    unassigned,
                    "formation confirmed"
                );
                self.state = WorkflowState::Confirmed(teams);
                Ok(())
            }
            Err(source) => {
                warn!(game = %self.game, error = %source, "failed to commit formation");
                Err(FormationError::Commit {
                    game: self.game.clone(),
                    source,
                })
            }
        }
    }

    fn edit<F>(&mut self, operation: &'static str, op: F)
    where
        F: FnOnce(&mut Session),
    {
        if let WorkflowState::Ready(session) = &mut self.state {
            op(session);
        } else {
            debug!(
                operation,
                state = self.state.name(),
                "ignored edit outside the ready state"
            );
        }
    }
}
