//! Team formation for pickup football games: splits the players confirmed for a game into two
//! teams, tracks rating balance and goalkeeper coverage, and hands the result to a store.

#![warn(clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

pub mod balance;
pub mod confirmation;
mod error;
pub mod formation;
pub mod id;
mod player;
mod rng;
mod store;
mod team;
mod workflow;

pub use crate::balance::{Balance, BALANCE_TOLERANCE};
pub use crate::confirmation::{Confirmation, ConfirmationStatus, IngestConfig};
pub use crate::error::{FormationError, StoreError};
pub use crate::formation::{Assignment, Formation, TeamView};
pub use crate::player::{is_goalkeeper_position, Player, GOALKEEPER_LABELS};
pub use crate::rng::Rng;
pub use crate::store::{GameDocument, GameStore, InMemoryGameStore};
pub use crate::team::{Side, TeamColor, TeamPair};
pub use crate::workflow::{ConfirmSummary, FormationWorkflow, Session, WorkflowState};
