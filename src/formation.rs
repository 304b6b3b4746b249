use crate::balance::{self, Balance};
use crate::id::PlayerId;
use crate::{Player, Rng, Side};
use derive_more::Deref;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

/// Where a player currently sits. Every player has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "side")]
pub enum Assignment {
    Available,
    Team(Side),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct Slot {
    player: Player,
    assignment: Assignment,
    // Position within the slot's container; moves append by taking a fresh value.
    order: u64,
}

/// The live split of a fixed set of confirmed players into the available pool and two teams.
///
/// Membership is a tag on each player rather than three separate lists, so a player can never
/// be in two containers at once or go missing. The three ordered containers are derived views.
/// The cached [`Balance`] is refreshed before every mutating method returns, and deserializing
/// rejects inconsistent state and recomputes it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(try_from = "RawFormation")]
pub struct Formation {
    slots: Vec<Slot>,
    next_order: u64,
    #[serde(skip)]
    balance: Balance,
}

#[derive(Deserialize)]
struct RawFormation {
    slots: Vec<Slot>,
    next_order: u64,
}

impl TryFrom<RawFormation> for Formation {
    type Error = String;

    fn try_from(raw: RawFormation) -> Result<Formation, String> {
        let mut formation = Formation {
            slots: raw.slots,
            next_order: raw.next_order,
            balance: Balance::default(),
        };
        formation.check_consistency()?;
        formation.refresh();
        Ok(formation)
    }
}

/// Players assigned to one team, in the order they were added.
#[derive(Debug, Deref)]
pub struct TeamView<'a>(Vec<&'a Player>);

impl TeamView<'_> {
    pub fn rating(&self) -> f64 {
        balance::sum_ratings(self.0.iter().copied())
    }

    pub fn has_goalkeeper(&self) -> bool {
        balance::has_goalkeeper(self.0.iter().copied())
    }

    pub fn ids(&self) -> Vec<PlayerId> {
        self.0.iter().map(|player| player.id.clone()).collect()
    }
}

impl Formation {
    pub fn new(players: Vec<Player>) -> Formation {
        let mut formation = Formation::default();
        formation.initialize(players);
        formation
    }

    /// Discards the current state and places every player in the available pool.
    pub fn initialize(&mut self, players: Vec<Player>) {
        let mut seen = BTreeSet::new();
        self.slots.clear();
        for player in players {
            if !seen.insert(player.id.clone()) {
                warn!(player = %player.id, "duplicate player id in roster, keeping the first");
                continue;
            }
            self.slots.push(Slot {
                player,
                assignment: Assignment::Available,
                order: 0,
            });
        }
        self.next_order = 0;
        for slot in &mut self.slots {
            slot.order = self.next_order;
            self.next_order += 1;
        }
        self.refresh();
    }

    /// Moves a player from the pool or the other team to the end of `side`. Unknown ids are
    /// ignored; returns whether anything moved.
    pub fn move_to_team(&mut self, id: &PlayerId, side: Side) -> bool {
        self.reassign(id, Assignment::Team(side), |_| true)
    }

    /// Moves a player from either team back to the end of the pool. Ignored for unknown ids
    /// and for players already in the pool.
    pub fn move_to_available(&mut self, id: &PlayerId) -> bool {
        self.reassign(id, Assignment::Available, |current| {
            matches!(current, Assignment::Team(_))
        })
    }

    /// Returns every assigned player to the pool, after the players already there.
    pub fn reset(&mut self) {
        let order = self.ordered_indices();
        for idx in order {
            let order = self.take_order();
            let slot = &mut self.slots[idx];
            slot.assignment = Assignment::Available;
            slot.order = order;
        }
        self.refresh();
    }

    /// Randomly splits the whole player set, ignoring current placement. Team A gets
    /// `floor(n / 2)` players and team B the rest, so B has the extra player when `n` is odd.
    /// Neither rating balance nor goalkeeper coverage is considered.
    pub fn shuffle(&mut self, rng: &mut Rng) {
        let mut order = self.ordered_indices();
        rng.shuffle(&mut order);
        let midpoint = order.len() / 2;
        for (position, idx) in order.into_iter().enumerate() {
            let side = if position < midpoint { Side::A } else { Side::B };
            let order = self.take_order();
            let slot = &mut self.slots[idx];
            slot.assignment = Assignment::Team(side);
            slot.order = order;
        }
        self.refresh();
    }

    pub fn available(&self) -> Vec<&Player> {
        self.view(Assignment::Available)
    }

    pub fn team(&self, side: Side) -> TeamView<'_> {
        TeamView(self.view(Assignment::Team(side)))
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.slots.iter().map(|slot| &slot.player)
    }

    pub fn assignment_of(&self, id: &PlayerId) -> Option<Assignment> {
        self.slots
            .iter()
            .find(|slot| slot.player.id == *id)
            .map(|slot| slot.assignment)
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn has_goalkeeper(&self, side: Side) -> bool {
        balance::has_goalkeeper(self.members(Assignment::Team(side)))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn unassigned_count(&self) -> usize {
        self.members(Assignment::Available).count()
    }

    pub(crate) fn check_consistency(&self) -> Result<(), String> {
        let mut problems = Vec::new();

        let mut ids = BTreeSet::new();
        for player in self.players() {
            if !ids.insert(&player.id) {
                problems.push(format!("- player {} appears more than once", player.id));
            }
        }

        let mut orders = BTreeSet::new();
        for slot in &self.slots {
            if !orders.insert(slot.order) {
                problems.push(format!("- order {} is used more than once", slot.order));
            }
            if slot.order >= self.next_order {
                problems.push(format!(
                    "- player {} has order {} past the next order {}",
                    slot.player.id, slot.order, self.next_order
                ));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems.join("\n"))
        }
    }

    fn reassign<F>(&mut self, id: &PlayerId, target: Assignment, allowed: F) -> bool
    where
        F: FnOnce(Assignment) -> bool,
    {
        let Some(idx) = self.slots.iter().position(|slot| slot.player.id == *id) else {
            return false;
        };
        if !allowed(self.slots[idx].assignment) {
            return false;
        }
        let order = self.take_order();
        let slot = &mut self.slots[idx];
        slot.assignment = target;
        slot.order = order;
        self.refresh();
        true
    }

    fn take_order(&mut self) -> u64 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }

    fn members(&self, assignment: Assignment) -> impl Iterator<Item = &Player> {
        self.slots
            .iter()
            .filter(move |slot| slot.assignment == assignment)
            .map(|slot| &slot.player)
    }

    fn view(&self, assignment: Assignment) -> Vec<&Player> {
        let mut slots = self
            .slots
            .iter()
            .filter(|slot| slot.assignment == assignment)
            .collect::<Vec<_>>();
        slots.sort_by_key(|slot| slot.order);
        slots.into_iter().map(|slot| &slot.player).collect()
    }

    /// Slot indices in container order: the pool, then team A, then team B.
    fn ordered_indices(&self) -> Vec<usize> {
        let mut indices = (0..self.slots.len()).collect::<Vec<_>>();
        indices.sort_by_key(|&idx| {
            let slot = &self.slots[idx];
            let rank = match slot.assignment {
                Assignment::Available => 0,
                Assignment::Team(Side::A) => 1,
                Assignment::Team(Side::B) => 2,
            };
            (rank, slot.order)
        });
        indices
    }

    fn refresh(&mut self) {
        self.balance = balance::evaluate(
            balance::sum_ratings(self.members(Assignment::Team(Side::A))),
            balance::sum_ratings(self.members(Assignment::Team(Side::B))),
        );

        if cfg!(debug_assertions) {
            if let Err(problems) = self.check_consistency() {
                panic!("formation is inconsistent:\n{}", problems);
            }
        }
    }
}
