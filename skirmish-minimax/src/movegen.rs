//! Joint action generation
//!
//! The two teams engage differently, so each gets its own [Engagement]:
//!
//! - [MeleeEngagement] moves every living unit at once. Each unit either steps in one of the
//!   four directions, attacks the enemy it would have stepped onto, or holds. The joint actions
//!   are the cross product of those choices, built one unit at a time.
//! - [RangedEngagement] branches on a single unit action per child: one unit moves, or one enemy
//!   in range gets shot. Moves and shots are never combined in the same child.

use std::{
    collections::{BTreeMap, HashSet},
    fmt::Display,
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    grid::{Direction, Position},
    state::{CombatState, Roster, Team, UnitId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// What a single unit does during its team's turn
pub enum UnitAction {
    /// Step one cell in the given direction
    Move(Direction),
    /// Hit the given enemy unit
    Attack(UnitId),
}

impl Display for UnitAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitAction::Move(direction) => write!(f, "move {direction}"),
            UnitAction::Attack(target) => write!(f, "attack {target}"),
        }
    }
}

/// One action per unit of the team on turn. Units without an entry do nothing
pub type JointAction = BTreeMap<UnitId, UnitAction>;

/// Human readable form of a joint action, used for logs and the text tree
pub fn describe(action: &JointAction) -> String {
    if action.is_empty() {
        return "hold".to_owned();
    }

    action
        .iter()
        .map(|(unit, unit_action)| format!("{unit} {unit_action}"))
        .join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A joint action together with the state it leads to
pub struct Child {
    /// Empty for the root of a search
    pub action: JointAction,
    #[allow(missing_docs)]
    pub state: CombatState,
}

impl Child {
    /// Wrap the current state of the game so it can be the root of a search
    pub fn root(state: CombatState) -> Self {
        Self {
            action: JointAction::new(),
            state,
        }
    }
}

/// How one team turns a state into its children
pub trait Engagement {
    /// The team this engagement generates moves for
    fn team(&self) -> Team;

    /// Can a unit standing on `attacker` hit a unit standing on `target`?
    fn in_reach(&self, state: &CombatState, attacker: &Position, target: &Position) -> bool;

    /// All children of `state`. The caller makes sure it's this engagement's team on turn
    fn children(&self, state: &CombatState) -> Vec<Child>;
}

/// A child under construction. Cloned at every branch of the melee cross product
#[derive(Debug, Clone)]
pub(crate) struct Draft<'a> {
    parent: &'a CombatState,
    action: JointAction,
    own_positions: BTreeMap<UnitId, Position>,
    enemy_health: BTreeMap<UnitId, i32>,
    claimed: HashSet<Position>,
}

impl<'a> Draft<'a> {
    pub(crate) fn new(parent: &'a CombatState) -> Self {
        let team = parent.turn();

        Self {
            parent,
            action: JointAction::new(),
            own_positions: parent.roster(team).positions().clone(),
            enemy_health: parent.roster(team.opponent()).health().clone(),
            claimed: HashSet::new(),
        }
    }

    /// Legal in the parent, and not already taken by a teammate earlier in this joint action
    pub(crate) fn can_move_to(&self, p: &Position) -> bool {
        self.parent.is_legal_destination(p) && !self.claimed.contains(p)
    }

    pub(crate) fn with(
        mut self,
        unit: UnitId,
        from: Position,
        unit_action: UnitAction,
        damage: i32,
    ) -> Self {
        match unit_action {
            UnitAction::Move(direction) => {
                let to = from.step(direction);
                self.own_positions.insert(unit, to);
                self.claimed.insert(to);
            }
            UnitAction::Attack(target) => {
                if let Some(health) = self.enemy_health.get_mut(&target) {
                    *health -= damage;
                }
            }
        }
        self.action.insert(unit, unit_action);
        self
    }

    pub(crate) fn into_child(self) -> Child {
        let team = self.parent.turn();

        let own = Roster::from_parts(
            self.own_positions,
            self.parent.roster(team).health().clone(),
        );
        let enemy = Roster::from_parts(
            self.parent.roster(team.opponent()).positions().clone(),
            self.enemy_health,
        );
        let (melee, ranged) = match team {
            Team::Melee => (own, enemy),
            Team::Ranged => (enemy, own),
        };

        Child {
            action: self.action,
            state: self.parent.successor(melee, ranged),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Attack by stepping into an enemy, every unit acting in the same joint action
pub struct MeleeEngagement;

impl MeleeEngagement {
    /// What stepping from `from` in `direction` amounts to, given what this draft already
    /// claimed. `None` when the step is blocked by the map or a teammate
    fn outcome(
        &self,
        draft: &Draft,
        from: &Position,
        direction: Direction,
    ) -> Option<UnitAction> {
        let to = from.step(direction);

        if draft.can_move_to(&to) {
            return Some(UnitAction::Move(direction));
        }

        match draft.parent.unit_at(&to) {
            Some((Team::Ranged, enemy)) => Some(UnitAction::Attack(enemy)),
            _ => None,
        }
    }

    fn compose(
        &self,
        units: &[(UnitId, Position)],
        draft: Draft,
        damage: i32,
        children: &mut Vec<Child>,
    ) {
        let Some((&(unit, from), rest)) = units.split_first() else {
            if !draft.action.is_empty() {
                children.push(draft.into_child());
            }
            return;
        };

        let mut choices = Vec::with_capacity(4);
        let mut can_hold = false;
        for direction in Direction::all() {
            match self.outcome(&draft, &from, direction) {
                Some(choice) => choices.push(choice),
                None => can_hold = true,
            }
        }

        for choice in choices {
            let next = draft.clone().with(unit, from, choice, damage);
            self.compose(rest, next, damage, children);
        }

        // A blocked direction leaves the unit where it is, the rest of the team still acts
        if can_hold {
            self.compose(rest, draft, damage, children);
        }
    }
}

impl Engagement for MeleeEngagement {
    fn team(&self) -> Team {
        Team::Melee
    }

    fn in_reach(&self, _state: &CombatState, attacker: &Position, target: &Position) -> bool {
        attacker.manhattan_distance(target) == 1
    }

    fn children(&self, state: &CombatState) -> Vec<Child> {
        let units = state
            .roster(Team::Melee)
            .living()
            .map(|(id, position, _)| (id, position))
            .collect_vec();

        let mut children = vec![];
        self.compose(
            &units,
            Draft::new(state),
            state.rules().melee_damage,
            &mut children,
        );

        trace!(
            units = units.len(),
            children = children.len(),
            "generated melee children"
        );
        children
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Shoot anything in range or reposition, one unit action per child
pub struct RangedEngagement;

impl Engagement for RangedEngagement {
    fn team(&self) -> Team {
        Team::Ranged
    }

    fn in_reach(&self, state: &CombatState, attacker: &Position, target: &Position) -> bool {
        attacker.chebyshev_distance(target) <= state.rules().ranged_range
    }

    fn children(&self, state: &CombatState) -> Vec<Child> {
        let damage = state.rules().ranged_damage;
        let mut children = vec![];

        for (unit, from, _) in state.roster(Team::Ranged).living() {
            for (direction, to) in from.neighbors() {
                if state.is_legal_destination(&to) {
                    children.push(
                        Draft::new(state)
                            .with(unit, from, UnitAction::Move(direction), damage)
                            .into_child(),
                    );
                }
            }

            for (target, target_position, _) in state.roster(Team::Melee).living() {
                if self.in_reach(state, &from, &target_position) {
                    children.push(
                        Draft::new(state)
                            .with(unit, from, UnitAction::Attack(target), damage)
                            .into_child(),
                    );
                }
            }
        }

        trace!(children = children.len(), "generated ranged children");
        children
    }
}
