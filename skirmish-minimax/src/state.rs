//! The combat state: a single node of the search tree
//!
//! A [CombatState] is never mutated once built. Generating a successor copies the unit maps
//! and shares the [Arena] and [Rules] with its parent.

use std::{
    collections::BTreeMap,
    fmt::{Debug, Display},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::{
    grid::{Arena, Position},
    movegen::{
        Child, Draft, Engagement, JointAction, MeleeEngagement, RangedEngagement, UnitAction,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
/// Identifier the host gives a unit. Ids are unique across both teams
pub struct UnitId(pub u32);

impl Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The two sides of the skirmish
pub enum Team {
    /// Attacks by stepping into an adjacent enemy. This is the side the search plays for
    Melee,
    /// Attacks anything within range without having to move
    Ranged,
}

impl Team {
    /// The other side
    pub fn opponent(&self) -> Self {
        match self {
            Team::Melee => Team::Ranged,
            Team::Ranged => Team::Melee,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Fixed engagement constants for both teams
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use skirmish_minimax::state::Rules;
///
/// let rules: Rules = Default::default();
///
/// assert_eq!(rules.melee_damage, 5);
/// assert_eq!(rules.ranged_damage, 5);
/// assert_eq!(rules.ranged_range, 10);
/// ```
pub struct Rules {
    /// Health a melee attack removes from its target
    pub melee_damage: i32,
    /// Health a ranged attack removes from its target
    pub ranged_damage: i32,
    /// Ranged units can hit anything within this Chebyshev distance
    pub ranged_range: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            melee_damage: 5,
            ranged_damage: 5,
            ranged_range: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Where every unit of one team is, and how much health it has left
///
/// Units that drop to zero health stay in the roster, but they no longer act, block cells or
/// get targeted
pub struct Roster {
    positions: BTreeMap<UnitId, Position>,
    health: BTreeMap<UnitId, i32>,
}

impl Roster {
    /// Build a roster from `(id, position, health)` triples
    pub fn new(units: impl IntoIterator<Item = (UnitId, Position, i32)>) -> Self {
        let mut roster = Self::default();
        for (id, position, health) in units {
            roster.positions.insert(id, position);
            roster.health.insert(id, health);
        }
        roster
    }

    #[allow(missing_docs)]
    pub fn positions(&self) -> &BTreeMap<UnitId, Position> {
        &self.positions
    }

    #[allow(missing_docs)]
    pub fn health(&self) -> &BTreeMap<UnitId, i32> {
        &self.health
    }

    #[allow(missing_docs)]
    pub fn position_of(&self, id: &UnitId) -> Option<Position> {
        self.positions.get(id).copied()
    }

    #[allow(missing_docs)]
    pub fn health_of(&self, id: &UnitId) -> Option<i32> {
        self.health.get(id).copied()
    }

    /// A unit is alive while it has more than zero health
    pub fn is_alive(&self, id: &UnitId) -> bool {
        self.health_of(id).map_or(false, |hp| hp > 0)
    }

    /// `(id, position, health)` for every unit, fallen ones included, in id order
    pub fn units(&self) -> impl Iterator<Item = (UnitId, Position, i32)> + '_ {
        self.positions
            .iter()
            .filter_map(|(id, position)| Some((*id, *position, self.health_of(id)?)))
    }

    /// `(id, position, health)` for every living unit, in id order
    pub fn living(&self) -> impl Iterator<Item = (UnitId, Position, i32)> + '_ {
        self.positions.iter().filter_map(|(id, position)| {
            let health = self.health_of(id)?;
            (health > 0).then_some((*id, *position, health))
        })
    }

    /// The living unit standing on `p`, if any
    pub fn living_at(&self, p: &Position) -> Option<UnitId> {
        self.living().find(|(_, pos, _)| pos == p).map(|(id, _, _)| id)
    }

    pub(crate) fn from_parts(
        positions: BTreeMap<UnitId, Position>,
        health: BTreeMap<UnitId, i32>,
    ) -> Self {
        Self { positions, health }
    }
}

#[derive(Clone, PartialEq, Eq)]
/// A snapshot of the skirmish: who stands where, how healthy they are and whose turn it is
pub struct CombatState {
    arena: Arc<Arena>,
    rules: Arc<Rules>,
    turn: Team,
    melee: Roster,
    ranged: Roster,
}

impl CombatState {
    /// Construct the root state of a search. The melee team always moves first
    pub fn new(arena: Arena, rules: Rules, melee: Roster, ranged: Roster) -> Self {
        Self {
            arena: Arc::new(arena),
            rules: Arc::new(rules),
            turn: Team::Melee,
            melee,
            ranged,
        }
    }

    /// Same state, but with the given team on turn
    pub fn with_turn(mut self, turn: Team) -> Self {
        self.turn = turn;
        self
    }

    /// Build the state that follows this one. The arena and rules are shared, the turn flips
    pub(crate) fn successor(&self, melee: Roster, ranged: Roster) -> Self {
        Self {
            arena: Arc::clone(&self.arena),
            rules: Arc::clone(&self.rules),
            turn: self.turn.opponent(),
            melee,
            ranged,
        }
    }

    /// The team whose joint action this node is choosing
    pub fn turn(&self) -> Team {
        self.turn
    }

    #[allow(missing_docs)]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    #[allow(missing_docs)]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    #[allow(missing_docs)]
    pub fn roster(&self, team: Team) -> &Roster {
        match team {
            Team::Melee => &self.melee,
            Team::Ranged => &self.ranged,
        }
    }

    /// The living unit on `p` and the team it belongs to
    pub fn unit_at(&self, p: &Position) -> Option<(Team, UnitId)> {
        self.melee
            .living_at(p)
            .map(|id| (Team::Melee, id))
            .or_else(|| self.ranged.living_at(p).map(|id| (Team::Ranged, id)))
    }

    /// The skirmish is over once either team has nobody left standing
    pub fn is_over(&self) -> bool {
        self.melee.living().next().is_none() || self.ranged.living().next().is_none()
    }

    /// Can a unit step onto `p` in this state?
    ///
    /// It has to be on the map (the extents are inclusive), not an obstacle and not occupied by
    /// a living unit of either team
    pub fn is_legal_destination(&self, p: &Position) -> bool {
        self.arena.is_open(p) && self.unit_at(p).is_none()
    }

    /// Every joint action the team on turn can take, each paired with the state it leads to
    pub fn children(&self) -> Vec<Child> {
        match self.turn {
            Team::Melee => MeleeEngagement.children(self),
            Team::Ranged => RangedEngagement.children(self),
        }
    }

    /// Apply a joint action for the team on turn
    ///
    /// Returns `None` if any of the unit actions isn't legal: a unit that is dead or not on
    /// the team, a move onto a blocked cell, or an attack the unit can't reach
    pub fn apply(&self, action: &JointAction) -> Option<Self> {
        let (engagement, damage): (&dyn Engagement, i32) = match self.turn {
            Team::Melee => (&MeleeEngagement, self.rules.melee_damage),
            Team::Ranged => (&RangedEngagement, self.rules.ranged_damage),
        };
        let own = self.roster(self.turn);
        let enemies = self.roster(self.turn.opponent());

        let mut draft = Draft::new(self);
        for (unit, unit_action) in action {
            if !own.is_alive(unit) {
                return None;
            }
            let from = own.position_of(unit)?;

            match unit_action {
                UnitAction::Move(direction) => {
                    if !draft.can_move_to(&from.step(*direction)) {
                        return None;
                    }
                }
                UnitAction::Attack(target) => {
                    if !enemies.is_alive(target) {
                        return None;
                    }
                    let target_position = enemies.position_of(target)?;
                    if !engagement.in_reach(self, &from, &target_position) {
                        return None;
                    }
                }
            }

            draft = draft.with(*unit, from, *unit_action, damage);
        }

        Some(draft.into_child().state)
    }
}

impl Debug for CombatState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatState")
            .field("turn", &self.turn)
            .field("melee", &self.melee)
            .field("ranged", &self.ranged)
            .finish_non_exhaustive()
    }
}

impl Display for CombatState {
    /// Draws the board, `M`/`R` for living units, `x` for fallen ones and `#` for obstacles
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let anyone_at = |p: &Position| {
            self.melee
                .positions
                .values()
                .chain(self.ranged.positions.values())
                .any(|pos| pos == p)
        };

        for y in 0..=self.arena.height() {
            for x in 0..=self.arena.width() {
                let p = Position::new(x, y);
                let c = match self.unit_at(&p) {
                    Some((Team::Melee, _)) => 'M',
                    Some((Team::Ranged, _)) => 'R',
                    None if self.arena.is_obstacle(&p) => '#',
                    None if anyone_at(&p) => 'x',
                    None => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
