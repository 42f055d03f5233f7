//! What the host sends us and what we send back
//!
//! A [Snapshot] is the whole battlefield at the start of our turn. The answer is a list of
//! [WireAction]s, one per unit that does something:
//!
//! ```json
//! [{ "unit": 1, "move": "east" }, { "unit": 2, "attack": 10 }]
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    grid::{Arena, Position},
    movegen::{JointAction, UnitAction},
    state::{CombatState, Roster, Rules, UnitId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// One unit as the host describes it
pub struct UnitRecord {
    #[allow(missing_docs)]
    pub id: UnitId,
    #[allow(missing_docs)]
    pub position: Position,
    #[allow(missing_docs)]
    pub health: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// The battlefield as the host describes it
pub struct Snapshot {
    /// Largest valid x coordinate
    pub width: i32,
    /// Largest valid y coordinate
    pub height: i32,
    #[serde(default)]
    #[allow(missing_docs)]
    pub obstacles: Vec<Position>,
    #[allow(missing_docs)]
    pub melee: Vec<UnitRecord>,
    #[allow(missing_docs)]
    pub ranged: Vec<UnitRecord>,
}

fn roster(units: &[UnitRecord]) -> Roster {
    Roster::new(units.iter().map(|u| (u.id, u.position, u.health)))
}

impl Snapshot {
    /// The search root for this snapshot, melee team on turn
    pub fn to_state(&self, rules: Rules) -> CombatState {
        CombatState::from_snapshot(self, rules)
    }
}

impl CombatState {
    /// Build the root state from what the host sent. Nothing is validated beyond what serde
    /// already checked
    pub fn from_snapshot(snapshot: &Snapshot, rules: Rules) -> Self {
        CombatState::new(
            Arena::new(
                snapshot.width,
                snapshot.height,
                snapshot.obstacles.iter().copied(),
            ),
            rules,
            roster(&snapshot.melee),
            roster(&snapshot.ranged),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// A single unit's action on the wire
pub struct WireAction {
    #[allow(missing_docs)]
    pub unit: UnitId,
    #[serde(flatten)]
    #[allow(missing_docs)]
    pub action: UnitAction,
}

/// Flatten a joint action into the list the host expects, ordered by unit id
pub fn to_wire(action: &JointAction) -> Vec<WireAction> {
    action
        .iter()
        .map(|(unit, action)| WireAction {
            unit: *unit,
            action: *action,
        })
        .collect()
}

/// The inverse of [to_wire]. A unit listed twice keeps its last action
pub fn from_wire(actions: &[WireAction]) -> JointAction {
    actions.iter().map(|a| (a.unit, a.action)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{grid::Direction, state::Team};

    #[test]
    fn test_snapshot_fixture_parses() {
        let snapshot: Snapshot =
            serde_json::from_str(include_str!("../fixtures/walled.json")).unwrap();

        assert_eq!(snapshot.width, 6);
        assert_eq!(snapshot.height, 6);
        assert!(snapshot.obstacles.contains(&Position::new(3, 2)));
        assert_eq!(snapshot.melee.len(), 2);
        assert_eq!(snapshot.ranged.len(), 2);

        let state = snapshot.to_state(Rules::default());
        assert_eq!(state.turn(), Team::Melee);
        assert!(state.arena().is_obstacle(&Position::new(3, 2)));
        assert_eq!(
            state.roster(Team::Ranged).health_of(&snapshot.ranged[0].id),
            Some(snapshot.ranged[0].health)
        );
    }

    #[test]
    fn test_obstacles_are_optional() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{
                "width": 4,
                "height": 4,
                "melee": [{ "id": 1, "position": { "x": 0, "y": 0 }, "health": 10 }],
                "ranged": [{ "id": 10, "position": { "x": 3, "y": 0 }, "health": 10 }]
            }"#,
        )
        .unwrap();

        assert!(snapshot.obstacles.is_empty());
        let state = snapshot.to_state(Rules::default());
        assert_eq!(
            state.roster(Team::Melee).position_of(&UnitId(1)),
            Some(Position::new(0, 0))
        );
    }

    #[test]
    fn test_wire_action_shape() {
        let action = JointAction::from([
            (UnitId(2), UnitAction::Attack(UnitId(10))),
            (UnitId(1), UnitAction::Move(Direction::East)),
        ]);

        let json = serde_json::to_value(to_wire(&action)).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                { "unit": 1, "move": "east" },
                { "unit": 2, "attack": 10 }
            ])
        );
    }

    #[test]
    fn test_wire_actions_parse_back() {
        let actions: Vec<WireAction> =
            serde_json::from_str(r#"[{ "unit": 3, "move": "north" }, { "unit": 4, "attack": 11 }]"#)
                .unwrap();

        assert_eq!(
            from_wire(&actions),
            JointAction::from([
                (UnitId(3), UnitAction::Move(Direction::North)),
                (UnitId(4), UnitAction::Attack(UnitId(11))),
            ])
        );
    }
}
