//! The face the search shows to a host
//!
//! Hosts drive an agent through a fixed protocol: one call on the first step, one call on every
//! step after that, and a final call once the skirmish is decided. Between games they may ask
//! the agent to persist whatever it learned.

use std::io::{self, Read, Write};

use tracing::info;

use crate::{
    alpha_beta::{MinimaxAgent, Scorable},
    movegen::JointAction,
    state::{CombatState, Rules},
    wire::Snapshot,
};

/// Something that can command the melee team for a whole skirmish
pub trait SkirmishAgent {
    /// The first step of a skirmish. Does the same as any other step unless overridden
    fn initial_step(&mut self, snapshot: &Snapshot) -> JointAction {
        self.middle_step(snapshot)
    }

    /// Decide what the team does this step
    fn middle_step(&mut self, snapshot: &Snapshot) -> JointAction;

    /// Called once the skirmish is over
    fn terminal_step(&mut self, _snapshot: &Snapshot) {}

    #[allow(missing_docs)]
    fn save_player_data(&self, _writer: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    #[allow(missing_docs)]
    fn load_player_data(&mut self, _reader: &mut dyn Read) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
/// Runs a fresh alpha-beta search from every snapshot it is given. Nothing carries over from
/// one step to the next
pub struct MinimaxCommander<ScorableType>
where
    ScorableType: Scorable<CombatState>,
{
    rules: Rules,
    agent: MinimaxAgent<CombatState, ScorableType>,
    steps: usize,
}

impl<ScorableType> MinimaxCommander<ScorableType>
where
    ScorableType: Scorable<CombatState>,
{
    #[allow(missing_docs)]
    pub fn new(rules: Rules, agent: MinimaxAgent<CombatState, ScorableType>) -> Self {
        Self {
            rules,
            agent,
            steps: 0,
        }
    }

    /// How many steps this commander has been asked to play
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl<ScorableType> SkirmishAgent for MinimaxCommander<ScorableType>
where
    ScorableType: Scorable<CombatState>,
{
    fn middle_step(&mut self, snapshot: &Snapshot) -> JointAction {
        self.steps += 1;

        let state = snapshot.to_state(self.rules);
        self.agent.choose_action(&state)
    }

    fn terminal_step(&mut self, snapshot: &Snapshot) {
        let state = snapshot.to_state(self.rules);
        info!(steps = self.steps, over = state.is_over(), "skirmish finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        alpha_beta::{SearchDepth, SearchOptions},
        grid::Direction,
        movegen::UnitAction,
        state::UnitId,
        utility::Evaluator,
    };

    fn commander(depth: i64) -> MinimaxCommander<Evaluator> {
        MinimaxCommander::new(
            Rules::default(),
            MinimaxAgent::melee(
                SearchDepth::try_from(depth).unwrap(),
                Evaluator::default(),
                SearchOptions::default(),
            ),
        )
    }

    #[test]
    fn test_steps_search_the_snapshot() {
        let snapshot: Snapshot =
            serde_json::from_str(include_str!("../fixtures/open_field.json")).unwrap();
        let mut commander = commander(2);

        let first = commander.initial_step(&snapshot);
        let second = commander.middle_step(&snapshot);

        assert_eq!(
            first,
            JointAction::from([(UnitId(1), UnitAction::Move(Direction::East))])
        );
        assert_eq!(first, second);
        assert_eq!(commander.steps(), 2);
        commander.terminal_step(&snapshot);
    }

    #[test]
    fn test_player_data_is_a_no_op() {
        let mut commander = commander(1);

        let mut saved = vec![];
        commander.save_player_data(&mut saved).unwrap();
        assert!(saved.is_empty());

        commander.load_player_data(&mut &b"anything"[..]).unwrap();
    }

    #[test]
    fn test_walled_fixture_picks_a_legal_action() {
        let snapshot: Snapshot =
            serde_json::from_str(include_str!("../fixtures/walled.json")).unwrap();
        let state = snapshot.to_state(Rules::default());
        let mut commander = commander(2);

        let action = commander.middle_step(&snapshot);

        assert!(!action.is_empty());
        assert!(state.apply(&action).is_some());
    }
}
