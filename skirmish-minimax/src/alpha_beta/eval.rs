use std::num::NonZeroUsize;

use derivative::Derivative;
use tracing::{debug, info, info_span};

use crate::{
    alpha_beta::{move_ordering::MoveOrdering, AdversarialGame, MinMaxReturn, Scorable},
    error::{Result, SkirmishError},
    movegen::{describe, Child, JointAction},
    state::{CombatState, Team},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How many plies to look ahead. Always at least one
pub struct SearchDepth(NonZeroUsize);

impl SearchDepth {
    #[allow(missing_docs)]
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for SearchDepth {
    type Error = SkirmishError;

    fn try_from(depth: i64) -> Result<Self> {
        usize::try_from(depth)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(SearchDepth)
            .ok_or(SkirmishError::InvalidDepth(depth))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Optional properties that can be defined for a [MinimaxAgent]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use skirmish_minimax::alpha_beta::{MoveOrdering, SearchOptions};
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.move_ordering, MoveOrdering::BestFirst);
/// ```
pub struct SearchOptions {
    /// How should children be ordered in the tree search
    pub move_ordering: MoveOrdering,
}

#[derive(Derivative, Clone)]
#[derivative(Debug(bound = ""))]
/// This is the struct that wraps a scoring function and can be used to run minimax over any
/// [AdversarialGame]
///
/// It also outputs traces using the [tracing] crate.
pub struct MinimaxAgent<GameType, ScorableType>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    depth: SearchDepth,
    /// The side we play for. Nodes where this side moves are maximizing
    pub me: GameType::Side,
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: SearchOptions,
    #[allow(missing_docs)]
    pub name: &'static str,
}

impl<GameType, ScorableType> MinimaxAgent<GameType, ScorableType>
where
    GameType: AdversarialGame,
    ScorableType: Scorable<GameType>,
{
    /// Construct a new `MinimaxAgent`
    ///
    /// [SearchOptions] implements [Default] so you can override specific options and rely on
    /// defaults for the rest.
    pub fn new(
        depth: SearchDepth,
        me: GameType::Side,
        score_function: ScorableType,
        name: &'static str,
        options: SearchOptions,
    ) -> Self {
        Self {
            depth,
            me,
            score_function,
            options,
            name,
        }
    }

    /// The recursive core of the search
    ///
    /// `maximizing` has to agree with whose turn it is at `node`, the sides alternate every ply.
    /// Scores that fall outside of `(alpha, beta)` are only bounds, the root is always searched
    /// with the widest window so its score is exact
    pub fn minimax(
        &self,
        node: &GameType,
        depth: usize,
        alpha: f64,
        beta: f64,
        maximizing: bool,
    ) -> MinMaxReturn<GameType::Action, GameType::Side> {
        let mut alpha = alpha;
        let mut beta = beta;

        let moving_side = node.side_to_move();
        assert_eq!(
            maximizing,
            moving_side == self.me,
            "the maximizing flag is out of step with the side on turn"
        );

        if depth == 0 {
            return MinMaxReturn::Leaf {
                score: self.score_function.score(node),
            };
        }

        let successors = node.successors();
        if successors.is_empty() {
            let score = self.score_function.score(node);
            debug!(depth, score, side = ?moving_side, "terminal node");
            return MinMaxReturn::Leaf { score };
        }

        let ordered = self.options.move_ordering.order(
            successors,
            |child| self.score_function.score(child),
            maximizing,
        );

        let mut options: Vec<(GameType::Action, MinMaxReturn<_, _>)> =
            Vec::with_capacity(ordered.len());
        let mut alpha_beta_cutoff = false;

        for (action, child) in ordered {
            let next_return = self.minimax(&child, depth - 1, alpha, beta, !maximizing);
            let value = next_return.score();
            options.push((action, next_return));

            if maximizing {
                if value > beta {
                    alpha_beta_cutoff = true;
                    break;
                }

                alpha = alpha.max(value);
            } else {
                if value < alpha {
                    alpha_beta_cutoff = true;
                    break;
                }

                beta = beta.min(value);
            }
        }

        if alpha_beta_cutoff {
            debug!(depth, examined = options.len(), alpha, beta, "alpha-beta cutoff");
        }

        // Stable, so among equal scores the first one examined stays in front
        if maximizing {
            options.sort_by(|(_, a), (_, b)| b.score().total_cmp(&a.score()));
        } else {
            options.sort_by(|(_, a), (_, b)| a.score().total_cmp(&b.score()));
        }
        let score = options[0].1.score();

        MinMaxReturn::Node {
            options,
            is_maximizing: maximizing,
            moving_side,
            score,
            alpha_beta_cutoff,
        }
    }

    /// This runs the minimax algorithm to the configured depth, returning a struct that
    /// contains all the information about the 'tree' we searched.
    ///
    /// This can/is also be used as a benchmark entry point
    pub fn search(&self, node: &GameType) -> MinMaxReturn<GameType::Action, GameType::Side> {
        let maximizing = node.side_to_move() == self.me;

        self.minimax(
            node,
            self.depth.get(),
            f64::NEG_INFINITY,
            f64::INFINITY,
            maximizing,
        )
    }
}

impl AdversarialGame for CombatState {
    type Action = JointAction;
    type Side = Team;

    fn side_to_move(&self) -> Self::Side {
        self.turn()
    }

    fn successors(&self) -> Vec<(Self::Action, Self)> {
        self.children()
            .into_iter()
            .map(|Child { action, state }| (action, state))
            .collect()
    }
}

impl<ScorableType> MinimaxAgent<CombatState, ScorableType>
where
    ScorableType: Scorable<CombatState>,
{
    /// An agent that plays for the melee team
    pub fn melee(
        depth: SearchDepth,
        score_function: ScorableType,
        options: SearchOptions,
    ) -> Self {
        Self::new(depth, Team::Melee, score_function, "minimax", options)
    }

    /// Search `node` to `depth` plies and return the root child we should move to
    ///
    /// Only the root level surfaces an action, everything below it just backs up scores. When
    /// the root has no children at all the root itself comes back, with an empty action
    pub fn alpha_beta_search(
        &self,
        node: Child,
        depth: SearchDepth,
        alpha: f64,
        beta: f64,
    ) -> Child {
        let maximizing = node.state.turn() == self.me;
        let result = self.minimax(&node.state, depth.get(), alpha, beta, maximizing);

        let Some(best) = result.best_action() else {
            return Child::root(node.state);
        };

        node.state
            .children()
            .into_iter()
            .find(|child| &child.action == best)
            .unwrap_or_else(|| Child::root(node.state.clone()))
    }

    /// Pick the joint action to play from `state`
    ///
    /// An empty joint action means nobody on our team can do anything
    pub fn choose_action(&self, state: &CombatState) -> JointAction {
        info_span!(
          "alpha_beta_search",
          agent_name = self.name,
          depth = self.depth.get(),
          ordering = %self.options.move_ordering,
          chosen_score = tracing::field::Empty,
          chosen_action = tracing::field::Empty,
        )
        .in_scope(|| {
            let result = self.search(state);
            let action = result.best_action().cloned().unwrap_or_default();

            let current_span = tracing::Span::current();
            current_span.record("chosen_score", result.score());
            current_span.record("chosen_action", describe(&action).as_str());

            let route = result
                .chosen_route()
                .into_iter()
                .map(|(team, a)| format!("{team:?}: {}", describe(&a)))
                .collect::<Vec<_>>();
            info!(nodes = result.node_count(), ?route, "finished search");

            action
        })
    }
}
