//! Two sided minimax with Alpha-Beta pruning
//!
//! Our side always maximizes and the other side always minimizes, every node is scored from our
//! point of view. Plies alternate strictly between the two sides.
//!
//! The search is generic over anything implementing [AdversarialGame], and [CombatState] is the
//! implementation everything else in this crate uses.
//!
//! ```rust
//! use skirmish_minimax::{
//!     alpha_beta::{MinimaxAgent, SearchDepth, SearchOptions},
//!     state::Rules,
//!     utility::Evaluator,
//!     wire::Snapshot,
//! };
//!
//! // This fixture data matches what we expect to come from the host
//! let snapshot: Snapshot =
//!     serde_json::from_str(include_str!("../../fixtures/open_field.json")).unwrap();
//! let state = snapshot.to_state(Rules::default());
//!
//! // Look two plies ahead: our move and their reply
//! let depth = SearchDepth::try_from(2).unwrap();
//! let agent = MinimaxAgent::melee(depth, Evaluator::default(), SearchOptions::default());
//!
//! let result = agent.search(&state);
//! println!("{}", result.to_text_tree(skirmish_minimax::movegen::describe));
//!
//! let action = agent.choose_action(&state);
//! assert_eq!(result.best_action(), Some(&action));
//! ```
//!
//! [CombatState]: crate::state::CombatState

mod score;
pub use score::{AdversarialGame, Scorable};

mod minimax_return;
pub use minimax_return::MinMaxReturn;

mod move_ordering;
pub use move_ordering::MoveOrdering;

mod eval;
pub use eval::{MinimaxAgent, SearchDepth, SearchOptions};
