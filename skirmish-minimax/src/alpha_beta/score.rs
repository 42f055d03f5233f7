use std::fmt::Debug;

/// This trait is used to control something that can return a score from a game state
///
/// Scores are always from the point of view of the maximizing side. Closures work too, which is
/// handy for tests and benchmarks
pub trait Scorable<GameType> {
    /// Convert the given GameType into a score
    fn score(&self, game: &GameType) -> f64;
}

impl<GameType, FnLike: Fn(&GameType) -> f64> Scorable<GameType> for FnLike {
    fn score(&self, game: &GameType) -> f64 {
        (self)(game)
    }
}

/// A two sided, turn based game that the search knows how to walk
///
/// Implementors only need to say whose turn it is and what happens next. Terminal states are
/// the ones without any successors
pub trait AdversarialGame: Sized {
    /// What the side on turn does to get from one state to the next
    type Action: Clone + Debug;
    /// Identifies who is on turn
    type Side: Clone + Debug + PartialEq;

    /// The side choosing the action at this state
    fn side_to_move(&self) -> Self::Side;

    /// Every action available to the side on turn, paired with the state it leads to
    fn successors(&self) -> Vec<(Self::Action, Self)>;
}
