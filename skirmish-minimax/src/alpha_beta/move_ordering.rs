use std::{fmt::Display, str::FromStr};

use crate::error::SkirmishError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// In which order the children of a node are searched
///
/// Alpha-beta gives the same answer for every ordering, but prunes far more when the best
/// child comes first. The heuristic is the agent's own [Scorable](super::Scorable) score.
///
/// The default is [MoveOrdering::BestFirst], which sorts descending at maximizing nodes.
/// Sorting ascending at maximizing nodes is [MoveOrdering::WorstFirst].
pub enum MoveOrdering {
    /// Highest heuristic first at maximizing nodes, lowest first at minimizing nodes
    #[default]
    BestFirst,
    /// The reverse of [MoveOrdering::BestFirst]: ascending at maximizing nodes, descending at
    /// minimizing nodes
    WorstFirst,
    /// The order the children were generated in. The heuristic is never computed
    Unordered,
}

impl MoveOrdering {
    #[allow(missing_docs)]
    pub const ALL: [MoveOrdering; 3] = [Self::BestFirst, Self::WorstFirst, Self::Unordered];

    /// Sort `children` with the heuristic computed once per child. Ties keep their generated
    /// order
    pub fn order<Action, GameType>(
        &self,
        children: Vec<(Action, GameType)>,
        heuristic: impl Fn(&GameType) -> f64,
        is_maximizing: bool,
    ) -> Vec<(Action, GameType)> {
        let descending = match self {
            MoveOrdering::Unordered => return children,
            MoveOrdering::BestFirst => is_maximizing,
            MoveOrdering::WorstFirst => !is_maximizing,
        };

        let mut keyed: Vec<(f64, (Action, GameType))> = children
            .into_iter()
            .map(|child| (heuristic(&child.1), child))
            .collect();

        if descending {
            keyed.sort_by(|(a, _), (b, _)| b.total_cmp(a));
        } else {
            keyed.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        }

        keyed.into_iter().map(|(_, child)| child).collect()
    }
}

impl Display for MoveOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MoveOrdering::BestFirst => "best-first",
            MoveOrdering::WorstFirst => "worst-first",
            MoveOrdering::Unordered => "unordered",
        };
        write!(f, "{name}")
    }
}

impl FromStr for MoveOrdering {
    type Err = SkirmishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ordering| ordering.to_string() == s)
            .ok_or_else(|| SkirmishError::UnknownMoveOrdering(s.to_owned()))
    }
}
