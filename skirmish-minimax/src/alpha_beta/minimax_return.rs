use std::fmt::Debug;
use text_trees::StringTreeNode;

#[derive(Debug, Clone, PartialEq)]
/// This is returned from a run of the minimax algorithm
/// It contains all the information we generated about the game tree
pub enum MinMaxReturn<Action, Side> {
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen score
    Node {
        /// Whether this node was a maximizing node or not
        is_maximizing: bool,
        /// A 'recursive' look at all the actions under us
        /// This array is sorted by score, best first for whoever was moving. Options after a
        /// cutoff were never examined and don't appear at all.
        /// The first element is always the chosen action at this node. Its [MinMaxReturn::score()]
        /// always equals the score attribute of this node
        options: Vec<(Action, Self)>,
        /// Which side was moving at this node
        moving_side: Side,
        /// The chosen score
        score: f64,
        /// Did we stop looking at options early because of an alpha-beta cutoff
        alpha_beta_cutoff: bool,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach the maximum depth, or a state that has no successors
    Leaf {
        #[allow(missing_docs)]
        score: f64,
    },
}

impl<Action, Side> MinMaxReturn<Action, Side>
where
    Action: Clone + Debug,
    Side: Clone + Debug,
{
    /// Returns the score for this node
    pub fn score(&self) -> f64 {
        match self {
            MinMaxReturn::Node { score, .. } => *score,
            MinMaxReturn::Leaf { score } => *score,
        }
    }

    /// Returns the action the side moving at this node should take
    /// If we are a leaf node, this will return None
    pub fn best_action(&self) -> Option<&Action> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node { options, .. } => options.first().map(|(action, _)| action),
        }
    }

    /// Returns all the actions in the 'route' through the game tree that minimax took
    /// This is useful for debugging as it shows what each side was expected to do
    pub fn chosen_route(&self) -> Vec<(Side, Action)> {
        match self {
            MinMaxReturn::Leaf { .. } => vec![],
            MinMaxReturn::Node {
                moving_side,
                options,
                ..
            } => {
                if let Some((action, chosen)) = options.first() {
                    let mut tail = chosen.chosen_route();
                    tail.insert(0, (moving_side.clone(), action.clone()));
                    tail
                } else {
                    vec![]
                }
            }
        }
    }

    /// The number of nodes (leaves included) in the tree that was actually searched
    pub fn node_count(&self) -> usize {
        match self {
            MinMaxReturn::Leaf { .. } => 1,
            MinMaxReturn::Node { options, .. } => {
                1 + options.iter().map(|(_, r)| r.node_count()).sum::<usize>()
            }
        }
    }

    /// This returns a visual representation of the game tree that minimax generated
    /// It shows the score, the moving side and each action that was examined at every level
    pub fn to_text_tree(&self, describe: impl Fn(&Action) -> String) -> String {
        format!("{}", self.to_text_tree_node("root".to_owned(), &describe))
    }

    fn to_text_tree_node(
        &self,
        label: String,
        describe: &impl Fn(&Action) -> String,
    ) -> StringTreeNode {
        match self {
            MinMaxReturn::Leaf { score } => StringTreeNode::new(format!("{label} {score}")),
            MinMaxReturn::Node {
                moving_side,
                options,
                score,
                alpha_beta_cutoff,
                ..
            } => {
                let cutoff = if *alpha_beta_cutoff { " (cutoff)" } else { "" };
                let mut node = StringTreeNode::new(format!("{label} {score}{cutoff}"));
                for (action, result) in options {
                    node.push_node(result.to_text_tree_node(
                        format!("{moving_side:?}: {}", describe(action)),
                        describe,
                    ));
                }

                node
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MinMaxReturn<&'static str, char> {
        MinMaxReturn::Node {
            is_maximizing: true,
            moving_side: 'a',
            score: 3.0,
            alpha_beta_cutoff: false,
            options: vec![
                (
                    "left",
                    MinMaxReturn::Node {
                        is_maximizing: false,
                        moving_side: 'b',
                        score: 3.0,
                        alpha_beta_cutoff: false,
                        options: vec![
                            ("down", MinMaxReturn::Leaf { score: 3.0 }),
                            ("up", MinMaxReturn::Leaf { score: 7.0 }),
                        ],
                    },
                ),
                (
                    "right",
                    MinMaxReturn::Node {
                        is_maximizing: false,
                        moving_side: 'b',
                        score: 1.0,
                        alpha_beta_cutoff: true,
                        options: vec![("down", MinMaxReturn::Leaf { score: 1.0 })],
                    },
                ),
            ],
        }
    }

    #[test]
    fn test_best_action_and_route() {
        let tree = sample();

        assert_eq!(tree.score(), 3.0);
        assert_eq!(tree.best_action(), Some(&"left"));
        assert_eq!(tree.chosen_route(), vec![('a', "left"), ('b', "down")]);
        assert_eq!(tree.node_count(), 6);
    }

    #[test]
    fn test_leaf_has_no_action() {
        let leaf: MinMaxReturn<&str, char> = MinMaxReturn::Leaf { score: 1.5 };

        assert_eq!(leaf.best_action(), None);
        assert!(leaf.chosen_route().is_empty());
    }

    #[test]
    fn test_text_tree_lists_every_option() {
        let text = sample().to_text_tree(|a| a.to_uppercase());

        assert!(text.starts_with("root 3"));
        assert!(text.contains("'a': LEFT 3"));
        assert!(text.contains("'b': UP 7"));
        assert!(text.contains("'a': RIGHT 1 (cutoff)"));
    }
}
