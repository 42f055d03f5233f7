//! The heuristic the search maximizes
//!
//! Every living melee unit looks at its closest enemy and is scored on how far away it is (in a
//! few different shapes) and how much health that enemy has left. The weights are all negative,
//! so states where the melee team is close to weakened enemies score highest.
//!
//! Fallen enemies are still targets here, scored at zero health, even though nothing else in
//! the crate acts on them. Dropping an enemy's health, through zero included, never lowers the
//! utility.

use std::cell::RefCell;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    alpha_beta::Scorable,
    pathing::{bfs_distance, UNREACHABLE_STEPS},
    state::{CombatState, Team},
};

#[derive(Debug, Clone, Copy, PartialEq)]
/// How much each feature counts towards the utility
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use skirmish_minimax::utility::Weights;
///
/// let weights: Weights = Default::default();
///
/// assert_eq!(weights.enemy_health, -100.0);
/// assert_eq!(weights.own_health, 0.0);
/// assert_eq!(weights.distance, -100.0);
/// assert_eq!(weights.sqrt_distance, -100.0);
/// assert_eq!(weights.square_distance, -1.0);
/// assert_eq!(weights.step_count, -1000.0);
/// ```
pub struct Weights {
    /// Per point of health the targeted enemy has left
    pub enemy_health: f64,
    /// Per point of health the melee unit has left
    pub own_health: f64,
    /// Per cell of Manhattan distance to the nearest enemy
    pub distance: f64,
    #[allow(missing_docs)]
    pub sqrt_distance: f64,
    #[allow(missing_docs)]
    pub square_distance: f64,
    /// Per step of the shortest obstacle-aware path between the enemy and the unit
    pub step_count: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            enemy_health: -100.0,
            own_health: 0.0,
            distance: -100.0,
            sqrt_distance: -100.0,
            square_distance: -1.0,
            step_count: -1000.0,
        }
    }
}

#[derive(Debug, Clone)]
/// Random jitter added to every unit's contribution
///
/// Breaks ties between equally scored states. Tests and reproducible runs either turn it off or
/// seed it.
pub enum Noise {
    /// Adds nothing
    Disabled,
    /// Adds a uniform sample from `[0, amplitude)`
    Uniform {
        #[allow(missing_docs)]
        amplitude: f64,
        #[allow(missing_docs)]
        rng: RefCell<StdRng>,
    },
}

impl Noise {
    /// Roughly the size of one step of distance under the default [Weights]
    pub const DEFAULT_AMPLITUDE: f64 = 1000.0;

    /// Reproducible noise
    pub fn seeded(seed: u64, amplitude: f64) -> Self {
        Self::Uniform {
            amplitude,
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Different noise on every run
    pub fn from_entropy(amplitude: f64) -> Self {
        Self::Uniform {
            amplitude,
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    /// Draw the next value
    pub fn sample(&self) -> f64 {
        match self {
            Noise::Disabled => 0.0,
            Noise::Uniform { amplitude, rng } => rng.borrow_mut().gen::<f64>() * amplitude,
        }
    }
}

impl Default for Noise {
    fn default() -> Self {
        Self::Disabled
    }
}

#[derive(Debug, Clone, Default)]
/// Scores a [CombatState] from the melee team's point of view
pub struct Evaluator {
    #[allow(missing_docs)]
    pub weights: Weights,
    #[allow(missing_docs)]
    pub noise: Noise,
}

impl Evaluator {
    #[allow(missing_docs)]
    pub fn new(weights: Weights, noise: Noise) -> Self {
        Self { weights, noise }
    }

    /// The weighted sum of features over every living melee unit
    pub fn utility(&self, state: &CombatState) -> f64 {
        let w = &self.weights;
        let enemies = state.roster(Team::Ranged);

        let mut utility = 0.0;
        for (_, position, health) in state.roster(Team::Melee).living() {
            utility += health as f64 * w.own_health;
            utility += self.noise.sample();

            // Ties go to the lowest id since `units` walks the roster in id order
            let Some((_, enemy_position, enemy_health)) = enemies
                .units()
                .min_by_key(|(_, enemy, _)| position.manhattan_distance(enemy))
            else {
                continue;
            };
            let enemy_health = enemy_health.max(0);

            let distance = position.manhattan_distance(&enemy_position) as f64;
            let steps = bfs_distance(&enemy_position, &position, state.arena())
                .unwrap_or(UNREACHABLE_STEPS) as f64;

            utility += enemy_health as f64 * w.enemy_health;
            utility += distance * w.distance;
            utility += distance.sqrt() * w.sqrt_distance;
            utility += distance.powi(2) * w.square_distance;
            utility += steps * w.step_count;
        }

        utility
    }
}

/// Leaves and move ordering both go through this, so children are ordered by their utility
impl Scorable<CombatState> for Evaluator {
    fn score(&self, game: &CombatState) -> f64 {
        self.utility(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::{Arena, Position},
        state::{Roster, Rules, UnitId},
    };

    fn duel(arena: Arena, melee: Position, ranged: Position, ranged_health: i32) -> CombatState {
        CombatState::new(
            arena,
            Rules::default(),
            Roster::new([(UnitId(1), melee, 10)]),
            Roster::new([(UnitId(10), ranged, ranged_health)]),
        )
    }

    #[test]
    fn test_utility_adds_up_the_features() {
        let state = duel(
            Arena::open(9, 9),
            Position::new(0, 0),
            Position::new(4, 0),
            10,
        );

        // 10 hp * -100, d = 4: 4 * -100 + 2 * -100 + 16 * -1, 4 steps * -1000
        let expected = -1000.0 - 400.0 - 200.0 - 16.0 - 4000.0;
        assert_eq!(Evaluator::default().utility(&state), expected);
    }

    #[test]
    fn test_unreachable_enemy_is_very_far_away() {
        let wall = (0..=4).map(|y| Position::new(2, y));
        let walled = duel(
            Arena::new(4, 4, wall),
            Position::new(0, 0),
            Position::new(4, 0),
            10,
        );
        let open = duel(
            Arena::open(4, 4),
            Position::new(0, 0),
            Position::new(4, 0),
            10,
        );

        let evaluator = Evaluator::default();
        assert!(evaluator.utility(&walled) < evaluator.utility(&open));
        assert!(evaluator.utility(&walled).is_finite());
    }

    #[test]
    fn test_less_enemy_health_is_never_worse() {
        let evaluator = Evaluator::default();

        // #11 is farther from the melee unit than #10 at (1, 5)
        let mut previous = f64::NEG_INFINITY;
        for health in (-5..=20).rev() {
            let state = CombatState::new(
                Arena::new(6, 6, [Position::new(3, 3)]),
                Rules::default(),
                Roster::new([(UnitId(1), Position::new(1, 5), 10)]),
                Roster::new([
                    (UnitId(10), Position::new(5, 2), health),
                    (UnitId(11), Position::new(6, 0), 10),
                ]),
            );
            let utility = evaluator.utility(&state);

            assert!(utility >= previous, "{health} hp scored {utility}");
            previous = utility;
        }
    }

    #[test]
    fn test_killing_the_nearest_enemy_is_never_worse() {
        let evaluator = Evaluator::default();
        let state_with = |health| {
            CombatState::new(
                Arena::open(4, 4),
                Rules::default(),
                Roster::new([(UnitId(1), Position::new(0, 0), 10)]),
                Roster::new([
                    (UnitId(10), Position::new(1, 0), health),
                    (UnitId(11), Position::new(4, 4), 10),
                ]),
            )
        };

        let wounded = evaluator.utility(&state_with(5));
        let killed = evaluator.utility(&state_with(0));
        let overkilled = evaluator.utility(&state_with(-5));

        assert!(killed > wounded);
        assert_eq!(killed, overkilled);
        // d = 1 to the fallen #10: 1 * -100 + 1 * -100 + 1 * -1, 1 step * -1000
        assert_eq!(killed, -1201.0);
    }

    #[test]
    fn test_closer_is_better() {
        let evaluator = Evaluator::default();
        let arena = Arena::open(9, 9);

        let far = duel(arena.clone(), Position::new(0, 0), Position::new(6, 0), 10);
        let near = duel(arena, Position::new(3, 0), Position::new(6, 0), 10);

        assert!(evaluator.utility(&near) > evaluator.utility(&far));
    }

    #[test]
    fn test_nearest_enemy_is_the_target() {
        let state = CombatState::new(
            Arena::open(9, 9),
            Rules::default(),
            Roster::new([(UnitId(1), Position::new(0, 0), 10)]),
            Roster::new([
                (UnitId(10), Position::new(8, 8), 1),
                (UnitId(11), Position::new(2, 0), 10),
            ]),
        );
        let only_near = duel(
            Arena::open(9, 9),
            Position::new(0, 0),
            Position::new(2, 0),
            10,
        );

        let evaluator = Evaluator::default();
        assert_eq!(evaluator.utility(&state), evaluator.utility(&only_near));
    }

    #[test]
    fn test_fallen_melee_units_do_not_count() {
        let state = CombatState::new(
            Arena::open(4, 4),
            Rules::default(),
            Roster::new([(UnitId(1), Position::new(0, 0), 0)]),
            Roster::new([(UnitId(10), Position::new(4, 4), 10)]),
        );

        assert_eq!(Evaluator::default().utility(&state), 0.0);
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let a = Noise::seeded(7, Noise::DEFAULT_AMPLITUDE);
        let b = Noise::seeded(7, Noise::DEFAULT_AMPLITUDE);

        for _ in 0..10 {
            let sample = a.sample();
            assert_eq!(sample, b.sample());
            assert!((0.0..Noise::DEFAULT_AMPLITUDE).contains(&sample));
        }
        assert_eq!(Noise::Disabled.sample(), 0.0);
    }

    #[test]
    fn test_noise_only_ever_raises_the_score() {
        let state = duel(
            Arena::open(4, 4),
            Position::new(0, 0),
            Position::new(4, 4),
            10,
        );

        let quiet = Evaluator::default();
        let noisy = Evaluator::new(Weights::default(), Noise::seeded(3, 50.0));

        let base = quiet.utility(&state);
        for _ in 0..10 {
            let utility = noisy.utility(&state);
            assert!(utility >= base && utility < base + 50.0);
        }
    }
}
