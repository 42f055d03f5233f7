pub mod explain;
pub mod solve;

use std::{fs, path::PathBuf};

use clap::Subcommand;
use color_eyre::eyre::{Result, WrapErr};

use skirmish_minimax::{
    alpha_beta::{MinimaxAgent, MoveOrdering, SearchDepth, SearchOptions},
    state::CombatState,
    utility::{Evaluator, Noise, Weights},
    wire::Snapshot,
};

use explain::Explain;
use solve::Solve;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print the joint action the melee team should play, as JSON
    Solve(Solve),
    /// Print the searched tree and the line of play it expects
    Explain(Explain),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Solve(s) => s.run()?,
            Command::Explain(e) => e.run()?,
        }

        Ok(())
    }
}

#[derive(clap::Args, Debug)]
pub(crate) struct SearchArgs {
    /// JSON snapshot of the battlefield
    #[clap(short, long, value_parser)]
    snapshot: PathBuf,

    /// Number of plies to search, at least 1
    #[clap(short, long, value_parser, allow_negative_numbers = true)]
    depth: i64,

    /// Seed for the evaluation noise. Seeded from entropy when missing
    #[clap(long, value_parser)]
    seed: Option<u64>,

    /// Amplitude of the evaluation noise, 0 turns it off
    #[clap(long, value_parser, default_value_t = Noise::DEFAULT_AMPLITUDE)]
    noise: f64,

    /// best-first, worst-first or unordered
    #[clap(long, value_parser, default_value_t = MoveOrdering::BestFirst)]
    ordering: MoveOrdering,
}

impl SearchArgs {
    /// Everything is validated here, before any searching happens
    pub(crate) fn agent(&self) -> Result<MinimaxAgent<CombatState, Evaluator>> {
        let depth = SearchDepth::try_from(self.depth).wrap_err("Invalid --depth")?;

        let noise = match (self.noise > 0.0, self.seed) {
            (false, _) => Noise::Disabled,
            (true, Some(seed)) => Noise::seeded(seed, self.noise),
            (true, None) => Noise::from_entropy(self.noise),
        };

        Ok(MinimaxAgent::melee(
            depth,
            Evaluator::new(Weights::default(), noise),
            SearchOptions {
                move_ordering: self.ordering,
            },
        ))
    }

    pub(crate) fn snapshot(&self) -> Result<Snapshot> {
        let json = fs::read_to_string(&self.snapshot)
            .wrap_err_with(|| format!("Couldn't read {}", self.snapshot.display()))?;

        serde_json::from_str(&json)
            .wrap_err_with(|| format!("{} isn't a valid snapshot", self.snapshot.display()))
    }
}
