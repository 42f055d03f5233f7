use std::collections::HashMap;

use color_eyre::eyre::Result;
use itertools::Itertools;
use tracing::warn;

use skirmish_minimax::{
    alpha_beta::MinMaxReturn,
    movegen::{describe, JointAction},
    state::{Rules, Team},
};

use super::SearchArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Explain {
    #[clap(flatten)]
    search: SearchArgs,
}

impl Explain {
    pub(crate) fn run(self) -> Result<()> {
        let agent = self.search.agent()?;
        let snapshot = self.search.snapshot()?;
        let state = snapshot.to_state(Rules::default());

        println!("{state}");

        let result = agent.search(&state);
        println!("Score {}", result.score());
        print_route(&result);

        // Replay the expected line of play to show where it ends up
        let mut current = state;
        for (team, action) in result.chosen_route() {
            match current.apply(&action) {
                Some(next) => current = next,
                None => {
                    warn!(?team, action = %describe(&action), "route doesn't replay");
                    break;
                }
            }
        }
        println!("{current}");

        println!("{}", result.to_text_tree(describe));

        Ok(())
    }
}

fn print_route(result: &MinMaxReturn<JointAction, Team>) {
    let route = result.chosen_route();
    let teams = route.iter().map(|(team, _)| team).unique().collect_vec();

    let mut per_team: HashMap<Team, Vec<String>> = HashMap::new();
    for (team, action) in &route {
        per_team.entry(*team).or_default().push(describe(action));
    }

    println!("The chosen route looks {} plies ahead:", route.len());
    for team in teams {
        let actions = per_team.remove(team).unwrap_or_default();
        println!("{team:?}: {}", actions.iter().join(" | "));
    }
    println!()
}
