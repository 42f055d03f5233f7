use color_eyre::eyre::Result;

use skirmish_minimax::{
    agent::{MinimaxCommander, SkirmishAgent},
    state::Rules,
    wire::to_wire,
};

use super::SearchArgs;

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    #[clap(flatten)]
    search: SearchArgs,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let agent = self.search.agent()?;
        let snapshot = self.search.snapshot()?;

        let mut commander = MinimaxCommander::new(Rules::default(), agent);
        let action = commander.initial_step(&snapshot);

        println!("{}", serde_json::to_string_pretty(&to_wire(&action))?);

        Ok(())
    }
}
