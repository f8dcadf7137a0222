use clap::Subcommand;
use daybook_core::Core;

pub mod add;
pub mod comment;
pub mod init;
pub mod log;
pub mod tags;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the configured record store
    Init(init::Command),
    /// Save a todo into the day's journal container
    Add(add::Command),
    /// Show saved records grouped by day with completion stats
    Log(log::Command),
    /// Manage comments attached to a record
    Comment(comment::Command),
    /// Suggest tags for a todo content
    Tags(tags::Command),
}

impl Command {
    pub async fn execute(self, core: &Core) -> eyre::Result<()> {
        match self {
            Self::Init(o) => init::handle(o, core).await,
            Self::Add(o) => add::handle(o, core).await,
            Self::Log(o) => log::handle(o, core).await,
            Self::Comment(o) => comment::handle(o, core).await,
            Self::Tags(o) => tags::handle(o, core).await,
        }
    }
}
