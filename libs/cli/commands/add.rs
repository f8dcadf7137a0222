use clap::Args;
use colored::Colorize;
use daybook_core::{Core, SaveTodoInput};
use daybook_store::{LocalFile, Visibility};

#[derive(Args, Debug)]
pub struct Command {
    /// Todo content; plain text becomes a checklist item
    content: String,

    /// Files to upload and attach
    #[clap(long = "file")]
    files: Vec<std::path::PathBuf>,

    /// Visibility of a newly created container (public, protected, private)
    #[clap(long)]
    visibility: Option<Visibility>,

    /// Target day (YYYY-MM-DD, defaults to today)
    #[clap(long)]
    day: Option<String>,
}

pub async fn handle(command: Command, core: &Core) -> eyre::Result<()> {
    let outcome = core
        .save_todo(SaveTodoInput {
            content: command.content,
            local_files: command.files.into_iter().map(LocalFile::new).collect(),
            visibility: command.visibility.unwrap_or_default(),
            creator_id: core.config.creator_name.clone(),
            day_key: command.day,
            ..Default::default()
        })
        .await?;

    if outcome.created {
        println!("Started the day's journal: {}", outcome.record_id.cyan());
    } else {
        println!("Appended to the day's journal: {}", outcome.record_id.cyan());
    }

    Ok(())
}
