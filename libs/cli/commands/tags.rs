use clap::Args;
use colored::Colorize;
use daybook_core::Core;

#[derive(Args, Debug)]
pub struct Command {
    /// Todo content to suggest tags for
    content: String,
}

pub async fn handle(command: Command, core: &Core) -> eyre::Result<()> {
    let tags = core.suggest_tags(&command.content).await?;

    if tags.is_empty() {
        println!("No suggestion (is the [ai] section of the config set?)");
    } else {
        println!("{}", tags.join(" ").green());
    }

    Ok(())
}
