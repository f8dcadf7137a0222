use clap::{Args, Subcommand};
use colored::Colorize;
use daybook_core::Core;

#[derive(Args, Debug)]
pub struct Command {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Attach a comment to a record
    Add { record_id: String, text: String },
    /// Replace a comment's text
    Edit { comment_id: String, text: String },
    /// Delete a comment
    Rm { comment_id: String },
    /// List a record's comments, oldest first
    List { record_id: String },
}

pub async fn handle(command: Command, core: &Core) -> eyre::Result<()> {
    match command.action {
        Action::Add { record_id, text } => {
            let annotation = core
                .add_annotation(&record_id, &text, &core.config.creator_name)
                .await?;
            println!("Comment added: {}", annotation.id.cyan());
        }
        Action::Edit { comment_id, text } => {
            core.update_annotation(&comment_id, &text).await?;
            println!("Comment updated");
        }
        Action::Rm { comment_id } => {
            core.delete_annotation(&comment_id).await?;
            println!("Comment removed");
        }
        Action::List { record_id } => {
            let listing = core.list_annotations(&record_id).await?;
            println!("{} comment(s)", listing.total);
            for item in listing.items.iter() {
                println!("{} {}", item.id.cyan(), item.content);
            }
        }
    }

    Ok(())
}
