use chrono::Local;
use clap::Args;
use colored::Colorize;
use daybook_core::{group_records, unix_now, Core};

#[derive(Args, Debug)]
pub struct Command {
    /// Maximum number of records to load
    #[clap(long, short)]
    limit: Option<u32>,
}

pub async fn handle(command: Command, core: &Core) -> eyre::Result<()> {
    let creator = core.config.creator_name.clone();
    let records = core.list_creator_records(&creator, command.limit).await?;
    let groups = group_records(records, &Local, unix_now());
    let today = Local::now().date_naive();

    for group in groups.iter() {
        let done = group.complete_count;
        let total = group.complete_count + group.incomplete_count;
        println!(
            "{} {}",
            group.label(today).cyan().bold(),
            format!("({done}/{total} done)").dimmed()
        );

        for record in group.records.iter() {
            for line in record.content.lines() {
                println!("  {line}");
            }
            println!("  {}", format!("Id: {}", record.id).dimmed());
            println!();
        }
    }

    Ok(())
}
