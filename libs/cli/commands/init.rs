use clap::Args;
use daybook_core::Core;

#[derive(Args, Debug)]
pub struct Command {}

pub async fn handle(_: Command, core: &Core) -> eyre::Result<()> {
    core.initialize().await?;
    println!("Record store initialized");
    Ok(())
}
