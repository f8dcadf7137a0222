use clap::Parser;
use daybook_store::BuiltinStoreType;
use directories_next::ProjectDirs;

mod commands;
mod tracing;

// Note: for uniformity, we dont use clap `default_value` or `default_value_t` options
#[derive(Parser, Debug)]
#[command(
    name = "daybook",
    version,
    long_about = Some("Consolidate your todos into a single journal entry per day.")
)]
struct Args {
    /// Path of the configuration file
    #[clap(short, long)]
    config: Option<String>,

    /// Store type to use (local, in_memory)
    #[clap(short, long)]
    store: Option<BuiltinStoreType>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: commands::Command,
}

#[tokio::main]
pub async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing::setup()?;

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };

    // TODO: honor config.core.default_store_type before falling back to local
    let store_type = args.store.unwrap_or(BuiltinStoreType::Local);
    let core = daybook_core::load(store_type, &config_path).await?;

    args.command.execute(&core).await?;
    Ok(())
}

fn default_config_path() -> eyre::Result<String> {
    let dirs = ProjectDirs::from("", "", "daybook")
        .ok_or_else(|| eyre::eyre!("couldn't resolve a home directory"))?;
    Ok(dirs.config_dir().join("config.toml").to_string_lossy().to_string())
}
