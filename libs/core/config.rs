use std::path::Path;

use daybook_config::{AiConfig, CoreConfig};
use daybook_store::StoreConfig;
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;

#[derive(Deserialize)]
#[serde(bound = "S: DeserializeOwned")]
pub struct Config<S: StoreConfig> {
    #[serde(default)]
    pub core: CoreConfig,
    pub ai: Option<AiConfig>,
    #[serde(default)]
    pub store: S,
}

async fn read_file_content(file_path: &str) -> eyre::Result<Option<String>> {
    let path = Path::new(file_path);

    if !path.exists() {
        return Ok(None);
    }

    let content = tokio::fs::read_to_string(path).await?;
    Ok(Some(content))
}

pub fn get_default_config<S>() -> Config<S>
where
    S: StoreConfig,
{
    Config {
        core: CoreConfig::default(),
        ai: None,
        store: S::default(),
    }
}

pub async fn get_config_from_path<S>(config_path: &str) -> eyre::Result<Config<S>>
where
    S: StoreConfig,
{
    let content = read_file_content(config_path)
        .await?
        .ok_or_else(|| eyre::eyre!("config path '{config_path}' was not found"))?;

    let config: Config<S> = toml::from_str(&content)?;

    Ok(config)
}
