use serde_derive::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CoreConfig {
    /// Creator identity recorded on saved todos; supplied here because the
    /// identity layer lives outside this system.
    #[serde(default = "default_creator_name")]
    pub creator_name: String,

    /// Store type used by default when none is specified (default: local)
    pub default_store_type: Option<String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            creator_name: default_creator_name(),
            default_store_type: None,
        }
    }
}

fn default_creator_name() -> String {
    "local".to_owned()
}

/// Settings of the OpenAI-compatible tag suggestion endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    pub api_key: String,
    /// Defaults to https://api.openai.com/v1
    pub base_url: Option<String>,
    /// Defaults to gpt-3.5-turbo
    pub model: Option<String>,
}
