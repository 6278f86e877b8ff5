use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub claude: ClaudeConfig,
    pub notion: NotionConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClaudeConfig {
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NotionConfig {
    pub token: String,
    pub database_id: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("claude.api_key", "")?
            .set_default("claude.model", "claude-sonnet-4-20250514")?
            .set_default("claude.max_tokens", 4096)?
            .set_default("notion.token", "")?
            .set_default("notion.database_id", "")?
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("LEXINOTE").separator("__"));

        // The original deployment's variable names win over everything else.
        if let Ok(key) = env::var("ANTHROPIC_API_KEY") {
            builder = builder.set_override("claude.api_key", key)?;
        }
        if let Ok(token) = env::var("NOTION_TOKEN") {
            builder = builder.set_override("notion.token", token)?;
        }
        if let Ok(id) = env::var("NOTION_DATABASE_ID") {
            builder = builder.set_override("notion.database_id", id)?;
        }

        builder.build()?.try_deserialize()
    }
}
