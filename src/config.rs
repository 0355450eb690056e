use crate::fence::FenceSyntax;
use crate::protocol::JsonToolProtocol;
use crate::types::{Tool, ToolDefinition};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid fence syntax: {0}")]
    InvalidSyntax(String),

    #[error("Failed to compile fence pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings read from the configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolConfig {
    pub syntax: FenceSyntax,
}

impl ProtocolConfig {
    pub fn protocol(&self) -> Result<JsonToolProtocol, ConfigError> {
        JsonToolProtocol::new(self.syntax.clone())
    }
}

/// Get the path of the default configuration file
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("fenced-tools").join("config.json"))
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, the default location is used
/// if a file is present there, otherwise the built-in defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<ProtocolConfig, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match get_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No configuration file found, using defaults");
                return Ok(ProtocolConfig::default());
            }
        },
    };

    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(&path)?;
    let config: ProtocolConfig = serde_json::from_str(&content)?;
    config.syntax.validate()?;
    Ok(config)
}

/// Catalog files may list tagged tools or plain tool definitions
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogEntry {
    Tool(Tool),
    Definition(ToolDefinition),
}

impl From<CatalogEntry> for Tool {
    fn from(entry: CatalogEntry) -> Self {
        match entry {
            CatalogEntry::Tool(tool) => tool,
            CatalogEntry::Definition(definition) => Tool::Function {
                name: definition.name,
                description: Some(definition.description),
                input_schema: definition.parameters,
            },
        }
    }
}

/// Load a tool catalog from a JSON array
pub fn load_tool_catalog(path: &Path) -> Result<Vec<Tool>, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_tool_catalog(&content)
}

pub fn parse_tool_catalog(json: &str) -> Result<Vec<Tool>, ConfigError> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
    Ok(entries.into_iter().map(Tool::from).collect())
}
