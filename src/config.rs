use crate::mcp::types::DEFAULT_SERVER_VERSION;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub features: Features,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    /// Empty means "use the provider's type name".
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
}
fn default_version() -> String { DEFAULT_SERVER_VERSION.to_string() }

impl Default for Server {
    fn default() -> Self { Self { name: String::new(), version: default_version() } }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Features {
    #[serde(default = "enabled")]
    pub resources: bool,
    #[serde(default = "enabled")]
    pub prompts: bool,
}
fn enabled() -> bool { true }

impl Default for Features {
    fn default() -> Self { Self { resources: true, prompts: true } }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(toml::from_str(&raw)?)
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.version.trim().is_empty() { anyhow::bail!("server.version must not be empty"); }
        if self.server.name != self.server.name.trim() { anyhow::bail!("server.name must not have surrounding whitespace"); }
        Ok(())
    }
}
