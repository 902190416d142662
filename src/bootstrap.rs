use crate::capability::{scan_prompts, scan_resources, scan_tools, CapabilityProvider};
use crate::config::Config;
use crate::mcp::adapter::{CapabilityAdapter, ProtocolRuntime};
use crate::mcp::registry::{PromptRegistry, ResourceRegistry, ToolRegistry};
use crate::mcp::types::{ListChanged, ResourcesCapability, ServerCapabilities, ServerInfo};
use anyhow::Context;
use std::sync::Arc;
use tracing::info;

/// What a provider ended up exposing after registration.
#[derive(Debug, Clone)]
pub struct Capabilities {
    pub info: ServerInfo,
    pub advertised: ServerCapabilities,
    pub tools: ToolRegistry,
    pub resources: ResourceRegistry,
    pub prompts: PromptRegistry,
}

fn short_type_name<S>() -> &'static str {
    let full = std::any::type_name::<S>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Scans `instance`, fills the registries and registers everything with `runtime`.
///
/// Tools are always scanned; resources and prompts only when enabled in
/// `cfg.features`. Runs once at startup.
pub fn register_provider<S, R>(instance: Arc<S>, cfg: &Config, runtime: &mut R) -> anyhow::Result<Capabilities>
where
    S: CapabilityProvider,
    R: ProtocolRuntime + ?Sized,
{
    cfg.validate().context("validating config")?;
    let name = if cfg.server.name.is_empty() { short_type_name::<S>().to_string() } else { cfg.server.name.clone() };
    let info = ServerInfo { name, version: cfg.server.version.clone() };

    let mut tools = ToolRegistry::new();
    tools.extend(scan_tools(&instance).context("scanning tools")?);

    let mut resources = ResourceRegistry::new();
    if cfg.features.resources {
        resources.extend(scan_resources(&instance).context("scanning resources")?);
    }

    let mut prompts = PromptRegistry::new();
    if cfg.features.prompts {
        prompts.extend(scan_prompts(&instance).context("scanning prompts")?);
    }

    let adapter = CapabilityAdapter::new(info.name.as_str());
    adapter.register_tools(runtime, tools.iter());
    adapter.register_resources(runtime, resources.iter());
    adapter.register_prompts(runtime, prompts.iter());

    let advertised = ServerCapabilities {
        tools: Some(ListChanged::default()),
        resources: cfg.features.resources.then(ResourcesCapability::default),
        prompts: cfg.features.prompts.then(ListChanged::default),
    };

    info!(
        server = %info.name,
        version = %info.version,
        tools = ?tools.keys(),
        resources = ?resources.keys(),
        prompts = ?prompts.keys(),
        "capabilities registered"
    );

    Ok(Capabilities { info, advertised, tools, resources, prompts })
}
