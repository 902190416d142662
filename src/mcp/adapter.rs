//! Glue between scanned definitions and a protocol runtime.
//!
//! The runtime owns framing and transport; it only sees the three
//! registration calls below and the callbacks they carry.

use crate::capability::{invoke, ArgumentMap, PromptDefinition, ResourceDefinition, ToolDefinition};
use crate::errors::{InvocationError, RuntimeFault};
use crate::mcp::types::{
    CallToolResult, Content, GetPromptResult, Prompt, PromptArgument, PromptMessage, ReadResourceResult, Resource,
    ResourceContents, Role, Tool,
};
use std::sync::Arc;
use std::time::Instant;

pub type ToolCallback = Box<dyn Fn(&ArgumentMap) -> CallToolResult + Send + Sync>;
pub type ResourceCallback = Box<dyn Fn() -> Result<ReadResourceResult, RuntimeFault> + Send + Sync>;
pub type PromptCallback = Box<dyn Fn(&ArgumentMap) -> Result<GetPromptResult, RuntimeFault> + Send + Sync>;

/// Registration surface of a protocol runtime.
pub trait ProtocolRuntime {
    fn register_tool(&mut self, tool: Tool, callback: ToolCallback);
    fn register_resource(&mut self, resource: Resource, callback: ResourceCallback);
    fn register_prompt(&mut self, prompt: Prompt, callback: PromptCallback);
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

pub fn tool_info(def: &ToolDefinition) -> Tool {
    Tool { name: def.name.clone(), title: None, description: def.description.clone(), input_schema: def.input_schema.to_value() }
}

pub fn resource_info(def: &ResourceDefinition) -> Resource {
    Resource {
        uri: def.uri.clone(),
        name: if def.title.is_empty() { def.uri.clone() } else { def.title.clone() },
        description: non_empty(&def.description),
        mime_type: Some(def.mime_type.clone()),
    }
}

pub fn prompt_info(def: &PromptDefinition) -> Prompt {
    Prompt {
        name: def.name.clone(),
        title: non_empty(&def.title),
        description: non_empty(&def.description),
        arguments: def
            .arguments
            .iter()
            .map(|a| PromptArgument { name: a.name.clone(), description: non_empty(&a.description), required: a.required })
            .collect(),
    }
}

/// Wires definitions to a runtime through the invocation bridge.
#[derive(Debug, Clone)]
pub struct CapabilityAdapter {
    server: Arc<str>,
}

impl CapabilityAdapter {
    pub fn new(server: impl Into<Arc<str>>) -> Self { Self { server: server.into() } }

    pub fn register_tools<'a, R: ProtocolRuntime + ?Sized>(
        &self,
        runtime: &mut R,
        tools: impl IntoIterator<Item = &'a ToolDefinition>,
    ) {
        for def in tools {
            let def = def.clone();
            let server = Arc::clone(&self.server);
            runtime.register_tool(
                tool_info(&def),
                Box::new(move |args: &ArgumentMap| {
                    let started = Instant::now();
                    let result = invoke(&def, args);
                    audit(&server, "tool", &def.name, result.as_ref().err(), started);
                    match result {
                        Ok(output) => CallToolResult::success(output.to_text()),
                        Err(e) => CallToolResult::error(format!("Tool execution failed: {e}")),
                    }
                }),
            );
        }
    }

    pub fn register_resources<'a, R: ProtocolRuntime + ?Sized>(
        &self,
        runtime: &mut R,
        resources: impl IntoIterator<Item = &'a ResourceDefinition>,
    ) {
        for def in resources {
            let def = def.clone();
            let server = Arc::clone(&self.server);
            runtime.register_resource(
                resource_info(&def),
                Box::new(move || {
                    let started = Instant::now();
                    let result = invoke(&def, &ArgumentMap::new());
                    audit(&server, "resource", &def.uri, result.as_ref().err(), started);
                    let output = result.map_err(|e| RuntimeFault::from_invocation("Resource read failed", &e))?;
                    Ok(ReadResourceResult {
                        contents: vec![ResourceContents {
                            uri: def.uri.clone(),
                            mime_type: def.mime_type.clone(),
                            text: output.to_text(),
                        }],
                    })
                }),
            );
        }
    }

    pub fn register_prompts<'a, R: ProtocolRuntime + ?Sized>(
        &self,
        runtime: &mut R,
        prompts: impl IntoIterator<Item = &'a PromptDefinition>,
    ) {
        for def in prompts {
            let def = def.clone();
            let server = Arc::clone(&self.server);
            runtime.register_prompt(
                prompt_info(&def),
                Box::new(move |args: &ArgumentMap| {
                    let started = Instant::now();
                    let result = invoke(&def, args);
                    audit(&server, "prompt", &def.name, result.as_ref().err(), started);
                    let output = result.map_err(|e| RuntimeFault::from_invocation("Prompt execution failed", &e))?;
                    Ok(GetPromptResult {
                        description: non_empty(&def.description),
                        messages: vec![PromptMessage { role: Role::User, content: Content::text(output.to_text()) }],
                    })
                }),
            );
        }
    }
}

fn audit(server: &str, kind: &str, key: &str, err: Option<&InvocationError>, started: Instant) {
    let request_id = uuid::Uuid::new_v4().to_string();
    let (decision, code) = match err {
        None => ("allow", "OK"),
        Some(e) => ("error", e.code()),
    };
    tracing::info!(
        request_id = %request_id,
        server = server,
        kind = kind,
        capability = key,
        decision = decision,
        code = code,
        duration_ms = started.elapsed().as_millis() as u64,
        "audit"
    );
}
