use crate::capability::ArgumentMap;
use crate::errors::RuntimeFault;
use crate::mcp::adapter::{ProtocolRuntime, PromptCallback, ResourceCallback, ToolCallback};
use crate::mcp::types::{CallToolResult, GetPromptResult, Prompt, ReadResourceResult, Resource, Tool};
use indexmap::IndexMap;

/// In-process runtime: keeps registrations in order and dispatches calls
/// directly, without any transport.
#[derive(Default)]
pub struct LocalRuntime {
    tools: IndexMap<String, (Tool, ToolCallback)>,
    resources: IndexMap<String, (Resource, ResourceCallback)>,
    prompts: IndexMap<String, (Prompt, PromptCallback)>,
}

impl LocalRuntime {
    pub fn new() -> Self { Self::default() }

    pub fn list_tools(&self) -> Vec<&Tool> { self.tools.values().map(|(t, _)| t).collect() }
    pub fn list_resources(&self) -> Vec<&Resource> { self.resources.values().map(|(r, _)| r).collect() }
    pub fn list_prompts(&self) -> Vec<&Prompt> { self.prompts.values().map(|(p, _)| p).collect() }

    pub fn call_tool(&self, name: &str, args: &ArgumentMap) -> Result<CallToolResult, RuntimeFault> {
        let (_, callback) = self.tools.get(name).ok_or_else(|| RuntimeFault::method_not_found(name))?;
        Ok(callback(args))
    }

    pub fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, RuntimeFault> {
        let (_, callback) = self.resources.get(uri).ok_or_else(|| RuntimeFault::method_not_found(uri))?;
        callback()
    }

    pub fn get_prompt(&self, name: &str, args: &ArgumentMap) -> Result<GetPromptResult, RuntimeFault> {
        let (_, callback) = self.prompts.get(name).ok_or_else(|| RuntimeFault::method_not_found(name))?;
        callback(args)
    }

    /// Like [`call_tool`](Self::call_tool) but takes raw JSON arguments, as
    /// they arrive in a `tools/call` request. Anything but an object or null
    /// is an invalid request.
    pub fn call_tool_json(&self, name: &str, arguments: Option<serde_json::Value>) -> Result<CallToolResult, RuntimeFault> {
        match arguments {
            None | Some(serde_json::Value::Null) => self.call_tool(name, &ArgumentMap::new()),
            Some(serde_json::Value::Object(map)) => self.call_tool(name, &map),
            Some(_) => Err(RuntimeFault::invalid_request("tool arguments must be an object")),
        }
    }
}

impl ProtocolRuntime for LocalRuntime {
    fn register_tool(&mut self, tool: Tool, callback: ToolCallback) {
        self.tools.insert(tool.name.clone(), (tool, callback));
    }

    fn register_resource(&mut self, resource: Resource, callback: ResourceCallback) {
        self.resources.insert(resource.uri.clone(), (resource, callback));
    }

    fn register_prompt(&mut self, prompt: Prompt, callback: PromptCallback) {
        self.prompts.insert(prompt.name.clone(), (prompt, callback));
    }
}
