use super::declare::FormalParam;
use super::handler::{CallOutput, HandlerError};
use super::schema::ArgumentSchema;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Invoke = dyn Fn(Vec<Value>) -> Result<CallOutput, HandlerError> + Send + Sync;

/// A declared method bound to the instance that owns it.
///
/// The instance is shared, not copied: every definition scanned from the
/// same provider holds the same `Arc`.
#[derive(Clone)]
pub struct BoundMethod {
    ident: String,
    owner: &'static str,
    params: Arc<[FormalParam]>,
    invoke: Arc<Invoke>,
}

impl BoundMethod {
    pub(crate) fn new(ident: String, owner: &'static str, params: Vec<FormalParam>, invoke: Arc<Invoke>) -> Self {
        Self { ident, owner, params: params.into(), invoke }
    }

    pub fn ident(&self) -> &str { &self.ident }
    pub fn owner(&self) -> &'static str { self.owner }
    pub fn params(&self) -> &[FormalParam] { &self.params }
    pub fn arity(&self) -> usize { self.params.len() }

    pub(crate) fn call(&self, args: Vec<Value>) -> Result<CallOutput, HandlerError> { (self.invoke)(args) }
}

impl fmt::Debug for BoundMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundMethod")
            .field("ident", &self.ident)
            .field("owner", &self.owner)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: ArgumentSchema,
    pub target: BoundMethod,
}

#[derive(Debug, Clone)]
pub struct ResourceDefinition {
    pub uri: String,
    pub title: String,
    pub description: String,
    pub mime_type: String,
    pub target: BoundMethod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

#[derive(Debug, Clone)]
pub struct PromptDefinition {
    pub name: String,
    pub title: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
    pub target: BoundMethod,
}

/// Any scanned capability.
#[derive(Debug, Clone)]
pub enum CapabilityDefinition {
    Tool(ToolDefinition),
    Resource(ResourceDefinition),
    Prompt(PromptDefinition),
}

/// Common view over the three definition kinds.
pub trait Definition {
    /// Registry key: name for tools and prompts, uri for resources.
    fn key(&self) -> &str;
    fn description(&self) -> &str;
    fn target(&self) -> &BoundMethod;
}

impl Definition for ToolDefinition {
    fn key(&self) -> &str { &self.name }
    fn description(&self) -> &str { &self.description }
    fn target(&self) -> &BoundMethod { &self.target }
}

impl Definition for ResourceDefinition {
    fn key(&self) -> &str { &self.uri }
    fn description(&self) -> &str { &self.description }
    fn target(&self) -> &BoundMethod { &self.target }
}

impl Definition for PromptDefinition {
    fn key(&self) -> &str { &self.name }
    fn description(&self) -> &str { &self.description }
    fn target(&self) -> &BoundMethod { &self.target }
}

impl Definition for CapabilityDefinition {
    fn key(&self) -> &str {
        match self {
            CapabilityDefinition::Tool(d) => d.key(),
            CapabilityDefinition::Resource(d) => d.key(),
            CapabilityDefinition::Prompt(d) => d.key(),
        }
    }
    fn description(&self) -> &str {
        match self {
            CapabilityDefinition::Tool(d) => &d.description,
            CapabilityDefinition::Resource(d) => &d.description,
            CapabilityDefinition::Prompt(d) => &d.description,
        }
    }
    fn target(&self) -> &BoundMethod {
        match self {
            CapabilityDefinition::Tool(d) => &d.target,
            CapabilityDefinition::Resource(d) => &d.target,
            CapabilityDefinition::Prompt(d) => &d.target,
        }
    }
}

impl CapabilityDefinition {
    pub fn kind(&self) -> &'static str {
        match self {
            CapabilityDefinition::Tool(_) => "tool",
            CapabilityDefinition::Resource(_) => "resource",
            CapabilityDefinition::Prompt(_) => "prompt",
        }
    }
}

impl From<ToolDefinition> for CapabilityDefinition {
    fn from(d: ToolDefinition) -> Self { CapabilityDefinition::Tool(d) }
}

impl From<ResourceDefinition> for CapabilityDefinition {
    fn from(d: ResourceDefinition) -> Self { CapabilityDefinition::Resource(d) }
}

impl From<PromptDefinition> for CapabilityDefinition {
    fn from(d: PromptDefinition) -> Self { CapabilityDefinition::Prompt(d) }
}
