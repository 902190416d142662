//! Declarative capability metadata.
//!
//! A provider lists its methods once in [`CapabilityProvider::declare`]; the
//! scanner reads those declarations instead of inspecting the type at runtime.

use super::handler::{ErasedHandler, Handler};
use super::param::ValueKind;
use std::marker::PhantomData;
use std::sync::Arc;

pub const DEFAULT_MIME_TYPE: &str = "text/plain";

pub trait CapabilityProvider: Send + Sync + Sized + 'static {
    fn declare(decl: &mut Declarations<Self>);
}

/// Marks a method as a tool. An empty name falls back to the method identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolMeta {
    pub name: String,
    pub description: String,
}

impl ToolMeta {
    pub fn new() -> Self { Self::default() }
    pub fn name(mut self, name: impl Into<String>) -> Self { self.name = name.into(); self }
    pub fn description(mut self, description: impl Into<String>) -> Self { self.description = description.into(); self }
}

/// Marks a method as a resource. The uri is mandatory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMeta {
    pub uri: String,
    pub title: String,
    pub description: String,
    pub mime_type: String,
}

impl ResourceMeta {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into(), title: String::new(), description: String::new(), mime_type: DEFAULT_MIME_TYPE.to_string() }
    }
    pub fn title(mut self, title: impl Into<String>) -> Self { self.title = title.into(); self }
    pub fn description(mut self, description: impl Into<String>) -> Self { self.description = description.into(); self }
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self { self.mime_type = mime_type.into(); self }
}

/// Marks a method as a prompt. An empty name falls back to the method identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptMeta {
    pub name: String,
    pub title: String,
    pub description: String,
}

impl PromptMeta {
    pub fn new() -> Self { Self::default() }
    pub fn name(mut self, name: impl Into<String>) -> Self { self.name = name.into(); self }
    pub fn title(mut self, title: impl Into<String>) -> Self { self.title = title.into(); self }
    pub fn description(mut self, description: impl Into<String>) -> Self { self.description = description.into(); self }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub format: String,
}

impl Default for Property {
    fn default() -> Self {
        Self { name: String::new(), description: String::new(), required: true, format: String::new() }
    }
}

impl Property {
    pub fn new() -> Self { Self::default() }
    pub fn name(mut self, name: impl Into<String>) -> Self { self.name = name.into(); self }
    pub fn description(mut self, description: impl Into<String>) -> Self { self.description = description.into(); self }
    pub fn required(mut self, required: bool) -> Self { self.required = required; self }
    pub fn optional(self) -> Self { self.required(false) }
    pub fn format(mut self, format: impl Into<String>) -> Self { self.format = format.into(); self }
}

/// Prompt argument metadata on a parameter. Prompt arguments carry no type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

impl Default for PromptArg {
    fn default() -> Self { Self { name: String::new(), description: String::new(), required: true } }
}

impl PromptArg {
    pub fn new() -> Self { Self::default() }
    pub fn name(mut self, name: impl Into<String>) -> Self { self.name = name.into(); self }
    pub fn description(mut self, description: impl Into<String>) -> Self { self.description = description.into(); self }
    pub fn required(mut self, required: bool) -> Self { self.required = required; self }
    pub fn optional(self) -> Self { self.required(false) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ident: String,
    pub property: Option<Property>,
    pub prompt_arg: Option<PromptArg>,
}

impl Param {
    pub fn new(ident: impl Into<String>) -> Self { Self { ident: ident.into(), property: None, prompt_arg: None } }
    pub fn property(mut self, property: Property) -> Self { self.property = Some(property); self }
    pub fn prompt_arg(mut self, arg: PromptArg) -> Self { self.prompt_arg = Some(arg); self }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormalParam {
    pub param: Param,
    pub kind: ValueKind,
}

impl FormalParam {
    /// External name used for argument lookup: property name, then prompt
    /// argument name, then the parameter identifier.
    pub fn external_name(&self) -> &str {
        if let Some(p) = self.param.property.as_ref().filter(|p| !p.name.is_empty()) {
            return &p.name;
        }
        if let Some(a) = self.param.prompt_arg.as_ref().filter(|a| !a.name.is_empty()) {
            return &a.name;
        }
        &self.param.ident
    }
}

pub(crate) struct MethodDecl<S> {
    pub ident: String,
    pub tool: Option<ToolMeta>,
    pub resource: Option<ResourceMeta>,
    pub prompt: Option<PromptMeta>,
    pub params: Vec<Param>,
    pub kinds: Vec<ValueKind>,
    pub handler: Arc<dyn ErasedHandler<S>>,
}

pub struct Declarations<S> {
    pub(crate) methods: Vec<MethodDecl<S>>,
}

impl<S: Send + Sync + 'static> Declarations<S> {
    pub(crate) fn new() -> Self { Self { methods: Vec::new() } }

    /// Declares a method. Parameter kinds come from the handler's argument types.
    pub fn method<H, Args>(&mut self, ident: impl Into<String>, handler: H) -> MethodBuilder<'_, S>
    where
        H: Handler<S, Args>,
        Args: 'static,
    {
        self.methods.push(MethodDecl {
            ident: ident.into(),
            tool: None,
            resource: None,
            prompt: None,
            params: Vec::new(),
            kinds: H::kinds(),
            handler: Arc::new(super::handler::Bound { handler, _args: PhantomData::<fn() -> Args> }),
        });
        let idx = self.methods.len() - 1;
        MethodBuilder { decl: &mut self.methods[idx] }
    }

    pub fn len(&self) -> usize { self.methods.len() }
    pub fn is_empty(&self) -> bool { self.methods.is_empty() }
}

pub struct MethodBuilder<'a, S> {
    decl: &'a mut MethodDecl<S>,
}

impl<S> MethodBuilder<'_, S> {
    pub fn tool(self, meta: ToolMeta) -> Self { self.decl.tool = Some(meta); self }
    pub fn resource(self, meta: ResourceMeta) -> Self { self.decl.resource = Some(meta); self }
    pub fn prompt(self, meta: PromptMeta) -> Self { self.decl.prompt = Some(meta); self }

    pub fn param(self, param: Param) -> Self { self.decl.params.push(param); self }
}
