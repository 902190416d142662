//! Turns a provider's declarations into capability definitions.
//!
//! Each scan walks the declared methods in declaration order and keeps the
//! ones carrying its marker. A method with several markers appears in every
//! matching scan. Target methods are never called here.

use super::declare::{CapabilityProvider, Declarations, FormalParam, MethodDecl, Param};
use super::handler::ErasedHandler;
use super::definition::{BoundMethod, PromptArgument, PromptDefinition, ResourceDefinition, ToolDefinition};
use super::schema::generate_schema;
use crate::errors::ScanError;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Everything a provider exposes, in scan order.
#[derive(Debug, Clone, Default)]
pub struct Scanned {
    pub tools: Vec<ToolDefinition>,
    pub resources: Vec<ResourceDefinition>,
    pub prompts: Vec<PromptDefinition>,
}

fn declarations<S: CapabilityProvider>() -> Declarations<S> {
    let mut decl = Declarations::new();
    S::declare(&mut decl);
    decl
}

fn owner<S>() -> &'static str { std::any::type_name::<S>() }

fn formal_params<S: CapabilityProvider>(method: &MethodDecl<S>) -> Result<Vec<FormalParam>, ScanError> {
    if method.params.len() > method.kinds.len() {
        return Err(ScanError::ParamCount {
            owner: owner::<S>(),
            method: method.ident.clone(),
            declared: method.params.len(),
            arity: method.kinds.len(),
        });
    }
    Ok(method
        .kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| FormalParam {
            param: method.params.get(i).cloned().unwrap_or_else(|| Param::new(format!("arg{i}"))),
            kind: *kind,
        })
        .collect())
}

fn bind<S: CapabilityProvider>(instance: &Arc<S>, method: &MethodDecl<S>) -> Result<BoundMethod, ScanError> {
    let params = formal_params(method)?;
    let handler = Arc::clone(&method.handler);
    let instance = Arc::clone(instance);
    Ok(BoundMethod::new(
        method.ident.clone(),
        owner::<S>(),
        params,
        Arc::new(move |args: Vec<serde_json::Value>| handler.call(&instance, args)),
    ))
}

fn unique_names<'a, S>(method: &MethodDecl<S>, names: impl IntoIterator<Item = &'a str>) -> Result<(), ScanError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(ScanError::DuplicateArgument {
                owner: owner::<S>(),
                method: method.ident.clone(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn or_ident(name: &str, ident: &str) -> String {
    if name.is_empty() { ident.to_string() } else { name.to_string() }
}

pub fn scan_tools<S: CapabilityProvider>(instance: &Arc<S>) -> Result<Vec<ToolDefinition>, ScanError> {
    let mut tools = Vec::new();
    for method in declarations::<S>().methods.iter() {
        let Some(meta) = method.tool.as_ref() else { continue };
        let target = bind(instance, method)?;
        let properties = target.params().iter().filter_map(|formal| {
            let property = formal.param.property.as_ref()?;
            Some(if property.name.is_empty() { formal.param.ident.as_str() } else { property.name.as_str() })
        });
        unique_names(method, properties)?;
        let input_schema = generate_schema(target.params());
        let name = or_ident(&meta.name, &method.ident);
        debug!(owner = owner::<S>(), method = %method.ident, tool = %name, properties = input_schema.properties.len(), "scanned tool");
        tools.push(ToolDefinition { name, description: meta.description.clone(), input_schema, target });
    }
    Ok(tools)
}

pub fn scan_resources<S: CapabilityProvider>(instance: &Arc<S>) -> Result<Vec<ResourceDefinition>, ScanError> {
    let mut resources = Vec::new();
    for method in declarations::<S>().methods.iter() {
        let Some(meta) = method.resource.as_ref() else { continue };
        if meta.uri.trim().is_empty() {
            return Err(ScanError::EmptyResourceUri { owner: owner::<S>(), method: method.ident.clone() });
        }
        if !method.kinds.is_empty() {
            return Err(ScanError::ResourceParameters {
                owner: owner::<S>(),
                method: method.ident.clone(),
                arity: method.kinds.len(),
            });
        }
        let target = bind(instance, method)?;
        debug!(owner = owner::<S>(), method = %method.ident, uri = %meta.uri, "scanned resource");
        resources.push(ResourceDefinition {
            uri: meta.uri.clone(),
            title: meta.title.clone(),
            description: meta.description.clone(),
            mime_type: meta.mime_type.clone(),
            target,
        });
    }
    Ok(resources)
}

pub fn scan_prompts<S: CapabilityProvider>(instance: &Arc<S>) -> Result<Vec<PromptDefinition>, ScanError> {
    let mut prompts = Vec::new();
    for method in declarations::<S>().methods.iter() {
        let Some(meta) = method.prompt.as_ref() else { continue };
        let target = bind(instance, method)?;
        let arguments = target
            .params()
            .iter()
            .filter_map(|formal| {
                let arg = formal.param.prompt_arg.as_ref()?;
                Some(PromptArgument {
                    name: or_ident(&arg.name, &formal.param.ident),
                    description: arg.description.clone(),
                    required: arg.required,
                })
            })
            .collect::<Vec<_>>();
        unique_names(method, arguments.iter().map(|a| a.name.as_str()))?;
        let name = or_ident(&meta.name, &method.ident);
        debug!(owner = owner::<S>(), method = %method.ident, prompt = %name, arguments = arguments.len(), "scanned prompt");
        prompts.push(PromptDefinition {
            name,
            title: meta.title.clone(),
            description: meta.description.clone(),
            arguments,
            target,
        });
    }
    Ok(prompts)
}

pub fn scan_all<S: CapabilityProvider>(instance: &Arc<S>) -> Result<Scanned, ScanError> {
    Ok(Scanned {
        tools: scan_tools(instance)?,
        resources: scan_resources(instance)?,
        prompts: scan_prompts(instance)?,
    })
}
