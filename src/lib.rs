//! Expose plain methods as MCP tools, resources and prompts.
//!
//! A type implements [`CapabilityProvider`] and declares its methods with
//! per-method and per-parameter metadata. Scanning turns those declarations
//! into definitions with generated argument schemas; the invocation bridge
//! resolves a name-keyed argument map into typed positional arguments and
//! calls the method.

pub mod bootstrap;
pub mod capability;
pub mod config;
pub mod errors;
pub mod logging;
pub mod mcp;


pub use bootstrap::{register_provider, Capabilities};
pub use capability::{
    invoke, ArgumentMap, CallOutput, CapabilityProvider, Declarations, Json, Param, PromptArg, PromptMeta, Property,
    ResourceMeta, ToolMeta,
};
pub use config::Config;
pub use errors::{InvocationError, RuntimeFault, ScanError};
