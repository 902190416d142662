pub mod declare;
pub mod definition;
pub mod handler;
pub mod invoker;
pub mod param;
pub mod scanner;
pub mod schema;

pub use declare::{CapabilityProvider, Declarations, MethodBuilder, Param, PromptArg, PromptMeta, Property, ResourceMeta, ToolMeta};
pub use definition::{BoundMethod, CapabilityDefinition, Definition, PromptArgument, PromptDefinition, ResourceDefinition, ToolDefinition};
pub use handler::{CallOutput, Handler, IntoOutput};
pub use invoker::{invoke, ArgumentMap};
pub use param::{Json, ParamType, ValueKind};
pub use scanner::{scan_all, scan_prompts, scan_resources, scan_tools, Scanned};
pub use schema::{generate_schema, ArgumentSchema, PropertyDescriptor};
