use serde::Serialize;
use thiserror::Error;

/// JSON-RPC error codes used when faults reach a protocol runtime.
pub mod rpc {
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Failure of a single invocation. Never fatal to the process.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvocationError {
    #[error("argument '{param}' could not be resolved: {message}")]
    ArgumentResolution { param: String, message: String },
    #[error("method invocation failed: {0}")]
    Target(String),
    #[error("method is not accessible: {0}")]
    Access(String),
}

impl InvocationError {
    pub fn code(&self) -> &'static str {
        match self {
            InvocationError::ArgumentResolution { .. } => "ArgumentResolution",
            InvocationError::Target(_) => "TargetInvocation",
            InvocationError::Access(_) => "Access",
        }
    }

    pub fn rpc_code(&self) -> i64 {
        match self {
            InvocationError::ArgumentResolution { .. } => rpc::INVALID_PARAMS,
            InvocationError::Target(_) | InvocationError::Access(_) => rpc::INTERNAL_ERROR,
        }
    }

    pub(crate) fn target(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            InvocationError::Target("target failed without a message".to_string())
        } else {
            InvocationError::Target(message)
        }
    }
}

/// Misdeclared capability metadata, reported while scanning.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("resource method '{method}' on {owner} has an empty uri")]
    EmptyResourceUri { owner: &'static str, method: String },
    #[error("resource method '{method}' on {owner} declares {arity} parameter(s); resources take none")]
    ResourceParameters { owner: &'static str, method: String, arity: usize },
    #[error("method '{method}' on {owner} declares {declared} parameter(s) but its handler takes {arity}")]
    ParamCount { owner: &'static str, method: String, declared: usize, arity: usize },
    #[error("method '{method}' on {owner} declares argument '{name}' more than once")]
    DuplicateArgument { owner: &'static str, method: String, name: String },
}

impl ScanError {
    pub fn code(&self) -> &'static str {
        match self {
            ScanError::EmptyResourceUri { .. } => "EmptyResourceUri",
            ScanError::ResourceParameters { .. } => "ResourceParameters",
            ScanError::ParamCount { .. } => "ParamCount",
            ScanError::DuplicateArgument { .. } => "DuplicateArgument",
        }
    }
}

/// Fault returned to a protocol runtime in place of a result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuntimeFault {
    pub code: i64,
    pub message: String,
}

impl RuntimeFault {
    pub fn invalid_request(message: impl Into<String>) -> Self { Self { code: rpc::INVALID_REQUEST, message: message.into() } }
    pub fn method_not_found(name: &str) -> Self { Self { code: rpc::METHOD_NOT_FOUND, message: format!("Method not found: {name}") } }

    /// Wraps an invocation failure with a context prefix, keeping its category.
    pub fn from_invocation(context: &str, err: &InvocationError) -> Self {
        Self { code: err.rpc_code(), message: format!("{context}: {err}") }
    }
}
