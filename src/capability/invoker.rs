//! Invocation bridge: argument map in, transport-safe output out.
//!
//! Required-ness is advisory. An absent argument binds `null` whether or not
//! the schema lists it as required; only the typed decode or the target
//! itself can reject it.

use super::definition::{BoundMethod, Definition};
use super::handler::{CallOutput, HandlerError};
use super::param::ValueKind;
use crate::errors::InvocationError;
use serde_json::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, warn};

/// Flat, name-keyed call arguments.
pub type ArgumentMap = serde_json::Map<String, Value>;

/// Invokes a definition's target with the given arguments.
///
/// Every failure, including a panic in the target, comes back as a single
/// [`InvocationError`].
pub fn invoke<D: Definition + ?Sized>(definition: &D, args: &ArgumentMap) -> Result<CallOutput, InvocationError> {
    let target = definition.target();
    let started = Instant::now();
    let result = resolve_arguments(target, args).and_then(|positional| call_target(target, positional));
    let duration_us = started.elapsed().as_micros() as u64;
    match &result {
        Ok(_) => debug!(capability = definition.key(), method = target.ident(), duration_us, "invoked"),
        Err(e) => warn!(capability = definition.key(), method = target.ident(), code = e.code(), error = %e, duration_us, "invocation failed"),
    }
    result
}

/// Resolves each formal parameter by external name and coerces it to the
/// declared kind, producing the positional argument list.
pub fn resolve_arguments(target: &BoundMethod, args: &ArgumentMap) -> Result<Vec<Value>, InvocationError> {
    target
        .params()
        .iter()
        .map(|formal| {
            let name = formal.external_name();
            match args.get(name) {
                None | Some(Value::Null) => Ok(Value::Null),
                Some(value) => coerce(value, formal.kind).map_err(|message| InvocationError::ArgumentResolution {
                    param: name.to_string(),
                    message,
                }),
            }
        })
        .collect()
}

fn call_target(target: &BoundMethod, positional: Vec<Value>) -> Result<CallOutput, InvocationError> {
    match panic::catch_unwind(AssertUnwindSafe(|| target.call(positional))) {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(classify(target, e)),
        Err(payload) => Err(InvocationError::target(panic_message(payload.as_ref()))),
    }
}

fn classify(target: &BoundMethod, err: HandlerError) -> InvocationError {
    match err {
        HandlerError::Arity { expected, got } => InvocationError::Access(format!(
            "{}::{} takes {expected} argument(s), {got} resolved",
            target.owner(),
            target.ident()
        )),
        HandlerError::Decode { position, source } => InvocationError::ArgumentResolution {
            param: target
                .params()
                .get(position)
                .map(|p| p.external_name().to_string())
                .unwrap_or_else(|| format!("arg{position}")),
            message: source.to_string(),
        },
        HandlerError::Target(message) => InvocationError::target(message),
        HandlerError::Output(e) => InvocationError::target(format!("result could not be serialized: {e}")),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "target panicked".to_string()
    }
}

fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Scalar coercion towards the declared kind.
///
/// Values already of the right shape pass through unchanged. Structured
/// kinds are left for the typed decode, which matches record fields by name.
pub fn coerce(value: &Value, kind: ValueKind) -> Result<Value, String> {
    let mismatch = || format!("expected {}, found {}", kind.schema_type(), shape(value));
    match kind {
        ValueKind::Text => match value {
            Value::String(_) => Ok(value.clone()),
            Value::Number(n) => Ok(Value::String(n.to_string())),
            Value::Bool(b) => Ok(Value::String(b.to_string())),
            _ => Err(mismatch()),
        },
        k if k.is_integer() => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value.clone()),
            Value::Number(n) => match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(Value::from(f as i64))
                }
                _ => Err(format!("{n} is not an integer")),
            },
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .map(Value::from)
                    .or_else(|_| s.parse::<u64>().map(Value::from))
                    .map_err(|_| format!("'{s}' is not an integer"))
            }
            _ => Err(mismatch()),
        },
        k if k.is_float() => match value {
            Value::Number(_) => Ok(value.clone()),
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(Value::from(f)),
                _ => Err(format!("'{s}' is not a number")),
            },
            _ => Err(mismatch()),
        },
        ValueKind::Boolean => match value {
            Value::Bool(_) => Ok(value.clone()),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
            _ => Err(mismatch()),
        },
        _ => Ok(value.clone()),
    }
}
