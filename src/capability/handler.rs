use super::param::{Json, ParamType, ValueKind};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::marker::PhantomData;

#[derive(Debug, Clone, PartialEq)]
pub enum CallOutput {
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Structured(Value),
}

impl CallOutput {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => CallOutput::Empty,
            Value::String(s) => CallOutput::Text(s),
            Value::Bool(b) => CallOutput::Boolean(b),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => CallOutput::Integer(i),
                (None, Some(f)) if !n.is_u64() => CallOutput::Float(f),
                _ => CallOutput::Structured(Value::Number(n)),
            },
            other => CallOutput::Structured(other),
        }
    }

    pub fn is_empty(&self) -> bool { matches!(self, CallOutput::Empty) }

    pub fn to_value(&self) -> Value {
        match self {
            CallOutput::Empty => Value::Null,
            CallOutput::Text(s) => Value::String(s.clone()),
            CallOutput::Integer(i) => Value::from(*i),
            CallOutput::Float(f) => Value::from(*f),
            CallOutput::Boolean(b) => Value::Bool(*b),
            CallOutput::Structured(v) => v.clone(),
        }
    }

    /// Text embedded in protocol responses. Non-finite floats have no JSON
    /// form and render as `NaN`, `inf` or `-inf`.
    pub fn to_text(&self) -> String {
        match self {
            CallOutput::Empty => String::new(),
            CallOutput::Text(s) => s.clone(),
            CallOutput::Float(f) if !f.is_finite() => f.to_string(),
            other => other.to_value().to_string(),
        }
    }
}

#[derive(Debug)]
#[doc(hidden)]
pub enum HandlerError {
    Arity { expected: usize, got: usize },
    Decode { position: usize, source: serde_json::Error },
    Target(String),
    Output(serde_json::Error),
}

pub trait IntoOutput {
    #[doc(hidden)]
    fn into_output(self) -> Result<CallOutput, OutputError>;
}

#[derive(Debug)]
#[doc(hidden)]
pub enum OutputError {
    Target(String),
    Serialize(serde_json::Error),
}

impl From<OutputError> for HandlerError {
    fn from(e: OutputError) -> Self {
        match e {
            OutputError::Target(msg) => HandlerError::Target(msg),
            OutputError::Serialize(e) => HandlerError::Output(e),
        }
    }
}

impl IntoOutput for () {
    fn into_output(self) -> Result<CallOutput, OutputError> { Ok(CallOutput::Empty) }
}

impl IntoOutput for String {
    fn into_output(self) -> Result<CallOutput, OutputError> { Ok(CallOutput::Text(self)) }
}

impl IntoOutput for &'static str {
    fn into_output(self) -> Result<CallOutput, OutputError> { Ok(CallOutput::Text(self.to_string())) }
}

impl IntoOutput for bool {
    fn into_output(self) -> Result<CallOutput, OutputError> { Ok(CallOutput::Boolean(self)) }
}

macro_rules! integer_output {
    ($($ty:ty),*) => {
        $(impl IntoOutput for $ty {
            fn into_output(self) -> Result<CallOutput, OutputError> { Ok(CallOutput::Integer(i64::from(self))) }
        })*
    };
}

integer_output!(i8, i16, i32, i64, u8, u16, u32);

impl IntoOutput for u64 {
    fn into_output(self) -> Result<CallOutput, OutputError> { Ok(CallOutput::from_value(Value::from(self))) }
}

impl IntoOutput for f32 {
    fn into_output(self) -> Result<CallOutput, OutputError> { Ok(CallOutput::Float(f64::from(self))) }
}

impl IntoOutput for f64 {
    fn into_output(self) -> Result<CallOutput, OutputError> { Ok(CallOutput::Float(self)) }
}

impl IntoOutput for Value {
    fn into_output(self) -> Result<CallOutput, OutputError> { Ok(CallOutput::from_value(self)) }
}

fn structured<T: Serialize>(value: &T) -> Result<CallOutput, OutputError> {
    match serde_json::to_value(value).map_err(OutputError::Serialize)? {
        Value::Null => Ok(CallOutput::Empty),
        v => Ok(CallOutput::Structured(v)),
    }
}

impl<T: Serialize> IntoOutput for Json<T> {
    fn into_output(self) -> Result<CallOutput, OutputError> { structured(&self.0) }
}

impl<T: Serialize> IntoOutput for Vec<T> {
    fn into_output(self) -> Result<CallOutput, OutputError> { structured(&self) }
}

impl<T: Serialize> IntoOutput for HashMap<String, T> {
    fn into_output(self) -> Result<CallOutput, OutputError> { structured(&self) }
}

impl<T: Serialize> IntoOutput for BTreeMap<String, T> {
    fn into_output(self) -> Result<CallOutput, OutputError> { structured(&self) }
}

impl IntoOutput for serde_json::Map<String, Value> {
    fn into_output(self) -> Result<CallOutput, OutputError> { Ok(CallOutput::Structured(Value::Object(self))) }
}

impl<T: IntoOutput> IntoOutput for Option<T> {
    fn into_output(self) -> Result<CallOutput, OutputError> {
        match self {
            Some(v) => v.into_output(),
            None => Ok(CallOutput::Empty),
        }
    }
}

impl<T: IntoOutput, E: Display> IntoOutput for Result<T, E> {
    fn into_output(self) -> Result<CallOutput, OutputError> {
        match self {
            Ok(v) => v.into_output(),
            Err(e) => Err(OutputError::Target(e.to_string())),
        }
    }
}

/// A typed callable on `S` taking `Args` positional parameters.
///
/// Implemented for every `Fn(&S, A1, .., An) -> R` up to eight parameters
/// where each `Ai: ParamType` and `R: IntoOutput`.
pub trait Handler<S, Args>: Send + Sync + 'static {
    fn kinds() -> Vec<ValueKind>;

    #[doc(hidden)]
    fn call(&self, instance: &S, args: Vec<Value>) -> Result<CallOutput, HandlerError>;
}

fn decode<T: ParamType>(position: usize, value: Value) -> Result<T, HandlerError> {
    serde_json::from_value(value).map_err(|source| HandlerError::Decode { position, source })
}

macro_rules! impl_handler {
    ($($ty:ident),*) => {
        impl<S, F, R, $($ty,)*> Handler<S, ($($ty,)*)> for F
        where
            F: Fn(&S, $($ty,)*) -> R + Send + Sync + 'static,
            R: IntoOutput,
            $($ty: ParamType,)*
        {
            fn kinds() -> Vec<ValueKind> { vec![$(<$ty as ParamType>::KIND,)*] }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn call(&self, instance: &S, args: Vec<Value>) -> Result<CallOutput, HandlerError> {
                let expected = 0usize $(+ { let _ = stringify!($ty); 1 })*;
                if args.len() != expected {
                    return Err(HandlerError::Arity { expected, got: args.len() });
                }
                let mut args = args.into_iter().enumerate();
                $(
                    let $ty = match args.next() {
                        Some((position, value)) => decode::<$ty>(position, value)?,
                        None => return Err(HandlerError::Arity { expected, got: 0 }),
                    };
                )*
                Ok((self)(instance, $($ty,)*).into_output()?)
            }
        }
    };
}

impl_handler!();
impl_handler!(A1);
impl_handler!(A1, A2);
impl_handler!(A1, A2, A3);
impl_handler!(A1, A2, A3, A4);
impl_handler!(A1, A2, A3, A4, A5);
impl_handler!(A1, A2, A3, A4, A5, A6);
impl_handler!(A1, A2, A3, A4, A5, A6, A7);
impl_handler!(A1, A2, A3, A4, A5, A6, A7, A8);

pub(crate) trait ErasedHandler<S>: Send + Sync {
    fn call(&self, instance: &S, args: Vec<Value>) -> Result<CallOutput, HandlerError>;
}

pub(crate) struct Bound<H, Args> {
    pub handler: H,
    pub _args: PhantomData<fn() -> Args>,
}

impl<S, H, Args> ErasedHandler<S> for Bound<H, Args>
where
    H: Handler<S, Args>,
    Args: 'static,
{
    fn call(&self, instance: &S, args: Vec<Value>) -> Result<CallOutput, HandlerError> {
        self.handler.call(instance, args)
    }
}
