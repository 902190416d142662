use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Declared value type of a formal parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Int32,
    Int64,
    Float32,
    Float64,
    Boolean,
    Mapping,
    Any,
    Sequence,
    FixedArray,
    Record,
}

impl ValueKind {
    /// JSON schema type for this kind. Total: records fall back to "object".
    pub fn schema_type(self) -> &'static str {
        match self {
            ValueKind::Text => "string",
            ValueKind::Int32 | ValueKind::Int64 => "integer",
            ValueKind::Float32 | ValueKind::Float64 => "number",
            ValueKind::Boolean => "boolean",
            ValueKind::Mapping | ValueKind::Any => "object",
            ValueKind::Sequence | ValueKind::FixedArray => "array",
            ValueKind::Record => "object",
        }
    }

    pub fn is_integer(self) -> bool { matches!(self, ValueKind::Int32 | ValueKind::Int64) }
    pub fn is_float(self) -> bool { matches!(self, ValueKind::Float32 | ValueKind::Float64) }
}

/// A type that can appear as a parameter of a declared method.
///
/// The kind drives both the advertised schema type and the scalar coercion
/// applied before the typed decode.
pub trait ParamType: DeserializeOwned + Send + 'static {
    const KIND: ValueKind;
}

macro_rules! param_kind {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(impl ParamType for $ty { const KIND: ValueKind = ValueKind::$kind; })*
    };
}

param_kind! {
    String => Text,
    i32 => Int32,
    u32 => Int32,
    i64 => Int64,
    u64 => Int64,
    f32 => Float32,
    f64 => Float64,
    bool => Boolean,
    serde_json::Value => Any,
    serde_json::Map<String, serde_json::Value> => Mapping,
}

impl<T: DeserializeOwned + Send + 'static> ParamType for HashMap<String, T> {
    const KIND: ValueKind = ValueKind::Mapping;
}

impl<T: DeserializeOwned + Send + 'static> ParamType for BTreeMap<String, T> {
    const KIND: ValueKind = ValueKind::Mapping;
}

impl<T: DeserializeOwned + Send + 'static> ParamType for Vec<T> {
    const KIND: ValueKind = ValueKind::Sequence;
}

impl<T: Send + 'static, const N: usize> ParamType for [T; N]
where
    [T; N]: DeserializeOwned,
{
    const KIND: ValueKind = ValueKind::FixedArray;
}

impl<T: ParamType> ParamType for Option<T> {
    const KIND: ValueKind = T::KIND;
}

/// Wrapper for structured parameters and results.
///
/// As a parameter, an incoming mapping is decoded into `T` by field name.
/// As a result, `T` is serialized into a structured JSON value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Json<T>(pub T);

impl<T: DeserializeOwned + Send + 'static> ParamType for Json<T> {
    const KIND: ValueKind = ValueKind::Record;
}

impl<T> Json<T> {
    pub fn into_inner(self) -> T { self.0 }
}
