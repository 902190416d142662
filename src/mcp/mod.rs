pub mod adapter;
pub mod registry;
pub mod runtime;
pub mod types;
