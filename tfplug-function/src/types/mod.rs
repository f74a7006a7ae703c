//! Core type system for tfplug-function
//!
//! This module provides the abstract data kinds ([`Type`]), typed values
//! ([`Value`]), the raw payload exchanged with the host ([`Dynamic`]), the
//! custom type extension point, and the conversion traits used to move
//! values in and out of Rust targets.

pub mod attr_type;
pub mod convert;
pub mod custom;
pub mod dynamic;
pub mod value;

pub use attr_type::Type;
pub use convert::{FromValue, ToValue};
pub use custom::{CustomType, CustomTypeRef};
pub use dynamic::Dynamic;
pub use value::Value;
