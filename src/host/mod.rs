//! Host object model capability.
//!
//! Constructing [`Headers`][crate::headers::Headers] from an arbitrary object is defined as a
//! sequence of calls against the host's object model: an iterability probe, own key
//! enumeration, property descriptor lookup and property read. The host implements
//! [`HostObject`], this crate only performs the calls, in a fixed order, so that an instrumented
//! object observes exactly the same trace a native implementation would produce.
//!
//! [`Sequence`] and [`Record`] are ordinary in-memory objects for callers that do not have a
//! host engine behind them.
use std::rc::Rc;

mod value;
mod plain;

pub use plain::{Record, Sequence};

/// Object exposed by the host runtime.
pub trait HostObject {
    /// Probes the iteration protocol capability.
    fn is_iterable(&self) -> Result<bool, HostError>;

    /// Runs the iteration protocol to completion, returning every produced item in order.
    ///
    /// Only called after [`is_iterable`][HostObject::is_iterable] returned `true`.
    fn iterate(&self) -> Result<Vec<HostValue>, HostError>;

    /// Returns every own property key, enumerable or not.
    fn own_keys(&self) -> Result<Vec<PropertyKey>, HostError>;

    /// Returns own property descriptor of `key`, `None` if the property does not exist.
    fn get_own_property(&self, key: &PropertyKey) -> Result<Option<PropertyDescriptor>, HostError>;

    /// Reads property value through the regular get path.
    fn get(&self, key: &PropertyKey) -> Result<HostValue, HostError>;

    /// String conversion of the object itself.
    fn to_host_string(&self) -> Result<String, HostError> {
        Ok(String::from("[object Object]"))
    }
}

/// Value exposed by the host runtime.
#[derive(Clone)]
pub enum HostValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Object(Rc<dyn HostObject>),
}

impl HostValue {
    /// Wrap an object.
    #[inline]
    pub fn object<O: HostObject + 'static>(object: O) -> Self {
        Self::Object(Rc::new(object))
    }

    /// Returns the type name as reported by `typeof`, except `null`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Object(_) => "object",
        }
    }
}

impl std::fmt::Debug for HostValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => std::fmt::Debug::fmt(b, f),
            Self::Number(n) => std::fmt::Debug::fmt(n, f),
            Self::String(s) => std::fmt::Debug::fmt(s, f),
            Self::Object(_) => f.write_str("[object]"),
        }
    }
}

impl From<&str> for HostValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for HostValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for HostValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for HostValue {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for HostValue {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

/// Own property key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(String),
    /// Symbol with its description.
    Symbol(String),
}

impl From<&str> for PropertyKey {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for PropertyKey {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl std::fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Symbol(desc) => write!(f, "Symbol({desc})"),
        }
    }
}

/// Own property descriptor.
///
/// Only the attribute needed for record conversion is carried, the value is always read with
/// [`HostObject::get`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub enumerable: bool,
}

impl PropertyDescriptor {
    #[inline]
    pub const fn enumerable() -> Self {
        Self { enumerable: true }
    }

    #[inline]
    pub const fn hidden() -> Self {
        Self { enumerable: false }
    }
}

/// An error raised by the host, e.g. a throwing proxy trap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostError {
    message: Box<str>,
}

impl HostError {
    pub fn new<S: Into<Box<str>>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::error::Error for HostError {}

impl std::fmt::Display for HostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
