//! Fetch Headers
//!
//! An ordered, case-insensitive multimap of HTTP header name and value pairs, with guarded
//! mutation, read-time value combination, and construction from host objects.
#![warn(missing_debug_implementations)]

mod log;
mod matches;

pub mod host;
pub mod headers;

pub use headers::{
    Guard, GuardPolicy, HeaderName, HeaderValue, Headers, HeadersError, HeadersInit, NameFilter,
};
