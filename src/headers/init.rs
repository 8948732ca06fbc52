//! Headers construction.
//!
//! A host value is converted into a list of raw string pairs first, then every pair goes through
//! the regular append rule. Nothing is committed until every pair is valid.
//!
//! Selecting between a pair sequence and a record follows a fixed call order against the
//! [`HostObject`]:
//!
//! 1. [`is_iterable`][HostObject::is_iterable], exactly once, before any other access
//! 2. sequence: [`iterate`][HostObject::iterate], then each element is iterated as a pair
//! 3. record: [`own_keys`][HostObject::own_keys] once, then for each key in order,
//!    [`get_own_property`][HostObject::get_own_property] followed by [`get`][HostObject::get]
//!    only if the property is enumerable
use crate::host::{HostError, HostObject, HostValue, PropertyKey};
use crate::log::{debug, trace};

use super::{Guard, HeaderName, HeaderValue, Headers, HeadersError, ShapeError};

const CONSTRUCT: &str = "Headers";

/// Headers constructor input.
#[derive(Clone, Debug, Default)]
pub enum HeadersInit<'a> {
    /// No input, results in empty headers.
    #[default]
    Absent,
    /// Copy entries of another headers.
    Headers(&'a Headers),
    /// Pair sequence or record provided by the host.
    Value(HostValue),
}

impl<'a> From<&'a Headers> for HeadersInit<'a> {
    #[inline]
    fn from(value: &'a Headers) -> Self {
        Self::Headers(value)
    }
}

impl From<HostValue> for HeadersInit<'_> {
    #[inline]
    fn from(value: HostValue) -> Self {
        Self::Value(value)
    }
}

impl Headers {
    /// Construct headers with [`Guard::None`] from given input.
    ///
    /// # Errors
    ///
    /// Returns error if the input is neither a pair sequence nor a record, if any name or value
    /// is invalid, or if the host raised an error during conversion. No headers is created on
    /// error.
    pub fn try_from_init<'a, I: Into<HeadersInit<'a>>>(init: I) -> Result<Self, HeadersError> {
        let mut headers = Headers::new();

        match init.into() {
            HeadersInit::Absent => {}
            HeadersInit::Headers(source) => {
                debug!("init from headers, {} entries", source.len());
                headers.entries = source.raw_entries().to_vec();
            }
            HeadersInit::Value(value) => {
                let pairs = collect_pairs(value)?;
                debug!("init with {} pairs", pairs.len());
                headers.append_pairs(pairs)?;
            }
        }

        Ok(headers)
    }

    /// Construct headers with [`Guard::None`] from string pairs.
    ///
    /// # Errors
    ///
    /// Returns error if any name or value is invalid. No headers is created on error.
    pub fn from_pairs<I, N, V>(pairs: I) -> Result<Self, HeadersError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut headers = Headers::new();
        headers.append_pairs(pairs)?;
        Ok(headers)
    }

    fn append_pairs<I, N, V>(&mut self, pairs: I) -> Result<(), HeadersError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        debug_assert_eq!(self.guard, Guard::None);

        for (name, value) in pairs {
            let name = HeaderName::from_slice(name.as_ref())
                .map_err(|err| HeadersError::name(CONSTRUCT, err))?;
            let value = HeaderValue::normalize(value.as_ref())
                .map_err(|err| HeadersError::value(CONSTRUCT, err))?;
            self.try_append(CONSTRUCT, name, value)?;
        }

        Ok(())
    }
}

// ===== Host Conversion =====

fn host_error(err: HostError) -> HeadersError {
    HeadersError::host(CONSTRUCT, err)
}

fn shape_error(err: ShapeError) -> HeadersError {
    HeadersError::shape(CONSTRUCT, err)
}

/// Convert a host value into raw string pairs.
fn collect_pairs(value: HostValue) -> Result<Vec<(String, String)>, HeadersError> {
    let object = match &value {
        HostValue::Undefined => return Ok(Vec::new()),
        HostValue::Object(object) => object,
        _ => {
            debug!("init rejected, {} is not an object", value.type_name());
            return Err(shape_error(ShapeError::NotObject));
        }
    };

    if object.is_iterable().map_err(host_error)? {
        debug!("init from sequence");
        collect_sequence(&**object)
    } else {
        debug!("init from record");
        collect_record(&**object)
    }
}

fn collect_sequence(object: &dyn HostObject) -> Result<Vec<(String, String)>, HeadersError> {
    let items = object.iterate().map_err(host_error)?;
    let mut pairs = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let HostValue::Object(pair) = item else {
            return Err(shape_error(ShapeError::NotPair { index }));
        };
        if !pair.is_iterable().map_err(host_error)? {
            return Err(shape_error(ShapeError::NotPair { index }));
        }

        let pair = pair.iterate().map_err(host_error)?;
        let [name, value] = pair.as_slice() else {
            return Err(shape_error(ShapeError::PairLength { index, len: pair.len() }));
        };

        pairs.push((
            name.to_host_string().map_err(host_error)?,
            value.to_host_string().map_err(host_error)?,
        ));
    }

    Ok(pairs)
}

fn collect_record(object: &dyn HostObject) -> Result<Vec<(String, String)>, HeadersError> {
    let keys = object.own_keys().map_err(host_error)?;
    let mut pairs = Vec::with_capacity(keys.len());

    for key in keys {
        let Some(descriptor) = object.get_own_property(&key).map_err(host_error)? else {
            trace!("record key `{key}` vanished, skipped");
            continue;
        };
        if !descriptor.enumerable {
            trace!("record key `{key}` is not enumerable, skipped");
            continue;
        }

        let PropertyKey::String(name) = &key else {
            return Err(shape_error(ShapeError::SymbolKey));
        };
        let value = object.get(&key).map_err(host_error)?;

        pairs.push((name.clone(), value.to_host_string().map_err(host_error)?));
    }

    Ok(pairs)
}
