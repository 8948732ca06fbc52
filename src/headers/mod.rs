//! HTTP Header Multimap.
//!
//! [`Headers`] is an ordered, case-insensitive multimap of header name and value pairs.
//!
//! # Storage and Combination
//!
//! Entries are stored as a flat list in append order, values with the same name are never merged
//! at storage time. Combination happens on read: [`Headers::get`] joins every value of a name
//! with `", "`, except `set-cookie` where only the first value is returned. Iteration yields a
//! snapshot sorted by name, with every name combined into one pair except `set-cookie`, which
//! yields one pair per value.
//!
//! # Guard
//!
//! Every mutation is checked against the store [`Guard`], assigned by the owner of the store
//! together with a [`GuardPolicy`].
//!
//! ```rust
//! use fetch_headers::headers::Headers;
//!
//! let mut headers = Headers::new();
//! headers.append("Accept", "text/html").unwrap();
//! headers.append("accept", "application/json").unwrap();
//! headers.append("Set-Cookie", "a=1").unwrap();
//! headers.append("set-cookie", "b=2").unwrap();
//!
//! assert_eq!(headers.get("ACCEPT").unwrap().unwrap(), "text/html, application/json");
//! assert_eq!(headers.get("set-cookie").unwrap().unwrap(), "a=1");
//!
//! let entries: Vec<_> = headers
//!     .entries()
//!     .map(|(name, value)| format!("{name}: {value}"))
//!     .collect();
//! assert_eq!(
//!     entries,
//!     ["accept: text/html, application/json", "set-cookie: a=1", "set-cookie: b=2"],
//! );
//! ```
use std::sync::Arc;

use crate::log::{debug, warning};

mod error;
mod guard;
mod init;
mod iter;
mod name;
mod value;

pub use error::{ErrorKind, GuardViolation, HeaderError, HeadersError, ShapeError};
pub use guard::{Guard, GuardPolicy, NameFilter};
pub use init::HeadersInit;
pub use iter::{GetAll, Iter, Keys, Values};
pub use name::{HeaderName, standard};
pub use value::HeaderValue;

use standard::SET_COOKIE;

const APPEND: &str = "Headers.append";
const SET: &str = "Headers.set";
const DELETE: &str = "Headers.delete";
const GET: &str = "Headers.get";
const HAS: &str = "Headers.has";

/// HTTP Headers.
#[derive(Clone, Default)]
pub struct Headers {
    entries: Vec<(HeaderName, HeaderValue)>,
    guard: Guard,
    /// `None` means [`GuardPolicy::standard`]
    policy: Option<Arc<GuardPolicy>>,
}

impl Headers {
    /// Create new empty [`Headers`] with [`Guard::None`].
    ///
    /// This function does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            guard: Guard::None,
            policy: None,
        }
    }

    /// Create new empty [`Headers`] with given guard and the standard policy.
    #[inline]
    pub const fn with_guard(guard: Guard) -> Self {
        Self {
            entries: Vec::new(),
            guard,
            policy: None,
        }
    }

    /// Create new empty [`Headers`] with given guard and policy.
    #[inline]
    pub fn with_policy(guard: Guard, policy: Arc<GuardPolicy>) -> Self {
        Self {
            entries: Vec::new(),
            guard,
            policy: Some(policy),
        }
    }

    /// Assign a guard, as done by the owner of the headers.
    ///
    /// Stored entries that the new guard does not permit are dropped.
    pub fn into_guarded(mut self, guard: Guard, policy: Arc<GuardPolicy>) -> Self {
        if let Some(filter) = policy.filter(guard) {
            self.entries.retain(|(name, _)| filter.permits(name));
            debug!("assigned {guard:?} guard, {} entries kept", self.entries.len());
        }

        self.guard = guard;
        self.policy = Some(policy);
        self
    }

    /// Returns the store guard.
    #[inline]
    pub const fn guard(&self) -> Guard {
        self.guard
    }

    /// Returns the policy used for guard checks.
    #[inline]
    pub fn policy(&self) -> &GuardPolicy {
        match &self.policy {
            Some(policy) => policy,
            None => GuardPolicy::standard(),
        }
    }

    /// Returns the number of stored entries, each appended value counts as one.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if headers has no entry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ===== Validation =====

fn parse_name(operation: &'static str, name: &str) -> Result<HeaderName, HeadersError> {
    HeaderName::from_slice(name).map_err(|err| HeadersError::name(operation, err))
}

fn parse_value(operation: &'static str, value: &str) -> Result<HeaderValue, HeadersError> {
    HeaderValue::normalize(value).map_err(|err| HeadersError::value(operation, err))
}

impl Headers {
    fn check_guard(&self, operation: &'static str, name: &HeaderName) -> Result<(), HeadersError> {
        match self.policy().check(self.guard, name) {
            Ok(()) => Ok(()),
            Err(violation) => {
                warning!("{operation} rejected by {:?} guard: {violation}", self.guard);
                Err(HeadersError::guard(operation, violation))
            }
        }
    }
}

// ===== Lookup =====

impl Headers {
    /// Returns the combined value for given header name.
    ///
    /// All values are joined with `", "` in append order, except for `set-cookie` where only the
    /// first value is returned.
    ///
    /// # Errors
    ///
    /// Returns error if `name` is not a valid header name.
    pub fn get<N: AsRef<str>>(&self, name: N) -> Result<Option<HeaderValue>, HeadersError> {
        let name = parse_name(GET, name.as_ref())?;
        Ok(self.combined(&name))
    }

    fn combined(&self, name: &HeaderName) -> Option<HeaderValue> {
        let mut values = self.raw_values(name);
        if *name == SET_COOKIE {
            return values.next().cloned();
        }

        let first = values.next()?;
        Some(HeaderValue::join(std::iter::once(first).chain(values)))
    }

    /// Returns every `set-cookie` value in append order, never combined.
    pub fn get_set_cookie(&self) -> Vec<HeaderValue> {
        self.raw_values(&SET_COOKIE).cloned().collect()
    }

    /// Returns an iterator over every stored value of given header name, never combined.
    ///
    /// # Errors
    ///
    /// Returns error if `name` is not a valid header name.
    pub fn get_all<N: AsRef<str>>(&self, name: N) -> Result<GetAll<'_>, HeadersError> {
        let name = parse_name(GET, name.as_ref())?;
        Ok(GetAll::new(&self.entries, name))
    }

    /// Returns `true` if at least one entry has given header name.
    ///
    /// # Errors
    ///
    /// Returns error if `name` is not a valid header name.
    pub fn has<N: AsRef<str>>(&self, name: N) -> Result<bool, HeadersError> {
        let name = parse_name(HAS, name.as_ref())?;
        Ok(self.contains(&name))
    }

    fn contains(&self, name: &HeaderName) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    fn raw_values<'a>(&'a self, name: &'a HeaderName) -> impl Iterator<Item = &'a HeaderValue> {
        self.entries
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns a snapshot iterator over name and value pairs, sorted by name.
    ///
    /// Same name values are combined, except `set-cookie`.
    #[inline]
    pub fn entries(&self) -> Iter {
        Iter::new(self)
    }

    /// Alias of [`entries`][Headers::entries].
    #[inline]
    pub fn iter(&self) -> Iter {
        Iter::new(self)
    }

    /// Returns a snapshot iterator over names, in the same order as [`entries`][Headers::entries].
    #[inline]
    pub fn keys(&self) -> Keys {
        Keys::new(self)
    }

    /// Returns a snapshot iterator over values, in the same order as
    /// [`entries`][Headers::entries].
    #[inline]
    pub fn values(&self) -> Values {
        Values::new(self)
    }

    /// Calls `f` with every value and name pair, in the same order as
    /// [`entries`][Headers::entries].
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&HeaderValue, &HeaderName),
    {
        for (name, value) in self.entries() {
            f(&value, &name);
        }
    }

    /// Stored entries in append order.
    pub(crate) fn raw_entries(&self) -> &[(HeaderName, HeaderValue)] {
        &self.entries
    }
}

// ===== Mutation =====

impl Headers {
    /// Append a value to given header name.
    ///
    /// Existing values are kept, the new value is combined with them on read.
    ///
    /// # Errors
    ///
    /// Returns error if `name` or `value` is invalid, or the guard rejects the mutation.
    pub fn append<N, V>(&mut self, name: N, value: V) -> Result<(), HeadersError>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let name = parse_name(APPEND, name.as_ref())?;
        let value = parse_value(APPEND, value.as_ref())?;
        self.try_append(APPEND, name, value)
    }

    pub(crate) fn try_append(
        &mut self,
        operation: &'static str,
        name: HeaderName,
        value: HeaderValue,
    ) -> Result<(), HeadersError> {
        self.check_guard(operation, &name)?;
        self.entries.push((name, value));
        Ok(())
    }

    /// Append every pair, as repeated [`append`][Headers::append] calls.
    ///
    /// # Errors
    ///
    /// Returns error if the guard rejects any of the names, in which case nothing is appended.
    pub fn try_extend<I>(&mut self, pairs: I) -> Result<(), HeadersError>
    where
        I: IntoIterator<Item = (HeaderName, HeaderValue)>,
    {
        let pairs: Vec<_> = pairs.into_iter().collect();
        for (name, _) in &pairs {
            self.check_guard(APPEND, name)?;
        }
        self.entries.extend(pairs);
        Ok(())
    }

    /// Append a value only if given header name is not present yet.
    ///
    /// # Errors
    ///
    /// Returns error if `name` or `value` is invalid, or the guard rejects the mutation.
    pub fn append_if_absent<N, V>(&mut self, name: N, value: V) -> Result<(), HeadersError>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let name = parse_name(APPEND, name.as_ref())?;
        let value = parse_value(APPEND, value.as_ref())?;
        self.check_guard(APPEND, &name)?;
        if !self.contains(&name) {
            self.entries.push((name, value));
        }
        Ok(())
    }

    /// Replace every value of given header name with a single value.
    ///
    /// The new entry takes the position of the first replaced entry, or is appended if the name
    /// was absent.
    ///
    /// # Errors
    ///
    /// Returns error if `name` or `value` is invalid, or the guard rejects the mutation.
    pub fn set<N, V>(&mut self, name: N, value: V) -> Result<(), HeadersError>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let name = parse_name(SET, name.as_ref())?;
        let value = parse_value(SET, value.as_ref())?;
        self.check_guard(SET, &name)?;

        match self.entries.iter().position(|(n, _)| *n == name) {
            Some(first) => {
                self.entries[first].1 = value;
                let mut index = 0;
                self.entries.retain(|(n, _)| {
                    let keep = index <= first || *n != name;
                    index += 1;
                    keep
                });
            }
            None => self.entries.push((name, value)),
        }

        Ok(())
    }

    /// Remove every value of given header name.
    ///
    /// Removing an absent name is not an error.
    ///
    /// # Errors
    ///
    /// Returns error if `name` is invalid, or the guard rejects the mutation.
    pub fn delete<N: AsRef<str>>(&mut self, name: N) -> Result<(), HeadersError> {
        let name = parse_name(DELETE, name.as_ref())?;
        self.check_guard(DELETE, &name)?;
        self.entries.retain(|(n, _)| *n != name);
        Ok(())
    }

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// Returns error if the guard rejects removal of any stored name, in which case nothing is
    /// removed.
    pub fn clear(&mut self) -> Result<(), HeadersError> {
        for (name, _) in &self.entries {
            self.check_guard(DELETE, name)?;
        }
        if self.guard == Guard::Immutable {
            return Err(HeadersError::guard(DELETE, GuardViolation::Immutable));
        }
        self.entries.clear();
        Ok(())
    }
}

// ===== Traits =====

impl std::fmt::Debug for Headers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in self.entries() {
            map.entry(&name.as_str(), &value.as_str());
        }
        map.finish()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (HeaderName, HeaderValue);

    type IntoIter = Iter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

/// Collect pairs into headers with [`Guard::None`], duplicate names are appended.
impl FromIterator<(HeaderName, HeaderValue)> for Headers {
    fn from_iter<T: IntoIterator<Item = (HeaderName, HeaderValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            guard: Guard::None,
            policy: None,
        }
    }
}


#[cfg(test)]
mod test;
