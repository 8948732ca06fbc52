use bytes::Bytes;

use crate::headers::error::HeaderError;
use crate::matches;

/// HTTP Header Value.
///
/// Leading and trailing HTTP whitespace is stripped at construction time, the remaining value
/// must not contain CR, LF or NUL. Inner whitespace is kept as is.
#[derive(Clone)]
pub struct HeaderValue {
    /// is valid UTF-8
    bytes: Bytes,
}

impl HeaderValue {
    /// Parse header value from static str.
    ///
    /// # Panics
    ///
    /// Panics if the input is not a valid, already normalized, header value.
    #[inline]
    pub const fn from_static(value: &'static str) -> Self {
        match validate_header_value(value.as_bytes()) {
            Ok(()) => Self {
                bytes: Bytes::from_static(value.as_bytes()),
            },
            Err(err) => err.panic_const(),
        }
    }

    /// Normalize and parse header value by copying from string.
    ///
    /// Strips leading and trailing HTTP whitespace before validation.
    ///
    /// # Errors
    ///
    /// Returns error if the stripped value contains CR, LF or NUL.
    pub fn normalize(value: &str) -> Result<Self, HeaderError> {
        let value =
            value.trim_matches(|ch: char| ch.is_ascii() && matches::is_http_whitespace(ch as u8));
        match validate_header_value(value.as_bytes()) {
            Ok(()) => Ok(Self {
                bytes: Bytes::copy_from_slice(value.as_bytes()),
            }),
            Err(err) => Err(err),
        }
    }

    /// Create header value from an owned string without copying.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not already normalized.
    pub fn from_string(value: String) -> Result<Self, HeaderError> {
        match validate_header_value(value.as_bytes()) {
            Ok(()) => Ok(Self {
                bytes: Bytes::from(value),
            }),
            Err(err) => Err(err),
        }
    }

    /// Join values with `", "`, the header combination rule.
    pub(crate) fn join<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a HeaderValue>,
    {
        let mut values = values.into_iter();
        let Some(first) = values.next() else {
            return Self::from_static("");
        };
        let Some(second) = values.next() else {
            return first.clone();
        };

        let mut joined = String::with_capacity(first.bytes.len() + second.bytes.len() + 2);
        joined.push_str(first.as_str());
        for value in std::iter::once(second).chain(values) {
            joined.push_str(", ");
            joined.push_str(value.as_str());
        }

        // components are normalized, joining them cannot introduce edge whitespace
        Self {
            bytes: Bytes::from(joined),
        }
    }

    /// Returns header value as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns header value as `str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: `bytes` is always copied from a `str`
        unsafe { std::str::from_utf8_unchecked(&self.bytes) }
    }

    /// Returns `true` if the value is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// ===== Parsing =====

const fn validate_header_value(mut bytes: &[u8]) -> Result<(), HeaderError> {
    use HeaderError as E;
    match bytes {
        // no leading HTTP whitespace
        [first, ..] if matches::is_http_whitespace(*first) => return Err(E::Invalid),
        // no trailing HTTP whitespace
        [.., last] if matches::is_http_whitespace(*last) => return Err(E::Invalid),
        _ => {}
    }
    let mut error = false;
    while let [byte, rest @ ..] = bytes {
        error |= matches::is_forbidden_in_value(*byte);
        bytes = rest;
    }
    if !error { Ok(()) } else { Err(E::Invalid) }
}

// ===== Traits =====

impl std::fmt::Debug for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HeaderValue").field(&self.as_str()).finish()
    }
}

impl std::fmt::Display for HeaderValue {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HeaderValue {
    type Err = HeaderError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl AsRef<str> for HeaderValue {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for HeaderValue {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for HeaderValue {}

impl PartialEq<[u8]> for HeaderValue {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<String> for HeaderValue {
    #[inline]
    fn eq(&self, other: &String) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl From<HeaderValue> for Bytes {
    #[inline]
    fn from(value: HeaderValue) -> Self {
        value.bytes
    }
}
