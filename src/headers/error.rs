//! Error types that can occur during header related operation.
use super::HeaderName;
use crate::host::HostError;

/// An error that can occur when parsing a single header name or value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderError {
    /// Bytes is empty.
    Empty,
    /// Bytes contains invalid character.
    Invalid,
}

impl HeaderError {
    pub(crate) const fn message(&self) -> &'static str {
        match self {
            Self::Empty => "cannot be empty",
            Self::Invalid => "contains invalid byte",
        }
    }

    pub(crate) const fn panic_const(self) -> ! {
        panic!("{}", self.message())
    }
}

impl std::error::Error for HeaderError {}
impl std::fmt::Display for HeaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

// ===== Guard =====

/// A mutation rejected by the store [`Guard`][super::Guard].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardViolation {
    /// The store does not accept any mutation.
    Immutable,
    /// The header name is not permitted by the guard policy.
    Forbidden(HeaderName),
}

impl std::fmt::Display for GuardViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Immutable => f.write_str("headers are immutable"),
            Self::Forbidden(name) => write!(f, "header `{name}` is forbidden"),
        }
    }
}

// ===== Shape =====

/// Constructor input that is neither a pair sequence nor a usable record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    /// Input is a primitive other than `undefined`.
    NotObject,
    /// Sequence element at `index` is not an iterable pair.
    NotPair { index: usize },
    /// Sequence element at `index` does not have exactly two items.
    PairLength { index: usize, len: usize },
    /// Record has an enumerable symbol keyed property.
    SymbolKey,
}

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotObject => f.write_str("init must be a sequence of pairs or a record"),
            Self::NotPair { index } => write!(f, "element {index} is not a header pair"),
            Self::PairLength { index, len } => {
                write!(f, "element {index} must contain exactly 2 items, found {len}")
            }
            Self::SymbolKey => f.write_str("record key cannot be a symbol"),
        }
    }
}

// ===== Headers Error =====

/// An error returned from [`Headers`][super::Headers] operations.
pub struct HeadersError {
    operation: &'static str,
    kind: Box<ErrorKind>,
}

#[derive(Debug)]
pub enum ErrorKind {
    InvalidName(HeaderError),
    InvalidValue(HeaderError),
    Guard(GuardViolation),
    Shape(ShapeError),
    Host(HostError),
}

impl HeadersError {
    pub(crate) fn new(operation: &'static str, kind: ErrorKind) -> Self {
        Self {
            operation,
            kind: Box::new(kind),
        }
    }

    pub(crate) fn name(operation: &'static str, err: HeaderError) -> Self {
        Self::new(operation, ErrorKind::InvalidName(err))
    }

    pub(crate) fn value(operation: &'static str, err: HeaderError) -> Self {
        Self::new(operation, ErrorKind::InvalidValue(err))
    }

    pub(crate) fn guard(operation: &'static str, violation: GuardViolation) -> Self {
        Self::new(operation, ErrorKind::Guard(violation))
    }

    pub(crate) fn shape(operation: &'static str, err: ShapeError) -> Self {
        Self::new(operation, ErrorKind::Shape(err))
    }

    pub(crate) fn host(operation: &'static str, err: HostError) -> Self {
        Self::new(operation, ErrorKind::Host(err))
    }

    /// Returns the operation that failed, e.g. `Headers.append`.
    #[inline]
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns `true` if a header name or value failed validation.
    pub fn is_validation(&self) -> bool {
        matches!(*self.kind, ErrorKind::InvalidName(_) | ErrorKind::InvalidValue(_))
    }

    /// Returns `true` if the guard rejected the mutation.
    pub fn is_guard_violation(&self) -> bool {
        matches!(*self.kind, ErrorKind::Guard(_))
    }

    /// Returns `true` if the constructor input had an unusable shape.
    pub fn is_shape(&self) -> bool {
        matches!(*self.kind, ErrorKind::Shape(_))
    }
}

impl std::error::Error for HeadersError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind.as_ref() {
            ErrorKind::InvalidName(err) | ErrorKind::InvalidValue(err) => Some(err),
            ErrorKind::Host(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for HeadersError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.operation)?;
        match self.kind.as_ref() {
            ErrorKind::InvalidName(err) => write!(f, "invalid header name, {err}"),
            ErrorKind::InvalidValue(err) => write!(f, "invalid header value, {err}"),
            ErrorKind::Guard(violation) => std::fmt::Display::fmt(violation, f),
            ErrorKind::Shape(err) => std::fmt::Display::fmt(err, f),
            ErrorKind::Host(err) => std::fmt::Display::fmt(err, f),
        }
    }
}

impl std::fmt::Debug for HeadersError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadersError")
            .field("operation", &self.operation)
            .field("kind", &self.kind)
            .finish()
    }
}
