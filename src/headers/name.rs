use bytes::Bytes;

use crate::headers::error::HeaderError;
use crate::matches;

/// HTTP Header name.
///
/// # Case Normalization
///
/// Input is normalized to lowercase at construction time, this normalized form is the key used
/// for lookup and combination. [`from_static`][HeaderName::from_static] will panic at compile
/// time when name contains uppercase character.
//
// predefined headers are stored as static str and skip validation,
// arbitrary headers must pass validation and are copied into `Bytes`
#[derive(Clone)]
pub struct HeaderName {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Static(&'static str),
    /// is valid lowercase ASCII
    Arbitrary(Bytes),
}

impl HeaderName {
    /// Parse header name from static str.
    ///
    /// The input must not contains ASCII uppercase characters.
    ///
    /// # Panics
    ///
    /// Panics if the input is not a valid header name or contains ASCII uppercase characters.
    #[inline]
    pub const fn from_static(name: &'static str) -> Self {
        match validate_header_name_lowercase(name.as_bytes()) {
            Ok(()) => Self {
                repr: Repr::Static(name),
            },
            Err(err) => err.panic_const(),
        }
    }

    /// Parse header name from [`Bytes`].
    ///
    /// The input must not contains ASCII uppercase characters, this does not incur copy.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not a valid header name or contains ASCII uppercase
    /// characters.
    #[inline]
    pub fn from_bytes_lowercase<B: Into<Bytes>>(name: B) -> Result<Self, HeaderError> {
        let name = name.into();
        match validate_header_name_lowercase(&name) {
            Ok(()) => Ok(Self {
                repr: Repr::Arbitrary(name),
            }),
            Err(err) => Err(err),
        }
    }

    /// Parse header name by copying from slice of bytes.
    ///
    /// Input name is normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns error if the input is not a valid header name.
    #[inline]
    pub fn from_slice<A: AsRef<[u8]>>(name: A) -> Result<Self, HeaderError> {
        let bytes = name.as_ref();
        if bytes.is_empty() {
            return Err(HeaderError::Empty);
        }
        copy_to_header_name(bytes)
    }

    /// Extracts a string slice of the header name.
    ///
    /// The returned string will always in ASCII lowercase.
    #[inline]
    pub fn as_str(&self) -> &str {
        match &self.repr {
            Repr::Static(s) => s,
            // SAFETY: `Arbitrary` only holds validated token bytes, which are ASCII
            Repr::Arbitrary(bytes) => unsafe { std::str::from_utf8_unchecked(bytes) },
        }
    }

    /// Checks that two header name are an ASCII case-insensitive match.
    #[inline]
    pub fn eq_ignore_ascii_case(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

// ===== Parser =====

/// token       = 1*tchar
/// field-name  = token
const fn validate_header_name_lowercase(mut bytes: &[u8]) -> Result<(), HeaderError> {
    use HeaderError as E;

    if bytes.is_empty() {
        return Err(E::Empty);
    }

    while let [byte, rest @ ..] = bytes {
        if matches::is_token_lowercase(*byte) {
            bytes = rest;
        } else {
            return Err(E::Invalid);
        }
    }

    Ok(())
}

fn copy_to_header_name(bytes: &[u8]) -> Result<HeaderName, HeaderError> {
    let mut name = vec![0; bytes.len()];

    for (output, input) in name.iter_mut().zip(bytes) {
        *output = matches::HEADER_NAME[*input as usize];

        // Any invalid character will have it MSB set
        if *output & 128 == 128 {
            return Err(HeaderError::Invalid);
        }
    }

    Ok(HeaderName {
        repr: Repr::Arbitrary(name.into()),
    })
}

// ===== Traits =====

impl std::fmt::Display for HeaderName {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Debug for HeaderName {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HeaderName").field(&self.as_str()).finish()
    }
}

impl std::str::FromStr for HeaderName {
    type Err = HeaderError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s)
    }
}

impl AsRef<str> for HeaderName {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::hash::Hash for HeaderName {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::hash::Hash::hash(self.as_str(), state);
    }
}

impl PartialEq for HeaderName {
    fn eq(&self, other: &Self) -> bool {
        // HeaderName is guaranteed to have ascii lowercase value,
        // therefore it is correct for case-insensitive eq
        self.as_str() == other.as_str()
    }
}

impl Eq for HeaderName {}

impl PartialEq<str> for HeaderName {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for HeaderName {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialOrd for HeaderName {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeaderName {
    /// Lowercase ASCII byte order, which is also UTF-16 code unit order.
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

// ===== Standard Headers =====

// https://fetch.spec.whatwg.org/#forbidden-request-header
// https://fetch.spec.whatwg.org/#cors-safelisted-request-header

standard_header! {
    /// HTTP Standard Headers
    mod standard;

    // ===== Cookies =====

    /// Send cookies from the server to the user-agent.
    ///
    /// This is the only header name that is never combined into a single value.
    pub const SET_COOKIE: HeaderName = "set-cookie";

    /// Contains stored HTTP cookies previously sent by the server with `set-cookie`.
    pub const COOKIE: HeaderName = "cookie";

    /// Obsolete variant of `cookie`.
    pub const COOKIE2: HeaderName = "cookie2";

    // ===== Content Negotiation =====

    /// Informs the server about the types of data that can be sent back.
    pub const ACCEPT: HeaderName = "accept";

    /// Which character encodings the client understands.
    pub const ACCEPT_CHARSET: HeaderName = "accept-charset";

    /// The encoding algorithm, usually a compression algorithm, that can be used on the resource
    /// sent back.
    pub const ACCEPT_ENCODING: HeaderName = "accept-encoding";

    /// Informs the server about the human language the server is expected to send back.
    pub const ACCEPT_LANGUAGE: HeaderName = "accept-language";

    // ===== Message Body =====

    /// The size of the resource, in decimal number of bytes.
    pub const CONTENT_LENGTH: HeaderName = "content-length";

    /// Indicates the media type of the resource.
    pub const CONTENT_TYPE: HeaderName = "content-type";

    /// Describes the human language(s) intended for the audience.
    pub const CONTENT_LANGUAGE: HeaderName = "content-language";

    /// Specifies the form of encoding used to safely transfer the resource to the user.
    pub const TRANSFER_ENCODING: HeaderName = "transfer-encoding";

    // ===== CORS =====

    /// Used when issuing a preflight request to let the server know which HTTP headers will be
    /// used when the actual request is made.
    pub const ACCESS_CONTROL_REQUEST_HEADERS: HeaderName = "access-control-request-headers";

    /// Used when issuing a preflight request to let the server know which HTTP method will be
    /// used when the actual request is made.
    pub const ACCESS_CONTROL_REQUEST_METHOD: HeaderName = "access-control-request-method";

    /// Indicates where a fetch originates from.
    pub const ORIGIN: HeaderName = "origin";

    // ===== Connection Management =====

    /// Controls whether the network connection stays open after the current transaction finishes.
    pub const CONNECTION: HeaderName = "connection";

    /// Controls how long a persistent connection should stay open.
    pub const KEEP_ALIVE: HeaderName = "keep-alive";

    /// Specifies the domain name of the server and (optionally) the TCP port number.
    pub const HOST: HeaderName = "host";

    /// Mechanism to upgrade an already established connection to a different protocol.
    pub const UPGRADE: HeaderName = "upgrade";

    // ===== Other =====

    /// Contains the date and time at which the message was originated.
    pub const DATE: HeaderName = "date";

    /// Expresses the user's tracking preference.
    pub const DNT: HeaderName = "dnt";

    /// Indicates expectations that need to be fulfilled by the server to properly handle the
    /// request.
    pub const EXPECT: HeaderName = "expect";

    /// Indicates the part of a document that the server should return.
    pub const RANGE: HeaderName = "range";

    /// The address of the previous web page from which a link to the currently requested page
    /// was followed.
    pub const REFERER: HeaderName = "referer";

    /// Specifies the transfer encodings the user agent is willing to accept.
    pub const TE: HeaderName = "te";

    /// Allows the sender to include additional fields at the end of chunked message.
    pub const TRAILER: HeaderName = "trailer";

    /// Added by proxies, both forward and reverse proxies.
    pub const VIA: HeaderName = "via";
}

macro_rules! standard_header {
    (@CORE
        $(
            $(#[$doc:meta])*
            $vis:vis const $id:ident: $t:ty = $name:literal;
        )*
    ) => {
        $(
            $(#[$doc])*
            $vis const $id: $t = HeaderName::from_static($name);
        )*
    };

    (
        $(#[$mod_doc:meta])*
        mod $mod_name:ident;

        $($tt:tt)*
    ) => {
        $(#[$mod_doc])*
        pub mod $mod_name {
            use super::*;
            standard_header!(@CORE $($tt)*);
        }

    };
}

use standard_header;
