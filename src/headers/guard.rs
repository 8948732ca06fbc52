//! Access control for header mutation.
//!
//! A [`Guard`] is assigned by whoever owns the [`Headers`][super::Headers], the store itself never
//! picks one. Which names a restricted guard accepts is configured by a [`GuardPolicy`].
use std::sync::LazyLock;

use super::error::GuardViolation;
use super::name::{HeaderName, standard::*};

/// Header store access mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Guard {
    /// No mutation is permitted, e.g. headers of an incoming request.
    Immutable,
    /// Outgoing request headers.
    Request,
    /// Outgoing request headers with `no-cors` mode.
    RequestNoCors,
    /// Outgoing response headers.
    Response,
    /// Standalone headers, every mutation is permitted.
    #[default]
    None,
}

/// Set of header names accepted by a restricted [`Guard`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NameFilter {
    /// Every name is permitted.
    #[default]
    Any,
    /// Every name except the listed ones is permitted.
    Deny(Vec<HeaderName>),
    /// Only the listed names are permitted.
    AllowOnly(Vec<HeaderName>),
}

impl NameFilter {
    /// Returns `true` if `name` is permitted.
    pub fn permits(&self, name: &HeaderName) -> bool {
        match self {
            Self::Any => true,
            Self::Deny(names) => !names.contains(name),
            Self::AllowOnly(names) => names.contains(name),
        }
    }
}

/// Name filters for every restricted [`Guard`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuardPolicy {
    request: NameFilter,
    request_no_cors: NameFilter,
    response: NameFilter,
}

static ANY: NameFilter = NameFilter::Any;

static STANDARD: LazyLock<GuardPolicy> = LazyLock::new(|| GuardPolicy {
    request: NameFilter::Deny(vec![
        ACCEPT_CHARSET,
        ACCEPT_ENCODING,
        ACCESS_CONTROL_REQUEST_HEADERS,
        ACCESS_CONTROL_REQUEST_METHOD,
        CONNECTION,
        CONTENT_LENGTH,
        COOKIE,
        COOKIE2,
        DATE,
        DNT,
        EXPECT,
        HOST,
        KEEP_ALIVE,
        ORIGIN,
        REFERER,
        SET_COOKIE,
        TE,
        TRAILER,
        TRANSFER_ENCODING,
        UPGRADE,
        VIA,
    ]),
    request_no_cors: NameFilter::AllowOnly(vec![
        ACCEPT,
        ACCEPT_LANGUAGE,
        CONTENT_LANGUAGE,
        CONTENT_TYPE,
        RANGE,
    ]),
    response: NameFilter::Any,
});

impl GuardPolicy {
    /// Policy used when the owner does not provide one.
    ///
    /// - request: deny forbidden request header names
    /// - request no-cors: allow only CORS-safelisted header names
    /// - response: allow any name
    #[inline]
    pub fn standard() -> &'static GuardPolicy {
        &STANDARD
    }

    /// Policy that permits every name for every guard except [`Guard::Immutable`].
    #[inline]
    pub fn permissive() -> GuardPolicy {
        GuardPolicy::default()
    }

    /// Replace filter used by [`Guard::Request`].
    pub fn with_request(mut self, filter: NameFilter) -> Self {
        self.request = filter;
        self
    }

    /// Replace filter used by [`Guard::RequestNoCors`].
    pub fn with_request_no_cors(mut self, filter: NameFilter) -> Self {
        self.request_no_cors = filter;
        self
    }

    /// Replace filter used by [`Guard::Response`].
    ///
    /// Owners that must not emit cookies deny [`SET_COOKIE`] here.
    pub fn with_response(mut self, filter: NameFilter) -> Self {
        self.response = filter;
        self
    }

    /// Returns the filter applied for given guard, `None` for [`Guard::Immutable`].
    pub fn filter(&self, guard: Guard) -> Option<&NameFilter> {
        match guard {
            Guard::Immutable => None,
            Guard::Request => Some(&self.request),
            Guard::RequestNoCors => Some(&self.request_no_cors),
            Guard::Response => Some(&self.response),
            Guard::None => Some(&ANY),
        }
    }

    /// Check whether a mutation of `name` is permitted under `guard`.
    pub fn check(&self, guard: Guard, name: &HeaderName) -> Result<(), GuardViolation> {
        match self.filter(guard) {
            None => Err(GuardViolation::Immutable),
            Some(filter) if filter.permits(name) => Ok(()),
            Some(_) => Err(GuardViolation::Forbidden(name.clone())),
        }
    }
}
