use std::sync::Arc;

use crate::headers::{
    ErrorKind, Guard, GuardPolicy, GuardViolation, HeaderError, HeaderName, HeaderValue, Headers,
    HeadersInit, NameFilter, ShapeError, standard,
};
use crate::host::test::{Call, Stringify, Traced};
use crate::host::{HostError, HostValue, PropertyKey, Record, Sequence};

const fn is_send_sync<T: Send + Sync>() { }
const _: () = {
    is_send_sync::<Headers>();
    is_send_sync::<HeaderName>();
    is_send_sync::<HeaderValue>();
    is_send_sync::<GuardPolicy>();
};

fn entries(headers: &Headers) -> Vec<(String, String)> {
    headers
        .entries()
        .map(|(name, value)| (name.as_str().to_owned(), value.as_str().to_owned()))
        .collect()
}

fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
    list.iter().map(|(n, v)| (n.to_string(), v.to_string())).collect()
}

fn get(headers: &Headers, name: &str) -> Option<String> {
    headers.get(name).unwrap().map(|v| v.as_str().to_owned())
}

#[test]
fn header_name() {
    let name = HeaderName::from_slice("Content-Type").unwrap();
    assert_eq!(name, "content-type");
    assert_eq!(name, standard::CONTENT_TYPE);
    assert!(name.eq_ignore_ascii_case("CONTENT-type"));

    assert_eq!(HeaderName::from_slice("").unwrap_err(), HeaderError::Empty);
    assert_eq!(HeaderName::from_slice("x foo").unwrap_err(), HeaderError::Invalid);
    assert_eq!(HeaderName::from_slice(" x-foo").unwrap_err(), HeaderError::Invalid);
    assert_eq!(HeaderName::from_slice("x:foo").unwrap_err(), HeaderError::Invalid);
    assert_eq!(HeaderName::from_slice("héader").unwrap_err(), HeaderError::Invalid);
    assert!(HeaderName::from_slice("!#$%&'*+-.^_`|~09az").is_ok());

    assert!(HeaderName::from_bytes_lowercase("x-lower").is_ok());
    assert!(HeaderName::from_bytes_lowercase("X-Upper").is_err());
}

#[test]
fn header_value() {
    assert_eq!(HeaderValue::normalize("  text/html\t").unwrap(), "text/html");
    assert_eq!(HeaderValue::normalize("a  b").unwrap(), "a  b");
    assert_eq!(HeaderValue::normalize("\r\n").unwrap(), "");
    assert_eq!(HeaderValue::normalize("a\r\nb").unwrap_err(), HeaderError::Invalid);
    assert_eq!(HeaderValue::normalize("a\0b").unwrap_err(), HeaderError::Invalid);
    assert_eq!(HeaderValue::normalize("a\nb").unwrap_err(), HeaderError::Invalid);

    assert!(HeaderValue::from_string(String::from("plain")).is_ok());
    assert!(HeaderValue::from_string(String::from(" padded")).is_err());

    let value = HeaderValue::from_static("static");
    assert_eq!(value.as_bytes(), b"static");
}

#[test]
fn append_combines_on_read() {
    let mut headers = Headers::new();
    headers.append("X-Foo", "v1").unwrap();
    headers.append("x-foo", "v2").unwrap();

    assert_eq!(get(&headers, "x-foo").as_deref(), Some("v1, v2"));
    assert_eq!(headers.len(), 2);
    assert_eq!(
        headers.get_all("X-FOO").unwrap().map(HeaderValue::as_str).collect::<Vec<_>>(),
        ["v1", "v2"]
    );
    assert_eq!(entries(&headers), pairs(&[("x-foo", "v1, v2")]));
}

#[test]
fn case_insensitive_lookup() {
    let mut headers = Headers::new();
    headers.append("X-Foo", "1").unwrap();

    assert_eq!(get(&headers, "x-FOO").as_deref(), Some("1"));
    assert!(headers.has("X-FOO").unwrap());
    assert!(!headers.has("x-bar").unwrap());
    assert_eq!(get(&headers, "x-bar"), None);
}

#[test]
fn set_cookie_is_never_combined() {
    let mut headers = Headers::new();
    headers.append("Set-cookie", "A").unwrap();
    headers.append("set-cookie", "B").unwrap();
    headers.append("accept", "*/*").unwrap();

    assert_eq!(get(&headers, "set-cookie").as_deref(), Some("A"));
    assert_eq!(headers.get_set_cookie(), ["A", "B"]);
    assert_eq!(
        entries(&headers),
        pairs(&[("accept", "*/*"), ("set-cookie", "A"), ("set-cookie", "B")])
    );

    let keys: Vec<_> = headers.keys().collect();
    assert_eq!(keys, ["accept", "set-cookie", "set-cookie"]);
}

#[test]
fn iteration_is_sorted() {
    let mut headers = Headers::new();
    headers.append("B", "2").unwrap();
    headers.append("A", "1").unwrap();
    headers.append("c", "3").unwrap();
    headers.append("b", "4").unwrap();

    assert_eq!(
        entries(&headers),
        pairs(&[("a", "1"), ("b", "2, 4"), ("c", "3")])
    );
    assert_eq!(
        headers.values().map(|v| v.as_str().to_owned()).collect::<Vec<_>>(),
        ["1", "2, 4", "3"]
    );

    // snapshot is not a live view
    let mut iter = headers.entries();
    headers.delete("a").unwrap();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next().unwrap().0, "a");

    let mut seen = Vec::new();
    for (name, value) in &headers {
        seen.push(format!("{name}={value}"));
    }
    assert_eq!(seen, ["b=2, 4", "c=3"]);
}

#[test]
fn set_replaces_in_place() {
    let mut headers = Headers::new();
    headers.append("a", "1").unwrap();
    headers.append("b", "2").unwrap();
    headers.append("a", "3").unwrap();
    headers.append("c", "4").unwrap();

    headers.set("A", "5").unwrap();
    assert_eq!(get(&headers, "a").as_deref(), Some("5"));
    assert_eq!(headers.len(), 3);

    let raw: Vec<_> = headers.raw_entries().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(raw, ["a", "b", "c"]);

    headers.set("d", "6").unwrap();
    assert_eq!(get(&headers, "d").as_deref(), Some("6"));
    assert_eq!(headers.len(), 4);
}

#[test]
fn delete() {
    let mut headers = Headers::new();
    headers.append("a", "1").unwrap();
    headers.append("A", "2").unwrap();
    headers.append("b", "3").unwrap();

    headers.delete("a").unwrap();
    assert!(!headers.has("a").unwrap());
    assert_eq!(headers.len(), 1);

    // absent is not an error
    headers.delete("zzz").unwrap();
    assert_eq!(headers.len(), 1);
}

#[test]
fn append_if_absent() {
    let mut headers = Headers::new();
    headers.append_if_absent("content-type", "text/plain").unwrap();
    headers.append_if_absent("Content-Type", "text/html").unwrap();

    assert_eq!(get(&headers, "content-type").as_deref(), Some("text/plain"));
    assert_eq!(headers.len(), 1);
}

#[test]
fn for_each() {
    let mut headers = Headers::new();
    headers.append("b", "2").unwrap();
    headers.append("a", "1").unwrap();

    let mut seen = Vec::new();
    headers.for_each(|value, name| seen.push(format!("{name}:{value}")));
    assert_eq!(seen, ["a:1", "b:2"]);
}

#[test]
fn invalid_input() {
    let mut headers = Headers::new();

    let err = headers.append("", "v").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.operation(), "Headers.append");
    assert!(matches!(err.kind(), ErrorKind::InvalidName(HeaderError::Empty)));

    let err = headers.set("bad name", "v").unwrap_err();
    assert_eq!(err.operation(), "Headers.set");
    assert!(matches!(err.kind(), ErrorKind::InvalidName(HeaderError::Invalid)));

    let err = headers.append("x", "a\nb").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidValue(HeaderError::Invalid)));
    assert_eq!(err.to_string(), "Headers.append: invalid header value, contains invalid byte");

    assert_eq!(headers.get("b@d").unwrap_err().operation(), "Headers.get");
    assert_eq!(headers.has("b@d").unwrap_err().operation(), "Headers.has");
    assert_eq!(headers.delete("b@d").unwrap_err().operation(), "Headers.delete");
    assert!(headers.is_empty());
}

// ===== Guard =====

#[test]
fn immutable_guard() {
    let mut headers = Headers::new();
    headers.append("a", "1").unwrap();
    let policy = Arc::new(GuardPolicy::standard().clone());
    let mut headers = headers.into_guarded(Guard::Immutable, policy);

    let err = headers.delete("a").unwrap_err();
    assert!(err.is_guard_violation());
    assert!(matches!(err.kind(), ErrorKind::Guard(GuardViolation::Immutable)));
    assert_eq!(get(&headers, "a").as_deref(), Some("1"));

    assert!(headers.append("b", "2").unwrap_err().is_guard_violation());
    assert!(headers.set("a", "2").unwrap_err().is_guard_violation());
    assert!(headers.clear().unwrap_err().is_guard_violation());
    assert_eq!(get(&headers, "a").as_deref(), Some("1"));
    assert_eq!(headers.guard(), Guard::Immutable);

    // validation happens before guard check
    assert!(headers.append("", "1").unwrap_err().is_validation());
}

#[test]
fn request_guard() {
    let mut headers = Headers::with_guard(Guard::Request);
    headers.append("accept", "*/*").unwrap();
    headers.append("x-custom", "1").unwrap();

    let err = headers.append("Host", "example.com").unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::Guard(GuardViolation::Forbidden(name)) if *name == standard::HOST
    ));
    assert_eq!(err.to_string(), "Headers.append: header `host` is forbidden");
    assert!(headers.set("cookie", "a=b").is_err());
    assert!(headers.delete("set-cookie").is_err());
    assert_eq!(headers.len(), 2);
}

#[test]
fn request_no_cors_guard() {
    let mut headers = Headers::with_guard(Guard::RequestNoCors);
    headers.append("Accept", "*/*").unwrap();
    headers.append("content-type", "text/plain").unwrap();
    assert!(headers.append("x-custom", "1").is_err());
    assert_eq!(headers.len(), 2);
}

#[test]
fn injected_policy() {
    let policy = Arc::new(
        GuardPolicy::permissive()
            .with_response(NameFilter::Deny(vec![standard::SET_COOKIE]))
            .with_request(NameFilter::AllowOnly(vec![standard::ACCEPT])),
    );

    let mut response = Headers::with_policy(Guard::Response, policy.clone());
    response.append("content-type", "text/html").unwrap();
    assert!(response.append("Set-Cookie", "a=1").unwrap_err().is_guard_violation());

    let mut request = Headers::with_policy(Guard::Request, policy);
    request.append("accept", "*/*").unwrap();
    assert!(request.append("x-custom", "1").is_err());

    // default policy allows any response header
    let mut response = Headers::with_guard(Guard::Response);
    response.append("set-cookie", "a=1").unwrap();
}

#[test]
fn into_guarded_filters_entries() {
    let headers = Headers::from_pairs([
        ("accept", "*/*"),
        ("host", "example.com"),
        ("x-custom", "1"),
    ])
    .unwrap();

    let policy = Arc::new(GuardPolicy::standard().clone());
    let guarded = headers.clone().into_guarded(Guard::Request, policy);
    assert_eq!(entries(&guarded), pairs(&[("accept", "*/*"), ("x-custom", "1")]));

    let immutable = headers.into_guarded(Guard::Immutable, Arc::new(GuardPolicy::permissive()));
    assert_eq!(immutable.len(), 3);
}

#[test]
fn try_extend() {
    let mut headers = Headers::new();
    headers
        .try_extend([
            (standard::ACCEPT, HeaderValue::from_static("*/*")),
            (standard::ACCEPT, HeaderValue::from_static("text/html")),
        ])
        .unwrap();
    assert_eq!(get(&headers, "accept").as_deref(), Some("*/*, text/html"));

    let mut headers = Headers::from_pairs([("a", "1")])
        .unwrap()
        .into_guarded(Guard::Immutable, Arc::new(GuardPolicy::permissive()));
    let err = headers
        .try_extend([(standard::HOST, HeaderValue::from_static("example.com"))])
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Guard(GuardViolation::Immutable)));
    assert_eq!(entries(&headers), pairs(&[("a", "1")]));

    // one forbidden name rejects the whole batch
    let mut headers = Headers::with_guard(Guard::Request);
    let err = headers
        .try_extend([
            (standard::ACCEPT, HeaderValue::from_static("*/*")),
            (standard::HOST, HeaderValue::from_static("example.com")),
        ])
        .unwrap_err();
    assert!(err.is_guard_violation());
    assert!(headers.is_empty());
}

#[test]
fn clear() {
    let mut headers = Headers::from_pairs([("a", "1"), ("b", "2")]).unwrap();
    headers.clear().unwrap();
    assert!(headers.is_empty());

    let mut headers = Headers::with_guard(Guard::Request);
    headers.append("x-a", "1").unwrap();
    headers.clear().unwrap();
    assert!(headers.is_empty());
}

// ===== Construction =====

#[test]
fn init_from_sequence() {
    let init = HostValue::object(Sequence::pairs([
        ("single", "v1"),
        ("double", "v1"),
        ("double", "v2"),
    ]));
    let mut headers = Headers::try_from_init(init).unwrap();
    headers.append("double", "v3").unwrap();

    assert_eq!(get(&headers, "double").as_deref(), Some("v1, v2, v3"));
    assert_eq!(get(&headers, "single").as_deref(), Some("v1"));
    assert_eq!(headers.guard(), Guard::None);
}

#[test]
fn init_from_record_trace() {
    let record = Record::new()
        .with("a", "1")
        .with_hidden("hidden", "2")
        .with("B", 3);
    let (traced, log) = Traced::new(record);

    let headers = Headers::try_from_init(HostValue::object(traced)).unwrap();

    assert_eq!(entries(&headers), pairs(&[("a", "1"), ("b", "3")]));
    assert_eq!(
        *log.borrow(),
        [
            Call::IsIterable,
            Call::OwnKeys,
            Call::GetOwnProperty("a".into()),
            Call::Get("a".into()),
            Call::GetOwnProperty("hidden".into()),
            Call::GetOwnProperty("B".into()),
            Call::Get("B".into()),
        ]
    );
}

#[test]
fn init_from_traced_sequence() {
    let (traced, log) = Traced::new(Sequence::pairs([("a", "1")]));
    let headers = Headers::try_from_init(HostValue::object(traced)).unwrap();

    assert_eq!(entries(&headers), pairs(&[("a", "1")]));
    assert_eq!(*log.borrow(), [Call::IsIterable, Call::Iterate]);
}

#[test]
fn init_absent() {
    assert!(Headers::try_from_init(HeadersInit::Absent).unwrap().is_empty());
    assert!(Headers::try_from_init(HostValue::Undefined).unwrap().is_empty());

    let err = Headers::try_from_init(HostValue::Null).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Shape(ShapeError::NotObject)));
    assert_eq!(err.operation(), "Headers");

    let err = Headers::try_from_init(HostValue::from("a")).unwrap_err();
    assert!(err.is_shape());
}

#[test]
fn init_shape_errors() {
    let init = Sequence::new(vec![
        HostValue::object(Sequence::new(vec!["a".into(), "1".into()])),
        HostValue::from("ab"),
    ]);
    let err = Headers::try_from_init(HostValue::object(init)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Shape(ShapeError::NotPair { index: 1 })));

    let init = Sequence::new(vec![HostValue::object(Record::new().with("0", "a"))]);
    let err = Headers::try_from_init(HostValue::object(init)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Shape(ShapeError::NotPair { index: 0 })));

    let init = Sequence::new(vec![HostValue::object(Sequence::new(vec![
        "a".into(),
        "1".into(),
        "2".into(),
    ]))]);
    let err = Headers::try_from_init(HostValue::object(init)).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::Shape(ShapeError::PairLength { index: 0, len: 3 })
    ));
}

#[test]
fn init_symbol_key() {
    let hidden = Record::new()
        .with("a", "1")
        .with_hidden(PropertyKey::Symbol("tag".into()), "x");
    let headers = Headers::try_from_init(HostValue::object(hidden)).unwrap();
    assert_eq!(headers.len(), 1);

    let (traced, log) = Traced::new(
        Record::new()
            .with(PropertyKey::Symbol("tag".into()), "x")
            .with("a", "1"),
    );
    let err = Headers::try_from_init(HostValue::object(traced)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Shape(ShapeError::SymbolKey)));
    assert_eq!(
        *log.borrow(),
        [
            Call::IsIterable,
            Call::OwnKeys,
            Call::GetOwnProperty("Symbol(tag)".into()),
        ]
    );
}

#[test]
fn init_is_all_or_nothing() {
    let init = HostValue::object(Sequence::pairs([("a", "1"), ("b", "bad\nvalue")]));
    let err = Headers::try_from_init(init).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.operation(), "Headers");

    let init = HostValue::object(Record::new().with("ok", "1").with("b@d", "2"));
    assert!(Headers::try_from_init(init).unwrap_err().is_validation());

    assert!(Headers::from_pairs([("a", "1"), ("", "2")]).is_err());
}

#[test]
fn init_host_error() {
    let (traced, log) = Traced::new(Record::new().with("a", "1").with("b", "2"));
    let traced = traced.fail_on(Call::Get("a".into()));

    let err = Headers::try_from_init(HostValue::object(traced)).unwrap_err();
    let ErrorKind::Host(host) = err.kind() else {
        panic!("expected host error, got {err:?}");
    };
    assert_eq!(*host, HostError::new("trap Get(\"a\")"));
    assert_eq!(log.borrow().len(), 4);

    let (traced, _) = Traced::new(Record::new());
    let traced = traced.fail_on(Call::IsIterable);
    assert!(Headers::try_from_init(HostValue::object(traced)).is_err());
}

#[test]
fn init_value_conversion() {
    let record = Record::new()
        .with("n", 42)
        .with("f", 1.5)
        .with("b", true)
        .with("o", HostValue::object(Stringify("  custom  ")))
        .with("u", HostValue::Undefined);
    let headers = Headers::try_from_init(HostValue::object(record)).unwrap();

    assert_eq!(
        entries(&headers),
        pairs(&[
            ("b", "true"),
            ("f", "1.5"),
            ("n", "42"),
            ("o", "custom"),
            ("u", "undefined"),
        ])
    );
}

#[test]
fn init_from_headers() {
    let mut source = Headers::with_guard(Guard::Response);
    source.append("set-cookie", "a=1").unwrap();
    source.append("x", "1").unwrap();
    source.append("set-cookie", "b=2").unwrap();
    let source = source.into_guarded(Guard::Immutable, Arc::new(GuardPolicy::permissive()));

    let mut copy = Headers::try_from_init(&source).unwrap();
    assert_eq!(copy.guard(), Guard::None);
    assert_eq!(entries(&copy), entries(&source));
    copy.append("y", "2").unwrap();
    assert_eq!(source.len(), 3);
}

#[test]
fn round_trip() {
    let mut headers = Headers::new();
    headers.append("Set-Cookie", "a=1").unwrap();
    headers.append("accept", "text/html").unwrap();
    headers.append("set-cookie", "b=2").unwrap();
    headers.append("accept", "*/*").unwrap();

    let init = Sequence::pairs(
        headers
            .entries()
            .map(|(name, value)| (name.as_str().to_owned(), value.as_str().to_owned())),
    );
    let rebuilt = Headers::try_from_init(HostValue::object(init)).unwrap();

    assert_eq!(entries(&rebuilt), entries(&headers));
    assert_eq!(rebuilt.get_set_cookie(), ["a=1", "b=2"]);

    let collected: Headers = headers.entries().collect();
    assert_eq!(entries(&collected), entries(&headers));
}

#[test]
fn debug_output() {
    let headers = Headers::from_pairs([("b", "2"), ("a", "1")]).unwrap();
    assert_eq!(format!("{headers:?}"), r#"{"a": "1", "b": "2"}"#);
}
