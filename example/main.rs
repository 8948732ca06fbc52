use std::sync::Arc;

use fetch_headers::{
    Guard, GuardPolicy, Headers, HeadersError, NameFilter,
    headers::standard,
    host::{HostValue, Record, Sequence},
};

fn main() -> Result<(), HeadersError> {
    env_logger::init();

    let mut headers = Headers::new();
    headers.append("Set-cookie", "A")?;
    headers.append("set-cookie", "B")?;

    for (name, value) in &headers {
        println!("{name}: {value}");
    }
    println!("FINE");

    let init = Sequence::pairs([("single", "v1"), ("double", "v1"), ("double", "v2")]);
    let mut headers = Headers::try_from_init(HostValue::object(init))?;
    headers.append("double", "v3")?;
    println!("{headers:?}");

    let init = Record::new()
        .with("Content-Type", "text/html")
        .with_hidden("secret", "skipped")
        .with("X-Count", 3);
    let headers = Headers::try_from_init(HostValue::object(init))?;
    println!("{headers:?}");

    let policy = GuardPolicy::permissive()
        .with_response(NameFilter::Deny(vec![standard::SET_COOKIE]));
    let mut response = headers.into_guarded(Guard::Response, Arc::new(policy));
    if let Err(err) = response.append("set-cookie", "id=1") {
        log::warn!("{err}");
    }
    println!("{response:?}");

    Ok(())
}
