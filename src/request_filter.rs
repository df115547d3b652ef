use crate::headers::{Headers, contains_ignore_case, starts_with_ignore_case};
use serde_json::{Map, Value};

/// Name prefixes never forwarded upstream.
const EXCLUDED_PREFIXES: [&str; 4] = ["origin", "cf-", "x-forw", "x-cors-headers"];
/// Catches both `referer` and `Referer`.
const EXCLUDED_FRAGMENT: &str = "eferer";

pub type CustomHeaders = Map<String, Value>;

/// Parses the `x-cors-headers` side channel. Anything that is not a JSON object
/// counts as absent.
pub fn parse_custom_headers(raw: Option<&str>) -> Option<CustomHeaders> {
    match serde_json::from_str::<Value>(raw?) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) | Err(_) => None,
    }
}

pub fn is_excluded(name: &str) -> bool {
    EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| starts_with_ignore_case(name, prefix))
        || contains_ignore_case(name, EXCLUDED_FRAGMENT)
}

/// Copies the forwardable incoming headers, then lays the custom headers over them.
pub fn build_outbound_headers(incoming: &Headers, custom: Option<&CustomHeaders>) -> Headers {
    let mut outbound = Headers::with_capacity(incoming.len());
    for (name, value) in incoming.iter() {
        if !is_excluded(name) {
            outbound.insert(name, value);
        }
    }

    if let Some(custom) = custom {
        for (name, value) in custom {
            outbound.insert(name.as_str(), json_header_value(value));
        }
    }
    outbound
}

fn json_header_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "request_filter_test.rs"]
mod request_filter_test;
