#![allow(dead_code)]

use cors_anywhere_rs::Headers;
use serde_json::{Map, Value};

pub fn header_value<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers.get(name)
}

pub fn has_header(headers: &Headers, name: &str) -> bool {
    header_value(headers, name).is_some()
}

pub fn expose_values(headers: &Headers) -> Vec<String> {
    header_value(headers, "Access-Control-Expose-Headers")
        .map(|value| {
            value
                .split(',')
                .map(|part| part.trim().to_string())
                .filter(|part| !part.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

pub fn received_headers(headers: &Headers) -> Map<String, Value> {
    let raw = header_value(headers, "cors-received-headers").expect("echo header present");
    serde_json::from_str(raw).expect("echo header holds a JSON object")
}

pub fn as_json_map(headers: &Headers) -> Map<String, Value> {
    headers
        .iter()
        .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
        .collect()
}
