use percent_encoding::percent_decode_str;
use std::str::Utf8Error;

/// Returns the target named by the request URL: everything after the first `?`,
/// percent-decoded twice. `None` when the query is missing or empty.
pub fn extract_target(url: &str) -> Result<Option<String>, Utf8Error> {
    let Some((_, query)) = url.split_once('?') else {
        return Ok(None);
    };
    if query.is_empty() {
        return Ok(None);
    }

    let once = percent_decode_str(query).decode_utf8()?;
    let twice = percent_decode_str(&once).decode_utf8()?;
    Ok(Some(twice.into_owned()))
}

/// Scheme and authority the service is reachable under, for the usage hint.
pub fn service_origin(url: &str, host: Option<&str>) -> Option<String> {
    if let Some((scheme, rest)) = url.split_once("://")
        && is_scheme(scheme)
    {
        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let authority = &rest[..authority_end];
        if !authority.is_empty() {
            return Some(format!("{scheme}://{authority}"));
        }
    }
    host.filter(|host| !host.is_empty())
        .map(|host| format!("http://{host}"))
}

fn is_scheme(value: &str) -> bool {
    value.starts_with(|ch: char| ch.is_ascii_alphabetic())
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'))
}

#[cfg(test)]
#[path = "target_test.rs"]
mod target_test;
