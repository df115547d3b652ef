use cors_anywhere_rs::{Headers, ProxyResponse};

pub fn assert_header_eq(headers: &Headers, name: &str, expected: &str) {
    assert_eq!(
        headers.get(name),
        Some(expected),
        "unexpected value for header {name}"
    );
}

pub fn assert_forbidden(response: &ProxyResponse) {
    assert_eq!(response.status, 403, "expected a rejection");
    assert_eq!(response.status_text, "Forbidden");
    assert_header_eq(&response.headers, "Content-Type", "text/html");
}

pub fn assert_preflight(response: &ProxyResponse) {
    assert_eq!(response.status, 200, "preflight should answer 200");
    assert_eq!(response.status_text, "OK");
    assert!(response.body.is_none(), "preflight must not carry a body");
}

pub fn body_text(response: &ProxyResponse) -> String {
    let body = response.body.as_ref().expect("response should have a body");
    String::from_utf8(body.to_vec()).expect("body should be utf-8")
}
