mod common;

use common::builders::{MockUpstream, get, proxy};
use common::headers::header_value;
use cors_anywhere_rs::{CorsProxy, ReqwestUpstream, constants::header};
use std::sync::Arc;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn proxy_is_send_and_sync() {
    assert_send_sync::<CorsProxy<MockUpstream>>();
    assert_send_sync::<CorsProxy<ReqwestUpstream>>();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn proxy_can_be_shared_across_tasks() {
    let (proxy, upstream) = proxy()
        .var("BLACKLIST_ORIGINS", "https://blocked*")
        .upstream(MockUpstream::new().headers(&[("x-served-by", "mock")]))
        .build();
    let proxy = Arc::new(proxy);

    let mut handles = Vec::new();
    for i in 0..16 {
        let proxy = Arc::clone(&proxy);
        handles.push(tokio::spawn(async move {
            let origin = if i % 4 == 0 {
                format!("https://blocked{i}.example")
            } else {
                format!("https://task{i}.example")
            };
            let request = get(&format!("https://api.test/{i}"))
                .origin(&origin)
                .build();
            let response = proxy.handle(request).await.expect("handled");
            (origin, response)
        }));
    }

    let mut forwarded = 0;
    for handle in handles {
        let (origin, response) = handle.await.expect("task panic");
        if origin.starts_with("https://blocked") {
            assert_eq!(response.status, 403);
        } else {
            forwarded += 1;
            assert_eq!(
                header_value(&response.headers, header::ACCESS_CONTROL_ALLOW_ORIGIN),
                Some(origin.as_str())
            );
        }
    }

    assert_eq!(forwarded, 12);
    assert_eq!(upstream.calls().len(), 12);
}
