// devex-rs: Developer Experience Tools - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{
    ApiClient, ClientOptions, PageResponse, RetryPolicy, link_next_page, paginate,
    parse_next_page, x_next_page,
};
use crate::error::NetworkError;

fn page_headers(next: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(next) = next {
        headers.insert("X-Next-Page", HeaderValue::from_str(next).expect("header"));
    }
    headers
}

fn ok_page(items: Vec<u32>, next: Option<&str>) -> Result<PageResponse<u32>, NetworkError> {
    Ok(PageResponse::new(StatusCode::OK, page_headers(next), Some(items)))
}

fn fast_options() -> ClientOptions {
    ClientOptions::builder()
        .timeout(Duration::from_secs(5))
        .retry(
            RetryPolicy::builder()
                .attempts(3)
                .delay(Duration::from_millis(1))
                .multiplier(1)
                .build(),
        )
        .build()
}

// =============================================================================
// next-page parsing
// =============================================================================

#[test]
fn test_parse_next_page_terminators() {
    assert_eq!(parse_next_page(None), None);
    assert_eq!(parse_next_page(Some("")), None);
    assert_eq!(parse_next_page(Some("   ")), None);
    assert_eq!(parse_next_page(Some("abc")), None);
    assert_eq!(parse_next_page(Some("0")), None);
    assert_eq!(parse_next_page(Some("1")), None);
    assert_eq!(parse_next_page(Some("-3")), None);
    assert_eq!(parse_next_page(Some("2")), Some(2));
    assert_eq!(parse_next_page(Some(" 7 ")), Some(7));
}

#[test]
fn test_x_next_page_header() {
    assert_eq!(x_next_page(&page_headers(Some("3"))).as_deref(), Some("3"));
    assert_eq!(x_next_page(&HeaderMap::new()), None);
}

#[test]
fn test_link_next_page_header() {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::LINK,
        HeaderValue::from_static(
            "<https://api.github.com/organizations/1/repos?page=1>; rel=\"prev\", \
             <https://api.github.com/organizations/1/repos?per_page=30&page=3>; rel=\"next\", \
             <https://api.github.com/organizations/1/repos?page=9>; rel=\"last\"",
        ),
    );
    assert_eq!(link_next_page(&headers).as_deref(), Some("3"));

    let mut last_page = HeaderMap::new();
    last_page.insert(
        reqwest::header::LINK,
        HeaderValue::from_static("<https://api.github.com/organizations/1/repos?page=1>; rel=\"first\""),
    );
    assert_eq!(link_next_page(&last_page), None);
    assert_eq!(link_next_page(&HeaderMap::new()), None);
}

// =============================================================================
// paginate
// =============================================================================

#[tokio::test]
async fn test_paginate_yields_pages_in_order() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let items: Vec<u32> = paginate(
        move |page| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move {
                match page {
                    1 => ok_page(vec![1, 2], Some("2")),
                    2 => ok_page(vec![3, 4], Some("3")),
                    3 => ok_page(vec![5], Some("")),
                    _ => panic!("page {page} should never be requested"),
                }
            }
        },
        x_next_page,
    )
    .collect()
    .await;

    assert_eq!(items, vec![1, 2, 3, 4, 5]);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_paginate_is_lazy() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let first: Vec<u32> = paginate(
        move |page| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { ok_page(vec![page * 10, page * 10 + 1], Some(&(page + 1).to_string())) }
        },
        x_next_page,
    )
    .take(2)
    .collect()
    .await;

    assert_eq!(first, vec![10, 11]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_paginate_stops_on_non_advancing_page() {
    let items: Vec<u32> = paginate(
        |page| async move {
            match page {
                1 => ok_page(vec![1], Some("2")),
                2 => ok_page(vec![2], Some("2")),
                _ => panic!("page {page} should never be requested"),
            }
        },
        x_next_page,
    )
    .collect()
    .await;

    assert_eq!(items, vec![1, 2]);
}

#[tokio::test]
async fn test_paginate_empty_body_follows_next_page() {
    let items: Vec<u32> = paginate(
        |page| async move {
            match page {
                1 => Ok(PageResponse::new(StatusCode::OK, page_headers(Some("2")), None)),
                2 => ok_page(vec![7], None),
                _ => panic!("page {page} should never be requested"),
            }
        },
        x_next_page,
    )
    .collect()
    .await;

    assert_eq!(items, vec![7]);
}

#[tokio::test]
async fn test_paginate_transport_error_keeps_emitted_items() {
    let items: Vec<u32> = paginate(
        |page| async move {
            match page {
                1 => ok_page(vec![1, 2], Some("2")),
                _ => Err(NetworkError::InvalidUrl("unreachable".to_string())),
            }
        },
        x_next_page,
    )
    .collect()
    .await;

    assert_eq!(items, vec![1, 2]);
}

#[tokio::test]
async fn test_paginate_error_status_is_empty_last_page() {
    let items: Vec<u32> = paginate(
        |_page| async move {
            Ok(PageResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                page_headers(Some("2")),
                Some(vec![1]),
            ))
        },
        x_next_page,
    )
    .collect()
    .await;

    assert!(items.is_empty());
}

// =============================================================================
// ApiClient
// =============================================================================

#[test]
fn test_retry_policy_delays() {
    let policy = RetryPolicy::builder()
        .attempts(4)
        .delay(Duration::from_millis(100))
        .multiplier(2)
        .build();
    assert_eq!(policy.delay_before(1), Duration::from_millis(100));
    assert_eq!(policy.delay_before(2), Duration::from_millis(200));
    assert_eq!(policy.delay_before(3), Duration::from_millis(400));
    assert_eq!(RetryPolicy::none().attempts(), 1);
}

#[test]
fn test_endpoint_joins_path_and_query() {
    let client = ApiClient::new("https://gitlab.example.com/api/v4/", ClientOptions::default())
        .expect("client");
    let url = client
        .endpoint("/groups", &[("search", "a b"), ("page", "2")])
        .expect("url");
    assert_eq!(
        url.as_str(),
        "https://gitlab.example.com/api/v4/groups?search=a+b&page=2"
    );
}

#[test]
fn test_invalid_base_url() {
    let err = ApiClient::new("not a url", ClientOptions::default()).expect_err("invalid");
    assert!(matches!(err, NetworkError::InvalidUrl(_)));
}

#[tokio::test]
async fn test_get_json_sends_header_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v4/numbers"))
        .and(query_param("page", "1"))
        .and(header("PRIVATE-TOKEN", "secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Next-Page", "2")
                .set_body_json(vec![1, 2, 3]),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&format!("{}/api/v4", server.uri()), fast_options())
        .expect("client")
        .with_header("PRIVATE-TOKEN", "secret")
        .expect("header");
    let url = client.endpoint("/numbers", &[("page", "1")]).expect("url");
    let response = client.get_json::<Vec<u32>>(url).await.expect("response");

    assert!(response.status().is_success());
    assert_eq!(x_next_page(response.headers()).as_deref(), Some("2"));
    assert_eq!(response.into_body(), Some(vec![1, 2, 3]));
}

#[tokio::test]
async fn test_get_json_error_status_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri(), fast_options()).expect("client");
    let url = client.endpoint("/missing", &[]).expect("url");
    let response = client.get_json::<Vec<u32>>(url).await.expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.body().is_none());
}

#[tokio::test]
async fn test_get_json_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri(), fast_options()).expect("client");
    let url = client.endpoint("/empty", &[]).expect("url");
    let response = client.get_json::<Vec<u32>>(url).await.expect("response");

    assert!(response.body().is_none());
}

#[tokio::test]
async fn test_get_json_invalid_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/garbage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let client = ApiClient::new(&server.uri(), fast_options()).expect("client");
    let url = client.endpoint("/garbage", &[]).expect("url");
    let err = client
        .get_json::<Vec<u32>>(url)
        .await
        .expect_err("invalid json");

    assert!(matches!(err, NetworkError::Decode { .. }));
}

#[tokio::test]
async fn test_get_json_unreachable_after_retries() {
    // Bind then drop a listener so the port refuses connections.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let client = ApiClient::new(&format!("http://127.0.0.1:{port}"), fast_options()).expect("client");
    let url = client.endpoint("/version", &[]).expect("url");
    let err = client.get_json::<Vec<u32>>(url).await.expect_err("refused");

    assert!(err.is_transient());
}
