//! CORS integration tests.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use tower::ServiceExt;

use music_api::RouterConfig;

use super::test_utils::{router_with, MockSongStore};

fn get_from(uri: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_any_origin_by_default() {
    let router = router_with(MockSongStore::new(), RouterConfig::default());

    let response = router
        .oneshot(get_from("/get-songs", "https://anywhere.example"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_preflight_allows_any_method_and_header() {
    let router = router_with(MockSongStore::new(), RouterConfig::default());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/get-songs")
        .header(header::ORIGIN, "https://anywhere.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom-header")
        .body(Body::empty())
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    assert!(response.status().is_success());

    let headers = response.headers();
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(), "*");
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(), "*");
}

#[tokio::test]
async fn test_origin_allow_list() {
    let config = RouterConfig::default()
        .with_cors_origins(vec!["https://player.example".to_string()]);
    let router = router_with(MockSongStore::new(), config);

    let response = router
        .clone()
        .oneshot(get_from("/get-songs", "https://player.example"))
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "https://player.example"
    );

    let response = router
        .oneshot(get_from("/get-songs", "https://evil.example"))
        .await
        .unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
