//! Access-log middleware driven through axum routers.

use axum::{
    body::{Body, Bytes},
    extract::ConnectInfo,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

use applog::http::{access_log_middleware, AccessLogFlags, AccessLogLayer, AccessLogState};
use applog::logging::{Level, Logger};

mod common;

fn request(method: Method, uri: &str, body: Body) -> Request<Body> {
    let mut req = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();
    req.extensions_mut()
        .insert(ConnectInfo("10.0.0.1:5555".parse::<SocketAddr>().unwrap()));
    req
}

fn layered(flags: &AccessLogFlags, logger: &Arc<Logger>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, "no such thing") }),
        )
        .route(
            "/sized",
            get(|| async { ([(header::CONTENT_LENGTH, "1234")], "x".repeat(1234)) }),
        )
        .route(
            "/garbled",
            get(|| async { ([(header::CONTENT_LENGTH, HeaderValue::from_static("abc"))], "") }),
        )
        .layer(AccessLogLayer::new(flags.clone()).with_logger(logger.clone()))
}

fn function_handler(flags: &AccessLogFlags, logger: &Arc<Logger>) -> Router {
    Router::new()
        .route("/echo", post(echo).get(sized_get))
        .route_layer(middleware::from_fn_with_state(
            AccessLogState::new(flags.clone()).with_logger(logger.clone()),
            access_log_middleware,
        ))
}

async fn echo(body: Bytes) -> impl IntoResponse {
    ([(header::CONTENT_LENGTH, body.len().to_string())], body)
}

async fn sized_get() -> impl IntoResponse {
    ([(header::CONTENT_LENGTH, "5")], "hello")
}

fn tokens(line: &str) -> Vec<&str> {
    line.split(' ').collect()
}

#[tokio::test]
async fn test_layer_line_format() {
    let (logger, captured) = common::capture_logger(Level::Debug);
    let flags = AccessLogFlags::new(false, true);
    let app = layered(&flags, &logger);

    let res = app
        .oneshot(request(Method::GET, "/health", Body::empty()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let messages = captured.messages();
    assert_eq!(messages.len(), 1);
    let (level, line) = &messages[0];
    assert_eq!(*level, Level::Info);

    let t = tokens(line);
    assert_eq!(t.len(), 9, "{line}");
    assert_eq!(&t[..6], ["HTTP/1.1", "from", "10.0.0.1:5555", "200", "GET", "/health"]);
    assert!(t[6].ends_with('s'), "elapsed `{}`", t[6]);
    assert_eq!(&t[7..], ["0", "B"]);
}

#[tokio::test]
async fn test_layer_records_status_and_size() {
    let (logger, captured) = common::capture_logger(Level::Debug);
    let flags = AccessLogFlags::new(false, true);

    let res = layered(&flags, &logger)
        .oneshot(request(Method::GET, "/missing", Body::empty()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = layered(&flags, &logger)
        .oneshot(request(Method::GET, "/sized?page=2", Body::empty()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let messages = captured.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].1.contains(" 404 GET /missing "), "{}", messages[0].1);
    assert!(messages[1].1.contains(" 200 GET /sized?page=2 "), "{}", messages[1].1);
    assert!(messages[1].1.ends_with(" 1.2 KB"), "{}", messages[1].1);
}

#[tokio::test]
async fn test_unparsable_content_length_is_reported() {
    let (logger, captured) = common::capture_logger(Level::Debug);
    let flags = AccessLogFlags::new(false, true);

    let res = layered(&flags, &logger)
        .oneshot(request(Method::GET, "/garbled", Body::empty()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let messages = captured.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].0, Level::Error);
    assert!(messages[0].1.starts_with("content-length parse error"));
    assert_eq!(messages[1].0, Level::Info);
    assert!(messages[1].1.ends_with(" 0 B"));
}

#[tokio::test]
async fn test_verbose_routes_to_debug() {
    let (logger, captured) = common::capture_logger(Level::Debug);
    let flags = AccessLogFlags::new(true, true);

    layered(&flags, &logger)
        .oneshot(request(Method::GET, "/health", Body::empty()))
        .await
        .unwrap();

    flags.set_access_log(false);
    layered(&flags, &logger)
        .oneshot(request(Method::GET, "/health", Body::empty()))
        .await
        .unwrap();

    let levels: Vec<_> = captured.messages().into_iter().map(|(l, _)| l).collect();
    assert_eq!(levels, vec![Level::Debug, Level::Debug]);
}

#[tokio::test]
async fn test_debug_lines_filtered_at_info() {
    let (logger, captured) = common::capture_logger(Level::Info);
    let flags = AccessLogFlags::new(false, false);
    let app = layered(&flags, &logger);

    app.clone()
        .oneshot(request(Method::GET, "/health", Body::empty()))
        .await
        .unwrap();
    assert!(captured.messages().is_empty());

    // flags are read per request, not when the router was built
    flags.set_access_log(true);
    app.oneshot(request(Method::GET, "/health", Body::empty()))
        .await
        .unwrap();
    assert_eq!(captured.messages().len(), 1);
}

#[tokio::test]
async fn test_function_handler_line_omits_status() {
    let (logger, captured) = common::capture_logger(Level::Debug);
    let flags = AccessLogFlags::new(false, true);

    let res = function_handler(&flags, &logger)
        .oneshot(request(Method::POST, "/echo", Body::from("hello")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let messages = captured.messages();
    assert_eq!(messages.len(), 1);
    let t = tokens(&messages[0].1);
    assert_eq!(t.len(), 8, "{}", messages[0].1);
    assert_eq!(&t[..5], ["HTTP/1.1", "from", "10.0.0.1:5555", "POST", "/echo"]);
    assert_eq!(&t[6..], ["5", "B"]);
}

#[tokio::test]
async fn test_function_handler_sizes_post_only() {
    let (logger, captured) = common::capture_logger(Level::Debug);
    let flags = AccessLogFlags::new(false, true);

    let res = function_handler(&flags, &logger)
        .oneshot(request(Method::GET, "/echo", Body::empty()))
        .await
        .unwrap();
    assert_eq!(
        res.headers().get(header::CONTENT_LENGTH).unwrap(),
        &HeaderValue::from_static("5")
    );

    let messages = captured.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].1.starts_with("HTTP/1.1 from 10.0.0.1:5555 GET /echo "));
    assert!(messages[0].1.ends_with(" 0 B"), "{}", messages[0].1);
}
