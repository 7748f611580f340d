#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;

use neuropath_backend::config::Config;

/// Builds the app against a throwaway data directory. The TempDir must stay
/// alive for the duration of the test or the store files disappear.
pub fn create_test_app() -> (Router, TempDir) {
    let data_dir = TempDir::new().expect("create temp data dir");
    let config = Config {
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        log_level: "warn".to_string(),
        data_dir: data_dir.path().to_path_buf(),
    };
    let app = neuropath_backend::create_app(&config).expect("create app");
    (app, data_dir)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}
