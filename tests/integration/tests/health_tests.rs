//! Health view over a real socket
//!
//! Run with: cargo test -p integration-tests --test health_tests

use std::sync::Arc;

use reqwest::StatusCode;

use herald_gateway::BotStatus;
use integration_tests::{assert_json, assert_status, TestBot, TestServer};

#[tokio::test]
async fn test_status_page() {
    let bot = TestBot::new();
    let status = Arc::new(BotStatus::new());
    status.set_connected(true);
    let server = TestServer::start(bot.health_state(status)).await.unwrap();

    let response = server.get("/").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("herald is online"));
}

#[tokio::test]
async fn test_health_check() {
    let bot = TestBot::new();
    let server = TestServer::start(bot.health_state(Arc::new(BotStatus::new())))
        .await
        .unwrap();

    let response = server.get("/health").await.unwrap();
    let json: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready() {
    let bot = TestBot::new();
    let status = Arc::new(BotStatus::new());
    let server = TestServer::start(bot.health_state(status.clone()))
        .await
        .unwrap();

    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::SERVICE_UNAVAILABLE)
        .await
        .unwrap();

    status.set_connected(true);
    let response = server.get("/health/ready").await.unwrap();
    let json: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(json["status"], "ready");
}
