//! End-to-end tests over a real socket.

mod common;

use std::time::Duration;

use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use filegate::lifecycle::Shutdown;

use common::*;

#[tokio::test]
async fn test_serves_over_tcp_and_applies_reloaded_config() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path(), "");
    let (services, _handlers, _store) = test_services(&config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (updates_tx, updates_rx) = mpsc::unbounded_channel();

    let server = filegate::HttpServer::new(config.clone(), services);
    let live = server.config();
    let handle = tokio::spawn(server.run(listener, updates_rx, shutdown.subscribe()));

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/sw.js", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(response.text().await.unwrap(), "const BASE = \"\";");

    let mut reloaded = config.clone();
    reloaded.server.base_url = "/files".to_string();
    updates_tx.send(reloaded).unwrap();

    for _ in 0..50 {
        if live.load().server.base_url == "/files" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let response = client
        .get(format!("http://{}/sw.js", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);

    let response = client
        .get(format!("http://{}/files/sw.js", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.text().await.unwrap(), "const BASE = \"/files\";");

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn test_reload_revokes_removed_users() {
    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path(), "");
    let (services, _handlers, _store) = test_services(&config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (updates_tx, updates_rx) = mpsc::unbounded_channel();

    let server = filegate::HttpServer::new(config.clone(), services);
    let live = server.config();
    let handle = tokio::spawn(server.run(listener, updates_rx, shutdown.subscribe()));

    let client = reqwest::Client::new();
    let url = format!("http://{}/api/resource/notes", addr);
    let response = client.get(&url).header("x-auth", TOKEN).send().await.unwrap();
    assert_eq!(response.status(), 200);

    let mut reloaded = config.clone();
    reloaded.users.clear();
    updates_tx.send(reloaded).unwrap();

    for _ in 0..50 {
        if live.load().users.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let response = client.get(&url).header("x-auth", TOKEN).send().await.unwrap();
    assert_eq!(response.status(), 403);

    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}
