//! WebSocket clients receive change events from mutations.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use futures::StreamExt;
use grape_hub::api::{create_router, AppState};
use grape_hub::grapes::InMemoryGrapeStore;
use grape_hub::hub::{GrapeEvent, GrapeHub};
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tower::ServiceExt;

const WAIT: Duration = Duration::from_secs(5);

/// Serve `router` on an ephemeral loopback port.
async fn spawn_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn wait_for_clients(hub: &GrapeHub, expected: usize) {
    timeout(WAIT, async {
        while hub.client_count() < expected {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("hub clients did not connect");
}

fn post_red() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/hateoas-grapes/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"id":0,"name":"Red"}"#))
        .unwrap()
}

#[tokio::test]
async fn create_pushes_grape_changed_to_every_client() {
    let hub = GrapeHub::new(8);
    let state = AppState::with_hub(Arc::new(InMemoryGrapeStore::new()), hub.clone());
    let router = create_router(state);
    let addr = spawn_server(router.clone()).await;

    let url = format!("ws://{addr}/hubs/grapes");
    let (mut first, _) = connect_async(url.as_str()).await.unwrap();
    let (mut second, _) = connect_async(url.as_str()).await.unwrap();
    wait_for_clients(&hub, 2).await;

    let response = router.oneshot(post_red()).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    for client in [&mut first, &mut second] {
        let frame = timeout(WAIT, client.next())
            .await
            .expect("no hub frame")
            .unwrap()
            .unwrap();
        assert_eq!(frame, Message::Text(r#"{"event":"grape_changed"}"#.into()));
    }
}

#[tokio::test]
async fn failed_delete_pushes_nothing() {
    let hub = GrapeHub::new(8);
    let state = AppState::with_hub(Arc::new(InMemoryGrapeStore::new()), hub.clone());
    let router = create_router(state);
    let addr = spawn_server(router.clone()).await;

    let (mut client, _) = connect_async(format!("ws://{addr}/hubs/grapes"))
        .await
        .unwrap();
    wait_for_clients(&hub, 1).await;

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/v1/hateoas-grapes/5")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let frame = timeout(Duration::from_millis(200), client.next()).await;
    assert!(frame.is_err(), "unexpected hub frame: {frame:?}");
}

#[tokio::test]
async fn closed_client_leaves_the_hub() {
    let hub = GrapeHub::new(8);
    let state = AppState::with_hub(Arc::new(InMemoryGrapeStore::new()), hub.clone());
    let addr = spawn_server(create_router(state)).await;

    let (mut client, _) = connect_async(format!("ws://{addr}/hubs/grapes"))
        .await
        .unwrap();
    wait_for_clients(&hub, 1).await;

    client.close(None).await.unwrap();

    timeout(WAIT, async {
        while hub.client_count() > 0 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("hub client was not released");
}

#[tokio::test(flavor = "current_thread")]
async fn lagging_client_keeps_receiving() {
    let hub = GrapeHub::new(1);
    let state = AppState::with_hub(Arc::new(InMemoryGrapeStore::new()), hub.clone());
    let addr = spawn_server(create_router(state)).await;

    let (mut client, _) = connect_async(format!("ws://{addr}/hubs/grapes"))
        .await
        .unwrap();
    wait_for_clients(&hub, 1).await;

    // Single-threaded runtime and no await between sends: the session task
    // cannot drain in between, so its receiver lags.
    for _ in 0..5 {
        hub.publish(GrapeEvent::GrapeChanged);
    }

    let expected = Message::Text(r#"{"event":"grape_changed"}"#.into());
    let frame = timeout(WAIT, client.next())
        .await
        .expect("no frame after lag")
        .unwrap()
        .unwrap();
    assert_eq!(frame, expected);

    hub.publish(GrapeEvent::GrapeChanged);
    let frame = timeout(WAIT, client.next())
        .await
        .expect("no frame after recovering from lag")
        .unwrap()
        .unwrap();
    assert_eq!(frame, expected);
}
