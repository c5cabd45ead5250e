use std::sync::Arc;

use super::*;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct RecordedRequests {
    paths: Arc<Mutex<Vec<String>>>,
}

type ServiceState = (RecordedRequests, Option<(StatusCode, String)>);

fn respond(reject: Option<(StatusCode, String)>) -> Response {
    match reject {
        None => StatusCode::NO_CONTENT.into_response(),
        Some((status, body)) => (status, body).into_response(),
    }
}

async fn entries_route(
    State((recorded, reject)): State<ServiceState>,
    Path(record_id): Path<String>,
) -> Response {
    recorded
        .paths
        .lock()
        .await
        .push(format!("entries:{record_id}"));
    respond(reject)
}

async fn refresh_route(
    State((recorded, reject)): State<ServiceState>,
    Path(record_id): Path<String>,
) -> Response {
    recorded
        .paths
        .lock()
        .await
        .push(format!("refresh:{record_id}"));
    respond(reject)
}

async fn spawn_action_service(
    reject_with: Option<(StatusCode, String)>,
) -> (String, RecordedRequests) {
    let recorded = RecordedRequests::default();
    let app = Router::new()
        .route("/records/:record_id/entries", post(entries_route))
        .route("/records/:record_id/refresh", post(refresh_route))
        .with_state((recorded.clone(), reject_with));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (format!("http://{addr}"), recorded)
}

#[tokio::test]
async fn posts_to_the_entries_and_refresh_routes() {
    let (server_url, recorded) = spawn_action_service(None).await;
    let gateway = HttpActionGateway::new(server_url).expect("gateway");
    let record_id = RecordId::new("001xx0001");

    gateway.add_entry(&record_id).await.expect("add_entry");
    gateway.refresh(&record_id).await.expect("refresh");

    assert_eq!(
        *recorded.paths.lock().await,
        vec!["entries:001xx0001", "refresh:001xx0001"]
    );
}

#[tokio::test]
async fn structured_rejection_maps_to_a_remote_error() {
    let (server_url, _recorded) = spawn_action_service(Some((
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"message":"Limit exceeded"}"#.to_string(),
    )))
    .await;
    let gateway = HttpActionGateway::new(server_url).expect("gateway");

    let err = gateway
        .add_entry(&RecordId::new("001xx0001"))
        .await
        .expect_err("rejection");

    assert_eq!(err, ActionError::remote("Limit exceeded"));
}

#[tokio::test]
async fn rejection_without_a_message_body_is_malformed() {
    let (server_url, _recorded) = spawn_action_service(Some((
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error".to_string(),
    )))
    .await;
    let gateway = HttpActionGateway::new(server_url).expect("gateway");

    let err = gateway
        .refresh(&RecordId::new("001xx0001"))
        .await
        .expect_err("rejection");

    assert_eq!(err, ActionError::MalformedFailure { status: 500 });
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let gateway = HttpActionGateway::new(format!("http://{addr}")).expect("gateway");
    let err = gateway
        .add_entry(&RecordId::new("001xx0001"))
        .await
        .expect_err("transport failure");

    assert!(matches!(err, ActionError::Transport(_)));
}

#[test]
fn rejects_urls_without_an_http_scheme() {
    assert!(HttpActionGateway::new("not a url").is_err());
    assert!(HttpActionGateway::new("ftp://example.com").is_err());
}
