use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use protsim::annotation::{CombinedTable, CombinedText};
use protsim::config::GraphConfig;
use protsim_sdk::{GraphAdapter, GraphClient, RemoteClient, SdkError, WriteTx};

/// Canned graph server: records every posted query and its auth header,
/// answers with a fixed status and body.
#[derive(Clone)]
struct MockServer {
    queries: Arc<Mutex<Vec<String>>>,
    auth: Arc<Mutex<Vec<Option<String>>>>,
    code: StatusCode,
    body: Value,
    health: &'static str,
}

impl MockServer {
    fn new(code: StatusCode, body: Value) -> Self {
        Self {
            queries: Arc::new(Mutex::new(Vec::new())),
            auth: Arc::new(Mutex::new(Vec::new())),
            code,
            body,
            health: "healthy",
        }
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

async fn query_handler(
    State(server): State<MockServer>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let query = body["query"].as_str().unwrap_or_default().to_string();
    server.queries.lock().unwrap().push(query);
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    server.auth.lock().unwrap().push(auth);
    (server.code, Json(server.body.clone()))
}

async fn status_handler(State(server): State<MockServer>) -> Json<Value> {
    Json(json!({
        "status": server.health,
        "version": "test",
        "storage": {"nodes": 12, "edges": 15}
    }))
}

async fn spawn(server: MockServer) -> String {
    let app = Router::new()
        .route("/api/query", post(query_handler))
        .route("/api/status", get(status_handler))
        .with_state(server);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config(uri: &str) -> GraphConfig {
    GraphConfig {
        uri: uri.to_string(),
        user: "neo4j".to_string(),
        password: "secret".to_string(),
    }
}

fn applied(n: i64) -> Value {
    json!({"nodes": [], "edges": [], "columns": ["applied"], "records": [[n]]})
}

fn same_text(names: &[&str]) -> CombinedTable {
    names
        .iter()
        .map(|name| CombinedText {
            protein_name: name.to_string(),
            sysname: name.to_string(),
            text: "protein kinase activity".to_string(),
        })
        .collect()
}

#[tokio::test]
async fn test_similarity_write_posts_cypher_with_auth() {
    let server = MockServer::new(StatusCode::OK, applied(1));
    let uri = spawn(server.clone()).await;

    let adapter = GraphAdapter::connect(&config(&uri)).await.unwrap();
    adapter.write_similarity("ABC1", "CDC28", 73.5).await.unwrap();

    let queries = server.queries();
    assert_eq!(queries.len(), 1);
    assert_eq!(
        queries[0],
        "MATCH (n0:Protein {name: \"ABC1\"}), (n1:Protein {name: \"CDC28\"})\n\
         MERGE (n0)-[e0:SIMILARTO]-(n1)\n\
         SET e0.score = 73.5\n\
         RETURN count(*) AS applied"
    );
    let auth = server.auth.lock().unwrap().clone();
    assert_eq!(auth, vec![Some("Basic bmVvNGo6c2VjcmV0".to_string())]);
}

#[tokio::test]
async fn test_zero_applied_rows_is_write_error() {
    let server = MockServer::new(StatusCode::OK, applied(0));
    let uri = spawn(server).await;

    let adapter = GraphAdapter::connect(&config(&uri)).await.unwrap();
    let err = adapter.write_similarity("ABC1", "MISSING", 90.0).await.unwrap_err();
    match err {
        SdkError::Write { target, reason } => {
            assert_eq!(target, "ABC1 -[SIMILARTO]- MISSING");
            assert_eq!(reason, "no matching nodes");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_server_error_maps_to_write_and_query_errors() {
    let server = MockServer::new(
        StatusCode::BAD_REQUEST,
        json!({"error": "syntax error near MERGE"}),
    );
    let uri = spawn(server).await;
    let client = RemoteClient::from_config(&config(&uri));

    let mut tx = WriteTx::new();
    tx.merge_node("Protein", "ABC1", Vec::<(&str, protsim_sdk::PropertyValue)>::new());
    let err = client.write(&tx).await.unwrap_err();
    assert!(matches!(
        err,
        SdkError::Write { ref reason, .. } if reason == "syntax error near MERGE"
    ));

    let adapter = GraphAdapter::new(client);
    let err = adapter.most_similar("ABC1", 3).await.unwrap_err();
    assert!(matches!(err, SdkError::Query(ref msg) if msg == "syntax error near MERGE"));
}

#[tokio::test]
async fn test_rejected_credentials_are_connection_errors() {
    let server = MockServer::new(StatusCode::UNAUTHORIZED, json!({"error": "unauthorized"}));
    let uri = spawn(server).await;

    let adapter = GraphAdapter::connect(&config(&uri)).await.unwrap();
    let err = adapter.write_similarity("A", "B", 80.0).await.unwrap_err();
    assert!(err.is_connection());
}

#[tokio::test]
async fn test_rejected_credentials_abort_score_initialization() {
    let server = MockServer::new(StatusCode::UNAUTHORIZED, json!({"error": "unauthorized"}));
    let uri = spawn(server.clone()).await;

    let adapter = GraphAdapter::connect(&config(&uri)).await.unwrap();
    let err = adapter
        .initialize_scores(&same_text(&["ABC1", "CDC28", "YAL001C"]), 70.0)
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Connection(_)));
    // three qualifying pairs, but the first rejection ends the batch
    assert_eq!(server.queries().len(), 1);
}

#[tokio::test]
async fn test_self_similarity_is_rejected_before_posting() {
    let server = MockServer::new(StatusCode::OK, applied(1));
    let uri = spawn(server.clone()).await;

    let adapter = GraphAdapter::connect(&config(&uri)).await.unwrap();
    let err = adapter.write_similarity("ABC1", "ABC1", 100.0).await.unwrap_err();
    assert!(matches!(
        err,
        SdkError::Write { ref target, .. } if target == "ABC1 -[SIMILARTO]- ABC1"
    ));
    assert!(!err.is_connection());
    assert!(server.queries().is_empty());
}

#[tokio::test]
async fn test_duplicate_names_are_skipped_without_posting() {
    let server = MockServer::new(StatusCode::OK, applied(1));
    let uri = spawn(server.clone()).await;

    let adapter = GraphAdapter::connect(&config(&uri)).await.unwrap();
    let summary = adapter
        .initialize_scores(&same_text(&["ABC1", "ABC1"]), 70.0)
        .await
        .unwrap();
    assert_eq!(summary.qualifying, 1);
    assert_eq!(summary.written, 0);
    assert_eq!(summary.failed, 1);
    assert!(server.queries().is_empty());
}

#[tokio::test]
async fn test_most_similar_parses_rows() {
    let body = json!({
        "columns": ["name", "rank", "sysname", "description"],
        "records": [
            ["YAL001C", 100.0, "YAL001C", "protein kinase"],
            ["ABC1", 73.5, "YGL119W", null]
        ]
    });
    let server = MockServer::new(StatusCode::OK, body);
    let uri = spawn(server.clone()).await;

    let adapter = GraphAdapter::connect(&config(&uri)).await.unwrap();
    let similar = adapter.most_similar("CDC28", 2).await.unwrap();

    assert_eq!(similar.len(), 2);
    assert_eq!(similar[0].name, "YAL001C");
    assert_eq!(similar[0].score, 100.0);
    assert_eq!(similar[0].description.as_deref(), Some("protein kinase"));
    assert_eq!(similar[1].sysname.as_deref(), Some("YGL119W"));
    assert_eq!(similar[1].description, None);

    let queries = server.queries();
    assert!(queries[0].contains("WHERE r.score IS NOT NULL"));
    assert!(queries[0].ends_with("ORDER BY rank DESC, name ASC\nLIMIT 2"));
}

#[tokio::test]
async fn test_zero_k_skips_the_server() {
    let server = MockServer::new(StatusCode::OK, applied(1));
    let uri = spawn(server.clone()).await;

    let adapter = GraphAdapter::connect(&config(&uri)).await.unwrap();
    assert!(adapter.most_similar("CDC28", 0).await.unwrap().is_empty());
    assert!(server.queries().is_empty());
}

#[tokio::test]
async fn test_status_round_trip() {
    let server = MockServer::new(StatusCode::OK, applied(1));
    let uri = spawn(server).await;

    let adapter = GraphAdapter::connect(&config(&uri)).await.unwrap();
    let status = adapter.status().await.unwrap();
    assert_eq!(status.storage.nodes, 12);
    assert_eq!(status.storage.edges, 15);
    adapter.close();
}

#[tokio::test]
async fn test_unhealthy_server_fails_connect() {
    let mut server = MockServer::new(StatusCode::OK, applied(1));
    server.health = "degraded";
    let uri = spawn(server).await;

    let err = GraphAdapter::connect(&config(&uri)).await.err().unwrap();
    assert!(matches!(err, SdkError::Connection(ref msg) if msg.contains("degraded")));
}

#[tokio::test]
async fn test_unreachable_server_fails_connect() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = GraphAdapter::connect(&config(&format!("http://{}", addr)))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, SdkError::Connection(_)));
}
