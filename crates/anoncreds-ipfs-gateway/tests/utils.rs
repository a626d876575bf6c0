#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use anoncreds_ipfs_gateway::{GatewayClient, RetryPolicy, compute_cid};
use axum::{
    Json, Router,
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use tokio::net::TcpListener;

/// Minimal IPFS RPC server with scripted failures.
#[derive(Clone, Default)]
pub struct MockGateway {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    cat_failures: Arc<Mutex<VecDeque<u16>>>,
    add_failures: Arc<Mutex<VecDeque<u16>>>,
    cat_hits: Arc<AtomicUsize>,
    add_hits: Arc<AtomicUsize>,
}

impl MockGateway {
    /// Makes the next `cat` requests fail with `statuses`, in order.
    pub fn fail_cat(&self, statuses: &[u16]) {
        self.cat_failures.lock().unwrap().extend(statuses);
    }

    pub fn fail_add(&self, statuses: &[u16]) {
        self.add_failures.lock().unwrap().extend(statuses);
    }

    pub fn insert(&self, bytes: &[u8]) -> String {
        let cid = compute_cid(bytes).unwrap();
        self.objects
            .lock()
            .unwrap()
            .insert(cid.clone(), bytes.to_vec());
        cid
    }

    pub fn cat_hits(&self) -> usize {
        self.cat_hits.load(Ordering::SeqCst)
    }

    pub fn add_hits(&self) -> usize {
        self.add_hits.load(Ordering::SeqCst)
    }
}

async fn handle_cat(
    State(gateway): State<MockGateway>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    gateway.cat_hits.fetch_add(1, Ordering::SeqCst);

    let scripted = gateway.cat_failures.lock().unwrap().pop_front();
    if let Some(status) = scripted {
        return (StatusCode::from_u16(status).unwrap(), "scripted failure").into_response();
    }

    let Some(cid) = params.get("arg") else {
        return (StatusCode::BAD_REQUEST, "argument \"ipfs-path\" is required").into_response();
    };

    let found = gateway.objects.lock().unwrap().get(cid).cloned();
    match found {
        Some(bytes) => bytes.into_response(),
        None => (StatusCode::NOT_FOUND, "not found").into_response(),
    }
}

async fn handle_add(State(gateway): State<MockGateway>, mut multipart: Multipart) -> Response {
    gateway.add_hits.fetch_add(1, Ordering::SeqCst);

    let scripted = gateway.add_failures.lock().unwrap().pop_front();
    if let Some(status) = scripted {
        return (StatusCode::from_u16(status).unwrap(), "scripted failure").into_response();
    }

    let Ok(Some(field)) = multipart.next_field().await else {
        return (StatusCode::BAD_REQUEST, "file argument is required").into_response();
    };
    let bytes = field.bytes().await.unwrap();

    let cid = gateway.insert(&bytes);

    Json(json!({
        "Name": "object.json",
        "Hash": cid,
        "Size": bytes.len().to_string(),
    }))
    .into_response()
}

/// Starts `gateway` on a free local port, returning its base URL.
pub async fn start_gateway(gateway: MockGateway) -> String {
    let router = Router::new()
        .route("/api/v0/cat", post(handle_cat))
        .route("/api/v0/add", post(handle_add))
        .with_state(gateway);

    let port = port_check::free_local_port().unwrap();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

pub fn client(url: &str, max_retries: u32, initial_delay: Duration) -> GatewayClient {
    GatewayClient::with_client(
        reqwest::Client::new(),
        url,
        RetryPolicy::new(max_retries, initial_delay),
    )
}
