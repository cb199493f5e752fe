//! Test utilities for vehicle-client
//!
//! Provides an in-process vehicle service and a server wrapper for
//! integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use vehicle_core::Vehicle;

use crate::{Result, VehicleClient};

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: VehicleClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Create a new test server from an axum Router
    ///
    /// # Example
    ///
    /// ```ignore
    /// use vehicle_client::testing::{MockVehicleService, TestServer};
    ///
    /// let service = MockVehicleService::new();
    /// let server = TestServer::start(service.router()).await?;
    /// let vehicles = server.client.list_vehicles().await?;
    /// ```
    pub async fn start(router: Router) -> Result<Self> {
        Self::start_with_timeout(router, Duration::from_secs(5), Duration::from_secs(2)).await
    }

    /// Create a new test server with custom timeouts
    pub async fn start_with_timeout(
        router: Router,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        let client = VehicleClient::with_config(&format!("http://{}", addr), timeout, connect_timeout)?;

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get a reference to the client
    pub fn client(&self) -> &VehicleClient {
        &self.client
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

// =============================================================================
// Simulated vehicle service
// =============================================================================

#[derive(Debug, Default)]
struct Store {
    vehicles: Vec<Vehicle>,
    next_id: u64,
    delete_status: Option<StatusCode>,
    last_payload: Option<Value>,
}

/// In-memory stand-in for the remote vehicle service.
///
/// Serves the `/vehicles` collection with insertion-ordered listing and
/// server-assigned ids. Clones share the same store, so a test can keep a
/// handle to inspect or tweak state after handing the router to
/// [`TestServer`].
#[derive(Debug, Clone)]
pub struct MockVehicleService {
    store: Arc<Mutex<Store>>,
}

impl Default for MockVehicleService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockVehicleService {
    /// Empty service; the first created vehicle gets id 1
    pub fn new() -> Self {
        Self::with_vehicles(Vec::new())
    }

    /// Service pre-loaded with `vehicles`, listed in the given order
    pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Self {
        let next_id = vehicles.iter().filter_map(|v| v.id).max().unwrap_or(0) + 1;
        Self {
            store: Arc::new(Mutex::new(Store {
                vehicles,
                next_id,
                ..Store::default()
            })),
        }
    }

    /// Snapshot of the stored vehicles
    pub fn vehicles(&self) -> Vec<Vehicle> {
        self.store.lock().vehicles.clone()
    }

    /// Answer every DELETE with `status` instead of the normal outcome
    pub fn set_delete_status(&self, status: StatusCode) {
        self.store.lock().delete_status = Some(status);
    }

    /// Raw JSON body of the most recent POST or PUT
    pub fn last_payload(&self) -> Option<Value> {
        self.store.lock().last_payload.clone()
    }

    /// Axum router exposing the service
    pub fn router(&self) -> Router {
        Router::new()
            .route("/vehicles", get(list_vehicles).post(create_vehicle))
            .route(
                "/vehicles/{id}",
                get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
            )
            .with_state(self.clone())
    }

    /// Start a [`TestServer`] serving this service
    pub async fn start(&self) -> Result<TestServer> {
        TestServer::start(self.router()).await
    }
}

fn not_found(id: u64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("Vehicle {} not found", id) })),
    )
        .into_response()
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

async fn list_vehicles(State(service): State<MockVehicleService>) -> Json<Vec<Vehicle>> {
    Json(service.vehicles())
}

async fn get_vehicle(
    State(service): State<MockVehicleService>,
    Path(id): Path<u64>,
) -> Response {
    let store = service.store.lock();
    match store.vehicles.iter().find(|v| v.id == Some(id)) {
        Some(vehicle) => Json(vehicle.clone()).into_response(),
        None => not_found(id),
    }
}

async fn create_vehicle(
    State(service): State<MockVehicleService>,
    Json(payload): Json<Value>,
) -> Response {
    let mut vehicle: Vehicle = match serde_json::from_value(payload.clone()) {
        Ok(vehicle) => vehicle,
        Err(e) => return bad_request(e.to_string()),
    };

    let mut store = service.store.lock();
    store.last_payload = Some(payload);
    vehicle.id = Some(store.next_id);
    store.next_id += 1;
    store.vehicles.push(vehicle.clone());

    (StatusCode::CREATED, Json(vehicle)).into_response()
}

async fn update_vehicle(
    State(service): State<MockVehicleService>,
    Path(id): Path<u64>,
    Json(payload): Json<Value>,
) -> Response {
    let mut vehicle: Vehicle = match serde_json::from_value(payload.clone()) {
        Ok(vehicle) => vehicle,
        Err(e) => return bad_request(e.to_string()),
    };
    vehicle.id = Some(id);

    let mut store = service.store.lock();
    store.last_payload = Some(payload);
    match store.vehicles.iter_mut().find(|v| v.id == Some(id)) {
        Some(slot) => {
            *slot = vehicle.clone();
            Json(vehicle).into_response()
        }
        None => not_found(id),
    }
}

async fn delete_vehicle(
    State(service): State<MockVehicleService>,
    Path(id): Path<u64>,
) -> Response {
    let mut store = service.store.lock();
    if let Some(status) = store.delete_status {
        return status.into_response();
    }

    let before = store.vehicles.len();
    store.vehicles.retain(|v| v.id != Some(id));
    if store.vehicles.len() < before {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_follows_preloaded() {
        let service = MockVehicleService::with_vehicles(vec![
            Vehicle::new().with_id(3),
            Vehicle::new().with_id(9),
        ]);
        assert_eq!(service.store.lock().next_id, 10);
        assert_eq!(MockVehicleService::new().store.lock().next_id, 1);
    }
}
