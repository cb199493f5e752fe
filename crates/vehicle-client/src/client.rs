//! Vehicle directory HTTP client implementation

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};
use url::Url;
use vehicle_core::{find_nearest, Criteria, FieldValue, Vehicle};

use crate::error::{Result, VehicleClientError};

/// Client for the remote vehicle directory
///
/// Holds nothing but the base URL and a connection pool. Every call is a
/// fresh round-trip; nothing fetched is cached between calls.
#[derive(Debug, Clone)]
pub struct VehicleClient {
    client: Client,
    base_url: Url,
}

impl VehicleClient {
    /// Create a new vehicle client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the service (e.g., "https://host/test-task").
    ///   A path prefix is kept; `vehicles` is resolved beneath it.
    ///
    /// No request timeout is applied. Use [`VehicleClient::with_config`] to
    /// bound how long a call may wait.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Create a new vehicle client with request and connect timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a reference to the underlying HTTP client.
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    // =========================================================================
    // CRUD Operations
    // =========================================================================

    /// List every vehicle, in the order the service returns them
    #[instrument(skip(self))]
    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>> {
        let url = self.collection_url()?;
        debug!("Listing vehicles from {}", url);

        let response = self.client.get(url).send().await?;
        let vehicles: Vec<Vehicle> = self.handle_response(response).await?;
        vehicles.into_iter().map(ensure_id).collect()
    }

    /// Get a single vehicle by id
    ///
    /// A missing vehicle surfaces as [`VehicleClientError::ServerError`]
    /// carrying whatever status the service used.
    #[instrument(skip(self))]
    pub async fn get_vehicle(&self, id: u64) -> Result<Vehicle> {
        let url = self.item_url(id)?;
        debug!("Fetching vehicle from {}", url);

        let response = self.client.get(url).send().await?;
        ensure_id(self.handle_response(response).await?)
    }

    /// Create a vehicle and return it as stored by the service
    ///
    /// Any `id` on the input is dropped from the payload; the service
    /// assigns one.
    #[instrument(skip(self, vehicle))]
    pub async fn create_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        let url = self.collection_url()?;
        debug!("Creating vehicle at {}: {}", url, vehicle);

        let response = self
            .client
            .post(url)
            .json(&vehicle.without_id())
            .send()
            .await?;
        ensure_id(self.handle_response(response).await?)
    }

    /// Replace an existing vehicle with the full field set of `vehicle`
    #[instrument(skip(self, vehicle), fields(id = ?vehicle.id))]
    pub async fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle> {
        let id = vehicle.id.ok_or(VehicleClientError::MissingId)?;
        let url = self.item_url(id)?;
        debug!("Updating vehicle at {}", url);

        let response = self.client.put(url).json(vehicle).send().await?;
        ensure_id(self.handle_response(response).await?)
    }

    /// Delete a vehicle
    ///
    /// Returns `Ok(true)` only for `204 No Content`. Every other status,
    /// errors included, yields `Ok(false)`. `Err` is reserved for requests
    /// that never got a response.
    #[instrument(skip(self))]
    pub async fn delete_vehicle(&self, id: u64) -> Result<bool> {
        let url = self.item_url(id)?;
        let response = self.client.delete(url).send().await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            Ok(true)
        } else {
            debug!(%status, "Delete not acknowledged");
            Ok(false)
        }
    }

    // =========================================================================
    // Derived Queries
    // =========================================================================

    /// List vehicles where every criteria term holds, keeping service order
    #[instrument(skip(self))]
    pub async fn filter_vehicles(&self, criteria: &Criteria) -> Result<Vec<Vehicle>> {
        let vehicles = self.list_vehicles().await?;
        let total = vehicles.len();
        let matched = criteria.apply(vehicles);
        debug!(total, matched = matched.len(), "Filtered vehicles");
        Ok(matched)
    }

    /// Filter by `(field name, value)` pairs
    ///
    /// Unknown field names are rejected before any request is sent.
    ///
    /// ```rust,no_run
    /// # async fn demo(client: &vehicle_client::VehicleClient) -> vehicle_client::Result<()> {
    /// let toyotas = client.filter_vehicles_by([("name", "Toyota")]).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn filter_vehicles_by<I, K, V>(&self, params: I) -> Result<Vec<Vehicle>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FieldValue>,
    {
        let criteria = Criteria::from_pairs(params)?;
        self.filter_vehicles(&criteria).await
    }

    /// Great-circle distance in kilometers between two stored vehicles
    #[instrument(skip(self))]
    pub async fn distance_between(&self, first_id: u64, second_id: u64) -> Result<f64> {
        let first = self.get_vehicle(first_id).await?;
        let second = self.get_vehicle(second_id).await?;

        let distance = first.distance_to(&second)?;
        debug!(distance, "Computed distance");
        Ok(distance)
    }

    /// Closest other vehicle to the one with `id`
    ///
    /// Fetches the target and then the whole collection. On equal distances
    /// the candidate listed last wins. `None` when no other vehicle exists.
    #[instrument(skip(self))]
    pub async fn nearest_to(&self, id: u64) -> Result<Option<Vehicle>> {
        let target = self.get_vehicle(id).await?;
        let vehicles = self.list_vehicles().await?;

        let nearest = find_nearest(&target, id, vehicles)?;
        debug!(nearest = ?nearest.as_ref().and_then(|v| v.id), "Nearest vehicle");
        Ok(nearest)
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    fn collection_url(&self) -> Result<Url> {
        Ok(self.base_url.join("vehicles")?)
    }

    fn item_url(&self, id: u64) -> Result<Url> {
        Ok(self.base_url.join(&format!("vehicles/{}", id))?)
    }

    /// Handle response and deserialize JSON
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| VehicleClientError::ParseError(e.to_string()))
        } else {
            Err(self.extract_error(response, status).await)
        }
    }

    async fn extract_error(
        &self,
        response: reqwest::Response,
        status: StatusCode,
    ) -> VehicleClientError {
        // Try to parse error response body
        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => ["error", "message", "detail"]
                .iter()
                .find_map(|key| body.get(*key).and_then(|v| v.as_str()))
                .map(String::from)
                .unwrap_or_else(|| format!("HTTP {}", status)),
            Err(_) => format!("HTTP {}", status),
        };

        VehicleClientError::server_error(status.as_u16(), message)
    }
}

/// Parse the base URL so that relative joins land beneath its path
fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Records read back from the service always carry an id
fn ensure_id(vehicle: Vehicle) -> Result<Vehicle> {
    if vehicle.id.is_some() {
        Ok(vehicle)
    } else {
        Err(VehicleClientError::ParseError(
            "vehicle in response has no id".to_string(),
        ))
    }
}
