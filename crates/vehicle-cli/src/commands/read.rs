//! Read commands - list, filter and fetch vehicles

use anyhow::{anyhow, Result};
use serde_json::Value;
use vehicle_client::{Criteria, VehicleClient};

use crate::output::OutputContext;

/// List all vehicles
pub async fn list(client: &VehicleClient, ctx: &OutputContext) -> Result<()> {
    let vehicles = client.list_vehicles().await?;
    ctx.print_vehicles(&vehicles);
    Ok(())
}

/// List vehicles matching every `FIELD=VALUE` term
pub async fn filter(client: &VehicleClient, terms: &[String], ctx: &OutputContext) -> Result<()> {
    let criteria = parse_criteria(terms)?;
    let vehicles = client.filter_vehicles(&criteria).await?;

    if vehicles.is_empty() {
        ctx.info("No matching vehicles");
        return Ok(());
    }
    ctx.print_vehicles(&vehicles);
    Ok(())
}

/// Show one vehicle
pub async fn get(client: &VehicleClient, id: u64, ctx: &OutputContext) -> Result<()> {
    let vehicle = client.get_vehicle(id).await?;
    ctx.print_vehicles(std::slice::from_ref(&vehicle));
    Ok(())
}

/// Parse `FIELD=VALUE` terms into criteria.
///
/// Values are read as JSON when they parse (`2021`, `null`, `"2021"`) and
/// as plain strings otherwise (`Toyota`).
pub fn parse_criteria(terms: &[String]) -> Result<Criteria> {
    let pairs = terms
        .iter()
        .map(|term| -> Result<(String, Value)> {
            let (field, raw) = term
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected FIELD=VALUE, got '{}'", term))?;
            let value = serde_json::from_str::<Value>(raw)
                .unwrap_or_else(|_| Value::String(raw.to_string()));
            Ok((field.trim().to_string(), value))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Criteria::from_pairs(pairs)?)
}
