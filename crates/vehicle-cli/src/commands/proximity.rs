//! Proximity commands - distance and nearest vehicle

use anyhow::Result;
use vehicle_client::VehicleClient;

use crate::output::OutputContext;

/// Distance in kilometers between two vehicles
pub async fn distance(
    client: &VehicleClient,
    first: u64,
    second: u64,
    ctx: &OutputContext,
) -> Result<()> {
    let km = client.distance_between(first, second).await?;

    ctx.print_kv(&[
        ("from", first.to_string()),
        ("to", second.to_string()),
        ("distance_km", format!("{:.3}", km)),
    ]);
    Ok(())
}

/// Closest other vehicle
pub async fn nearest(client: &VehicleClient, id: u64, ctx: &OutputContext) -> Result<()> {
    match client.nearest_to(id).await? {
        Some(vehicle) => ctx.print_vehicles(std::slice::from_ref(&vehicle)),
        None => ctx.info(&format!("No other vehicles besides {}", id)),
    }
    Ok(())
}
