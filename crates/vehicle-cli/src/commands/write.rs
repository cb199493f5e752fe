//! Write commands - create, update and delete vehicles

use anyhow::Result;
use clap::Args;
use vehicle_client::{Vehicle, VehicleClient};

use crate::output::OutputContext;

/// Vehicle attributes accepted by create and update
#[derive(Debug, Clone, Default, Args)]
pub struct VehicleArgs {
    /// Make, e.g. Toyota
    #[arg(long)]
    pub name: Option<String>,

    /// Model, e.g. Camry
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub price: Option<f64>,

    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

impl VehicleArgs {
    /// Overwrite the attributes given on the command line
    pub fn apply_to(&self, mut vehicle: Vehicle) -> Vehicle {
        if let Some(name) = &self.name {
            vehicle.name = Some(name.clone());
        }
        if let Some(model) = &self.model {
            vehicle.model = Some(model.clone());
        }
        if let Some(year) = self.year {
            vehicle.year = Some(year);
        }
        if let Some(color) = &self.color {
            vehicle.color = Some(color.clone());
        }
        if let Some(price) = self.price {
            vehicle.price = Some(price);
        }
        if let Some(lat) = self.lat {
            vehicle.latitude = Some(lat);
        }
        if let Some(lon) = self.lon {
            vehicle.longitude = Some(lon);
        }
        vehicle
    }
}

/// Create a vehicle from the given attributes
pub async fn create(client: &VehicleClient, args: &VehicleArgs, ctx: &OutputContext) -> Result<()> {
    let draft = args.apply_to(Vehicle::new());
    let created = client.create_vehicle(&draft).await?;

    ctx.success(&format!(
        "Created vehicle {}",
        created.id.map(|id| id.to_string()).unwrap_or_default()
    ));
    ctx.print_vehicles(std::slice::from_ref(&created));
    Ok(())
}

/// Update a vehicle, keeping attributes that were not given
pub async fn update(
    client: &VehicleClient,
    id: u64,
    args: &VehicleArgs,
    ctx: &OutputContext,
) -> Result<()> {
    let current = client.get_vehicle(id).await?;
    let updated = client.update_vehicle(&args.apply_to(current)).await?;

    ctx.success(&format!("Updated vehicle {}", id));
    ctx.print_vehicles(std::slice::from_ref(&updated));
    Ok(())
}

/// Delete a vehicle
pub async fn delete(client: &VehicleClient, id: u64, ctx: &OutputContext) -> Result<()> {
    if client.delete_vehicle(id).await? {
        ctx.success(&format!("Deleted vehicle {}", id));
    } else {
        ctx.error(&format!("Vehicle {} was not deleted", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_apply_keeps_unset_attributes() {
        let current = Vehicle::new()
            .with_id(1)
            .with_name("Toyota")
            .with_color("red")
            .with_location(55.0, 37.0);
        let args = VehicleArgs {
            color: Some("black".to_string()),
            lon: Some(-3.5),
            ..VehicleArgs::default()
        };

        let updated = args.apply_to(current);
        assert_eq!(updated.id, Some(1));
        assert_eq!(updated.name.as_deref(), Some("Toyota"));
        assert_eq!(updated.color.as_deref(), Some("black"));
        assert_eq!(updated.latitude, Some(55.0));
        assert_eq!(updated.longitude, Some(-3.5));
    }
}
