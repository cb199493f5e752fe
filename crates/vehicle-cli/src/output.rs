//! Output formatting for vehicle-cli (table, json, csv)

use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};
use vehicle_client::Vehicle;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    /// Parse a format name from the config file, falling back to table
    pub fn from_name(name: &str) -> Self {
        <Self as ValueEnum>::from_str(name, true).unwrap_or_default()
    }
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print an info message (unless in quiet mode)
    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg);
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print vehicles in the configured format
    pub fn print_vehicles(&self, vehicles: &[Vehicle]) {
        self.print(vehicles, |v| VehicleRow::from(v));
    }

    /// Print data in the configured format
    pub fn print<T, R>(&self, data: &[T], to_row: impl Fn(&T) -> R)
    where
        T: Serialize,
        R: Tabled,
    {
        if self.format == OutputFormat::Table && data.is_empty() {
            if !self.quiet {
                println!("No data");
            }
            return;
        }
        let rendered = self.render(data, to_row);
        if !rendered.is_empty() {
            println!("{}", rendered);
        }
    }

    /// Render data in the configured format.
    ///
    /// JSON keeps the serialized shape of `T`; table and CSV go through the
    /// display row produced by `to_row`.
    pub fn render<T, R>(&self, data: &[T], to_row: impl Fn(&T) -> R) -> String
    where
        T: Serialize,
        R: Tabled,
    {
        match self.format {
            OutputFormat::Table => {
                let rows: Vec<R> = data.iter().map(to_row).collect();
                Table::new(rows).to_string()
            }
            OutputFormat::Json => {
                serde_json::to_string_pretty(data).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Csv => {
                let rows: Vec<R> = data.iter().map(to_row).collect();
                csv_lines(&rows).join("\n")
            }
        }
    }

    /// Print key-value pairs
    pub fn print_kv(&self, pairs: &[(&str, String)]) {
        match self.format {
            OutputFormat::Table => {
                for (key, value) in pairs {
                    println!("{}: {}", key.bold(), value);
                }
            }
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.clone())))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&map).unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputFormat::Csv => {
                let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
                println!("{}", keys.join(","));
                let values: Vec<String> = pairs.iter().map(|(_, v)| escape_csv(v)).collect();
                println!("{}", values.join(","));
            }
        }
    }
}

/// Render rows as CSV lines, header first
fn csv_lines<T: Tabled>(data: &[T]) -> Vec<String> {
    if data.is_empty() {
        return Vec::new();
    }

    let header: Vec<String> = T::headers().iter().map(|h| escape_csv(h)).collect();
    let mut lines = vec![header.join(",")];
    for item in data {
        let values: Vec<String> = item.fields().iter().map(|v| escape_csv(v)).collect();
        lines.push(values.join(","));
    }
    lines
}

/// Escape a value for CSV output
fn escape_csv(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn or_dash<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

// =============================================================================
// Display types
// =============================================================================

/// Vehicle display for list, filter and get
#[derive(Debug, Tabled, Serialize)]
pub struct VehicleRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Model")]
    pub model: String,
    #[tabled(rename = "Year")]
    pub year: String,
    #[tabled(rename = "Color")]
    pub color: String,
    #[tabled(rename = "Price")]
    pub price: String,
    #[tabled(rename = "Latitude")]
    pub latitude: String,
    #[tabled(rename = "Longitude")]
    pub longitude: String,
}

impl From<&Vehicle> for VehicleRow {
    fn from(v: &Vehicle) -> Self {
        Self {
            id: or_dash(&v.id),
            name: or_dash(&v.name),
            model: or_dash(&v.model),
            year: or_dash(&v.year),
            color: or_dash(&v.color),
            price: or_dash(&v.price),
            latitude: or_dash(&v.latitude),
            longitude: or_dash(&v.longitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_vehicle_row() {
        let vehicle = Vehicle::new().with_id(1).with_name("Toyota").with_year(2021);
        let row = VehicleRow::from(&vehicle);
        assert_eq!(row.id, "1");
        assert_eq!(row.name, "Toyota");
        assert_eq!(row.model, "-");
        assert_eq!(row.year, "2021");
    }

    #[test]
    fn test_csv_lines() {
        let rows = vec![VehicleRow::from(
            &Vehicle::new().with_id(2).with_name("Lada, Niva"),
        )];
        let lines = csv_lines(&rows);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID,Name,Model"));
        assert!(lines[1].starts_with("2,\"Lada, Niva\",-"));
    }

    #[test]
    fn test_render_json_keeps_wire_shape() {
        let vehicles = vec![Vehicle::new().with_id(1).with_name("Toyota").with_price(21000.0)];
        let ctx = OutputContext::new(OutputFormat::Json, false, true);

        let rendered = ctx.render(&vehicles, |v| VehicleRow::from(v));
        let parsed: Vec<Vehicle> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, vehicles);
    }

    #[test]
    fn test_render_csv_uses_rows() {
        let vehicles = vec![Vehicle::new().with_id(3).with_name("Kia")];
        let ctx = OutputContext::new(OutputFormat::Csv, false, true);

        let rendered = ctx.render(&vehicles, |v| VehicleRow::from(v));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("3,Kia,-"));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(OutputFormat::from_name("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_name("CSV"), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_name("yaml"), OutputFormat::Table);
    }
}
