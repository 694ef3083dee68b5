//! Output formatting for CLI commands.

use colored::Colorize;
use distami_lookup::{Image, Snapshot};
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }
}

/// Print rows as a table, or the records as a JSON array.
pub fn print_output<R: Tabled, T: Serialize>(rows: &[R], records: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("{}", "No items found.".dimmed());
            } else {
                println!("{}", Table::new(rows));
            }
        }
        OutputFormat::Json => println!("{}", format_json(records, "[]")),
    }
}

/// Print a single record.
pub fn print_single<R: Tabled, T: Serialize>(row: R, record: &T, format: OutputFormat) {
    match format {
        OutputFormat::Table => println!("{}", Table::new([row])),
        OutputFormat::Json => println!("{}", format_json(record, "{}")),
    }
}

/// Print a success message.
pub fn print_success(message: &str) {
    eprintln!("{} {}", "Success:".green().bold(), message);
}

fn format_json<T: Serialize + ?Sized>(data: &T, fallback: &str) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| fallback.to_string())
}

/// Table row for an image.
#[derive(Debug, Tabled)]
pub struct ImageRow {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "Name")]
    pub name: String,

    #[tabled(rename = "State")]
    pub state: String,

    #[tabled(rename = "Region")]
    pub region: String,

    #[tabled(rename = "Tags")]
    pub tags: String,

    #[tabled(rename = "Created")]
    pub created: String,
}

impl From<&Image> for ImageRow {
    fn from(image: &Image) -> Self {
        let tags = image
            .tags
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",");

        Self {
            id: image.image_id.clone(),
            name: image.name.clone().unwrap_or_else(|| "-".to_string()),
            state: image.state.to_string(),
            region: image.region.clone(),
            tags: if tags.is_empty() { "-".to_string() } else { tags },
            created: image
                .created_at
                .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Table row for a snapshot.
#[derive(Debug, Tabled)]
pub struct SnapshotRow {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "State")]
    pub state: String,

    #[tabled(rename = "Size (GiB)")]
    pub size: String,

    #[tabled(rename = "Region")]
    pub region: String,
}

impl From<&Snapshot> for SnapshotRow {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            id: snapshot.snapshot_id.clone(),
            state: snapshot.state.clone().unwrap_or_else(|| "-".to_string()),
            size: snapshot
                .volume_size_gib
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string()),
            region: snapshot.region.clone(),
        }
    }
}

/// Table row for a region name.
#[derive(Debug, Tabled)]
pub struct RegionRow {
    #[tabled(rename = "Region")]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::parse("yaml"), OutputFormat::Table);
    }

    #[test]
    fn test_image_row() {
        let image = Image::new("ami-1", "pending", "us-east-1")
            .with_tag("Role", "web")
            .with_tag("Env", "prod");

        let row = ImageRow::from(&image);
        assert_eq!(row.name, "-");
        assert_eq!(row.state, "pending");
        assert_eq!(row.tags, "Env=prod,Role=web");
        assert_eq!(row.created, "-");
    }

    #[test]
    fn test_snapshot_row() {
        let mut snapshot = Snapshot::new("snap-1", "us-east-1");
        snapshot.volume_size_gib = Some(8);

        let row = SnapshotRow::from(&snapshot);
        assert_eq!(row.state, "-");
        assert_eq!(row.size, "8");
    }
}
