// LedSlot - core/export.rs
//
// CSV and JSON export of filtered slots.
// Core layer: writes to any Write trait object.

use crate::core::model::Slot;
use crate::util::constants::SLOT_CSV_HEADER;
use crate::util::error::ExportError;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// How a slot listing is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable cards (rendered by the ui layer).
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!(
                "unknown format '{other}' (expected table, json or csv)"
            )),
        }
    }
}

/// Export slots to CSV format.
///
/// Writes: id, truck, region, date, time_window, price, status, verified
pub fn export_csv<W: Write>(
    slots: &[&Slot],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(SLOT_CSV_HEADER).map_err(csv_err)?;

    for slot in slots {
        let price = slot.price.to_string();
        csv_writer
            .write_record([
                slot.id.as_str(),
                slot.truck_name.as_str(),
                slot.region.label(),
                slot.date.as_str(),
                slot.time_window.as_str(),
                price.as_str(),
                slot.status.as_str(),
                if slot.verified { "true" } else { "false" },
            ])
            .map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(slots.len())
}

/// Export slots to JSON format (array of objects).
pub fn export_json<W: Write>(
    slots: &[&Slot],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, slots).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(slots.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::SlotStatus;
    use crate::core::region::Region;
    use std::path::PathBuf;

    fn make_slot(id: &str, region: Region) -> Slot {
        Slot {
            id: id.to_string(),
            truck_name: format!("LED-TX-00{id}"),
            screen_size: "20x10 ft".to_string(),
            region,
            date: "Jan 15".to_string(),
            time_window: "6PM-10PM".to_string(),
            price: 2500,
            status: SlotStatus::Available,
            verified: true,
        }
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(" csv ".parse::<OutputFormat>(), Ok(OutputFormat::Csv));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_csv_export() {
        let a = make_slot("1", Region::Dfw);
        let b = make_slot("2", Region::SanAntonio);
        let mut buf = Vec::new();
        let count = export_csv(&[&a, &b], &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("id,truck,region,date,time_window,price,status,verified")
        );
        assert_eq!(
            lines.next(),
            Some("1,LED-TX-001,DFW,Jan 15,6PM-10PM,2500,available,true")
        );
        assert!(output.contains("San Antonio"));
    }

    #[test]
    fn test_json_export() {
        let a = make_slot("1", Region::ElPaso);
        let mut buf = Vec::new();
        let count = export_json(&[&a], &mut buf, &PathBuf::from("out.json")).unwrap();
        assert_eq!(count, 1);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["region"], "El Paso");
        assert_eq!(value[0]["status"], "available");
    }
}
