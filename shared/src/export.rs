//! History export. Projects driver logs into a spreadsheet with one row per
//! log and a dash for every value the record never got.

use std::error::Error;
use std::fmt;

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::models::DriverLog;
use crate::time;

/// Placeholder for values a record does not have.
pub const EMPTY_CELL: &str = "—";

pub const SHEET_NAME: &str = "Driver Logs";

pub const EXPORT_HEADERS: [&str; 10] = [
    "Driver Name",
    "Plate Number",
    "Company",
    "Hauler",
    "Truck Type",
    "Arrival Time",
    "Departure Time",
    "Destination",
    "Products",
    "DN Number",
];

#[derive(Debug)]
pub enum ExportError {
    Workbook(XlsxError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Workbook(err) => write!(f, "Failed to build workbook: {}", err),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExportError::Workbook(err) => Some(err),
        }
    }
}

impl From<XlsxError> for ExportError {
    fn from(err: XlsxError) -> Self {
        ExportError::Workbook(err)
    }
}

/// One spreadsheet row, everything already rendered to display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub name: String,
    pub plate_number: String,
    pub company: String,
    pub hauler: String,
    pub truck_type: String,
    pub arrival_time: String,
    pub departure_time: String,
    pub destination: String,
    pub products: String,
    pub dn_number: String,
}

impl ExportRow {
    fn cells(&self) -> [&str; 10] {
        [
            &self.name,
            &self.plate_number,
            &self.company,
            &self.hauler,
            &self.truck_type,
            &self.arrival_time,
            &self.departure_time,
            &self.destination,
            &self.products,
            &self.dn_number,
        ]
    }
}

/// Renders logs in list order. Timestamps come out in the dashboard's
/// display format, not the wire format.
pub fn project_rows(logs: &[DriverLog]) -> Vec<ExportRow> {
    logs.iter()
        .map(|log| ExportRow {
            name: text_or_dash(&log.name),
            plate_number: text_or_dash(&log.plate_number),
            company: label_or_dash(log.company_label()),
            hauler: label_or_dash(log.hauler_label()),
            truck_type: label_or_dash(log.truck_type_label()),
            arrival_time: time_or_dash(log.arrival_time.as_deref()),
            departure_time: time_or_dash(log.departure_time.as_deref()),
            destination: text_or_dash(&log.destination),
            products: products_cell(log),
            dn_number: text_or_dash(&log.dn_number),
        })
        .collect()
}

fn text_or_dash(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn label_or_dash(label: Option<&str>) -> String {
    match label {
        Some(text) => text.to_string(),
        None => EMPTY_CELL.to_string(),
    }
}

fn time_or_dash(timestamp: Option<&str>) -> String {
    match timestamp {
        Some(raw) if !raw.trim().is_empty() => time::format_display(raw),
        _ => EMPTY_CELL.to_string(),
    }
}

fn products_cell(log: &DriverLog) -> String {
    let labels = log.product_labels();
    if labels.is_empty() {
        return EMPTY_CELL.to_string();
    }
    labels
        .iter()
        .map(|label| label.unwrap_or(EMPTY_CELL))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the .xlsx bytes: a header row in bold, then one row per log.
pub fn build_workbook(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
        worksheet.set_column_width(col as u16, 22)?;
    }

    for (row_index, row) in rows.iter().enumerate() {
        for (col, cell) in row.cells().iter().enumerate() {
            worksheet.write_string((row_index + 1) as u32, col as u16, *cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// `driver_logs_YYYYMMDD.xlsx` for the given day.
pub fn export_filename(today: NaiveDate) -> String {
    format!("driver_logs_{}.xlsx", today.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, ProductEntry, Reference};
    use calamine::{open_workbook_auto, Data, Reader};
    use std::fs;
    use std::path::PathBuf;

    fn complete_log() -> DriverLog {
        DriverLog {
            id: "abc123".to_string(),
            driver_data_id: "drv1".to_string(),
            name: "J. Cruz".to_string(),
            plate_number: "ABC-123".to_string(),
            company_id: Some(Reference::Populated(crate::models::Company {
                id: "c1".to_string(),
                name: "Acme Logistics".to_string(),
            })),
            company: "Acme Logistics".to_string(),
            hauler_id: None,
            hauler: "Roadrunner".to_string(),
            truck_type_id: None,
            truck_type: "10-Wheeler".to_string(),
            arrival_time: Some("2024-06-01T08:00:00+08:00".to_string()),
            departure_time: Some("2024-06-01T15:30:00+08:00".to_string()),
            destination: "Plant B".to_string(),
            products: vec![
                ProductEntry {
                    product_id: Reference::Populated(Product {
                        id: "p1".to_string(),
                        name: "Cement".to_string(),
                    }),
                },
                ProductEntry {
                    product_id: Reference::Populated(Product {
                        id: "p2".to_string(),
                        name: "Gravel".to_string(),
                    }),
                },
            ],
            dn_number: "DN-778".to_string(),
            created_at: "2024-06-01T08:00:00+08:00".to_string(),
        }
    }

    fn open_log() -> DriverLog {
        let mut log = complete_log();
        log.id = "def456".to_string();
        log.departure_time = None;
        log.destination = String::new();
        log.products = Vec::new();
        log.dn_number = String::new();
        log
    }

    fn temp_xlsx(test_name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "driver_logs_{}_{}.xlsx",
            test_name,
            std::process::id()
        ))
    }

    #[test]
    fn rows_render_display_times_and_dashes() {
        let rows = project_rows(&[complete_log(), open_log()]);

        assert_eq!(rows[0].arrival_time, "06/01/2024, 08:00:00 AM");
        assert_eq!(rows[0].departure_time, "06/01/2024, 03:30:00 PM");
        assert_eq!(rows[0].products, "Cement, Gravel");
        assert_eq!(rows[0].dn_number, "DN-778");

        assert_eq!(rows[1].departure_time, EMPTY_CELL);
        assert_eq!(rows[1].destination, EMPTY_CELL);
        assert_eq!(rows[1].products, EMPTY_CELL);
        assert_eq!(rows[1].dn_number, EMPTY_CELL);
    }

    #[test]
    fn unpopulated_product_entries_render_as_dashes() {
        let mut log = complete_log();
        log.products = vec![ProductEntry {
            product_id: Reference::Id("p9".to_string()),
        }];
        let rows = project_rows(&[log]);
        assert_eq!(rows[0].products, EMPTY_CELL);
    }

    #[test]
    fn workbook_round_trips_through_a_reader() {
        let rows = project_rows(&[complete_log(), open_log()]);
        let bytes = build_workbook(&rows).unwrap();

        let path = temp_xlsx("round_trip");
        fs::write(&path, &bytes).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();

        // Header row plus one row per log.
        assert_eq!(range.height(), 3);
        assert_eq!(
            range.get_value((0, 0)),
            Some(&Data::String("Driver Name".to_string()))
        );
        assert_eq!(
            range.get_value((0, 9)),
            Some(&Data::String("DN Number".to_string()))
        );
        assert_eq!(
            range.get_value((1, 5)),
            Some(&Data::String("06/01/2024, 08:00:00 AM".to_string()))
        );
        assert_eq!(
            range.get_value((2, 6)),
            Some(&Data::String(EMPTY_CELL.to_string()))
        );

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn empty_history_still_produces_a_header_row() {
        let bytes = build_workbook(&[]).unwrap();

        let path = temp_xlsx("empty");
        fs::write(&path, &bytes).unwrap();

        let mut workbook = open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        assert_eq!(range.height(), 1);
        assert_eq!(range.width(), EXPORT_HEADERS.len());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn filename_embeds_the_day() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(export_filename(day), "driver_logs_20240601.xlsx");
    }
}
