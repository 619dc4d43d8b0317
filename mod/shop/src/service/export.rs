use chrono::{Duration, Utc};
use rust_xlsxwriter::Workbook;
use serde::Serialize;

use robostore_core::{STAMP_FORMAT, ServiceError};
use robostore_sql::Value;

use crate::model::VALID_MODELS;

use super::ShopService;

/// The wire shape of one robot in the JSON export.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RobotExport {
    pub model: String,
    pub version: String,
    /// `YYYY-MM-DD HH:MM:SS`
    pub created: String,
}

/// One (model, version) count in the weekly report.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyCount {
    pub model: String,
    pub version: String,
    pub count: i64,
}

const REPORT_HEADER: [&str; 3] = ["Модель", "Версия", "Количество за неделю"];

impl ShopService {
    /// All robots as the JSON export array.
    pub fn export_robots(&self) -> Result<Vec<RobotExport>, ServiceError> {
        let rows = self
            .sql
            .query(
                "SELECT model, version, created FROM robots ORDER BY created, id",
                &[],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            items.push(RobotExport {
                model: field(row, "model")?,
                version: field(row, "version")?,
                created: field(row, "created")?,
            });
        }
        Ok(items)
    }

    /// Per-(model, version) production counts over the trailing 7 days.
    pub fn weekly_counts(&self) -> Result<Vec<WeeklyCount>, ServiceError> {
        let cutoff = (Utc::now() - Duration::days(7))
            .format(STAMP_FORMAT)
            .to_string();

        // Stamps sort lexicographically, so text comparison is enough.
        let rows = self
            .sql
            .query(
                "SELECT model, version, COUNT(*) AS cnt
                 FROM robots WHERE created >= ?1
                 GROUP BY model, version ORDER BY model, version",
                &[Value::Text(cutoff)],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let mut counts = Vec::with_capacity(rows.len());
        for row in &rows {
            counts.push(WeeklyCount {
                model: field(row, "model")?,
                version: field(row, "version")?,
                count: row.get_i64("cnt").unwrap_or(0),
            });
        }
        Ok(counts)
    }

    /// The weekly report as an xlsx workbook: one sheet per robot
    /// model, header `[Модель, Версия, Количество за неделю]`, one row
    /// per version produced in the window.
    pub fn weekly_report_xlsx(&self) -> Result<Vec<u8>, ServiceError> {
        let counts = self.weekly_counts()?;

        let mut workbook = Workbook::new();
        for model in VALID_MODELS {
            let sheet = workbook.add_worksheet();
            sheet
                .set_name(*model)
                .map_err(|e| ServiceError::Internal(e.to_string()))?;

            for (col, title) in REPORT_HEADER.iter().enumerate() {
                sheet
                    .write_string(0, col as u16, *title)
                    .map_err(|e| ServiceError::Internal(e.to_string()))?;
            }

            let mut row = 1u32;
            for entry in counts.iter().filter(|c| c.model == *model) {
                sheet
                    .write_string(row, 0, entry.model.as_str())
                    .and_then(|s| s.write_string(row, 1, entry.version.as_str()))
                    .and_then(|s| s.write_number(row, 2, entry.count as f64))
                    .map_err(|e| ServiceError::Internal(e.to_string()))?;
                row += 1;
            }
        }

        workbook
            .save_to_buffer()
            .map_err(|e| ServiceError::Internal(e.to_string()))
    }
}

fn field(row: &robostore_sql::Row, name: &str) -> Result<String, ServiceError> {
    row.get_str(name)
        .map(str::to_string)
        .ok_or_else(|| ServiceError::Internal(format!("missing {name} column")))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use robostore_core::STAMP_FORMAT;

    use crate::service::testutil::test_service;

    fn stamp(days_ago: i64) -> String {
        (Utc::now() - Duration::days(days_ago))
            .format(STAMP_FORMAT)
            .to_string()
    }

    #[test]
    fn export_carries_the_wire_stamp_format() {
        let (svc, _mailer) = test_service();
        svc.create_robot("R2", "D2", "2024-01-15 09:30:00").unwrap();

        let items = svc.export_robots().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].model, "R2");
        assert_eq!(items[0].version, "D2");
        assert_eq!(items[0].created, "2024-01-15 09:30:00");

        let json = serde_json::to_string(&items).unwrap();
        assert!(json.contains("\"created\":\"2024-01-15 09:30:00\""));
    }

    #[test]
    fn weekly_counts_cover_only_the_trailing_window() {
        let (svc, _mailer) = test_service();
        svc.create_robot("R2", "D2", &stamp(1)).unwrap();
        svc.create_robot("R2", "D2", &stamp(2)).unwrap();
        svc.create_robot("R2", "A1", &stamp(3)).unwrap();
        // Outside the 7-day window.
        svc.create_robot("X5", "LT", &stamp(30)).unwrap();

        let counts = svc.weekly_counts().unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].version, "A1");
        assert_eq!(counts[0].count, 1);
        assert_eq!(counts[1].version, "D2");
        assert_eq!(counts[1].count, 2);
        assert!(!counts.iter().any(|c| c.model == "X5"));
    }

    #[test]
    fn weekly_report_is_a_nonempty_xlsx() {
        let (svc, _mailer) = test_service();
        svc.create_robot("13", "b7", &stamp(1)).unwrap();

        let bytes = svc.weekly_report_xlsx().unwrap();
        // xlsx files are zip archives: PK magic.
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..2], b"PK");
    }
}
