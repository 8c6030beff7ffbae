//! CSV bulk student import.
//!
//! Parsing and validation are pure so the preview endpoint and the unit
//! tests share them with the import run. The import itself walks the
//! valid rows one at a time with a fixed delay between backend calls;
//! each row's outcome is independent and earlier successes are never
//! rolled back.

use serde::Serialize;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::ValidateEmail;

use crate::cache::RedisCache;
use crate::modules::students::model::CreateStudentDto;
use crate::modules::students::service::StudentService;
use crate::utils::errors::AppError;

/// Password assigned to imported students whose row has no password
/// column value. Students are expected to change it after first login.
pub const DEFAULT_IMPORT_PASSWORD: &str = "student123";

/// Delay between per-row creation calls, bounding load on the database.
const ROW_DELAY: Duration = Duration::from_millis(200);

/// Header aliases accepted for the name column, lower-cased.
const NAME_HEADERS: &[&str] = &["name", "student_name", "studentname"];

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ParsedRow {
    /// 1-based data row number (the header is row 0).
    pub row: usize,
    pub name: String,
    pub email: String,
    #[serde(skip)]
    pub password: String,
    pub valid: bool,
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportPreview {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    pub rows: Vec<ParsedRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImportRowStatus {
    Imported,
    Failed,
    Invalid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportRowReport {
    pub row: usize,
    pub name: String,
    pub email: String,
    pub status: ImportRowStatus,
    /// Backend error message for failed rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Validation errors for invalid rows.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportReport {
    pub total: usize,
    pub imported: usize,
    pub failed: usize,
    pub invalid: usize,
    pub rows: Vec<ImportRowReport>,
}

fn header_index(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.contains(&h.trim().to_lowercase().as_str()))
}

fn field(record: &csv::StringRecord, index: Option<usize>) -> &str {
    index.and_then(|i| record.get(i)).unwrap_or("").trim()
}

/// Parse a CSV document into validated rows.
///
/// A malformed document aborts the whole import with a single error;
/// individual rows failing validation are kept, marked invalid, and
/// carry their error list. An empty document yields zero rows.
pub fn parse_rows(data: &str) -> Result<Vec<ParsedRow>, AppError> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::bad_request(format!("Failed to parse CSV: {}", e)))?
        .clone();

    let name_idx = header_index(&headers, NAME_HEADERS);
    let email_idx = header_index(&headers, &["email"]);
    let password_idx = header_index(&headers, &["password"]);

    let mut rows = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| AppError::bad_request(format!("Failed to parse CSV: {}", e)))?;

        let name = field(&record, name_idx).to_string();
        let email = field(&record, email_idx).to_lowercase();
        let password = {
            let value = field(&record, password_idx);
            if value.is_empty() {
                DEFAULT_IMPORT_PASSWORD.to_string()
            } else {
                value.to_string()
            }
        };

        let mut errors = Vec::new();
        if name.is_empty() {
            errors.push("Name is required".to_string());
        }
        if email.is_empty() {
            errors.push("Email is required".to_string());
        } else if !email.validate_email() {
            errors.push("Invalid email address".to_string());
        }
        if password.len() < 6 {
            errors.push("Password must be at least 6 characters".to_string());
        }

        rows.push(ParsedRow {
            row: i + 1,
            name,
            email,
            password,
            valid: errors.is_empty(),
            errors,
        });
    }

    Ok(rows)
}

/// Build the preview shown before the import is confirmed.
pub fn preview(data: &str) -> Result<ImportPreview, AppError> {
    let rows = parse_rows(data)?;
    let valid = rows.iter().filter(|r| r.valid).count();

    Ok(ImportPreview {
        total: rows.len(),
        valid,
        invalid: rows.len() - valid,
        rows,
    })
}

/// Run the import: create a student for every valid row, sequentially.
///
/// Rows are processed in file order with a fixed delay between backend
/// calls. A failing row is recorded and the run continues; nothing is
/// rolled back.
#[instrument(skip(db, cache, data))]
pub async fn run_import(
    db: &PgPool,
    cache: Option<&RedisCache>,
    data: &str,
) -> Result<ImportReport, AppError> {
    let rows = parse_rows(data)?;
    let to_import = rows.iter().filter(|r| r.valid).count();

    let mut reports = Vec::with_capacity(rows.len());
    let mut imported = 0usize;
    let mut failed = 0usize;
    let mut invalid = 0usize;
    let mut completed = 0usize;

    for row in rows {
        if !row.valid {
            invalid += 1;
            reports.push(ImportRowReport {
                row: row.row,
                name: row.name,
                email: row.email,
                status: ImportRowStatus::Invalid,
                message: None,
                errors: row.errors,
            });
            continue;
        }

        let dto = CreateStudentDto {
            name: row.name.clone(),
            email: row.email.clone(),
            password: row.password.clone(),
            course_ids: vec![],
        };

        let (status, message) = match StudentService::create_student(db, cache, dto).await {
            Ok(_) => {
                imported += 1;
                (ImportRowStatus::Imported, None)
            }
            Err(e) => {
                failed += 1;
                (ImportRowStatus::Failed, Some(e.message()))
            }
        };

        completed += 1;
        let progress = completed * 100 / to_import.max(1);
        info!(
            row = row.row,
            email = %row.email,
            status = ?status,
            progress_percent = progress,
            "Import row processed"
        );

        reports.push(ImportRowReport {
            row: row.row,
            name: row.name,
            email: row.email,
            status,
            message,
            errors: Vec::new(),
        });

        if completed < to_import {
            tokio::time::sleep(ROW_DELAY).await;
        }
    }

    Ok(ImportReport {
        total: reports.len(),
        imported,
        failed,
        invalid,
        rows: reports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_marks_rows_per_validation() {
        let csv = "name,email\nA,a@x.com\n,bad\nB,b@x.com\n";
        let rows = parse_rows(csv).unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].valid);
        assert!(rows[2].valid);

        assert!(!rows[1].valid);
        assert_eq!(
            rows[1].errors,
            vec!["Name is required", "Invalid email address"]
        );

        let to_import: Vec<_> = rows.iter().filter(|r| r.valid).collect();
        assert_eq!(to_import.len(), 2);
        assert_eq!(to_import[0].email, "a@x.com");
        assert_eq!(to_import[1].email, "b@x.com");
    }

    #[test]
    fn test_header_aliases_for_name() {
        for header in ["name", "student_name", "studentName", "NAME"] {
            let csv = format!("{header},email\nAda,ada@x.com\n");
            let rows = parse_rows(&csv).unwrap();
            assert!(rows[0].valid, "header {header} should be accepted");
            assert_eq!(rows[0].name, "Ada");
        }
    }

    #[test]
    fn test_email_is_trimmed_and_lowercased() {
        let csv = "name,email\nAda,  Ada@Example.COM \n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].email, "ada@example.com");
        assert!(rows[0].valid);
    }

    #[test]
    fn test_missing_email_is_its_own_error() {
        let csv = "name,email\nAda,\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].errors, vec!["Email is required"]);
    }

    #[test]
    fn test_password_defaults_when_column_empty() {
        let csv = "name,email,password\nAda,ada@x.com,\nBob,bob@x.com,hunter42\n";
        let rows = parse_rows(csv).unwrap();
        assert_eq!(rows[0].password, DEFAULT_IMPORT_PASSWORD);
        assert_eq!(rows[1].password, "hunter42");
    }

    #[test]
    fn test_short_password_column_invalidates_row() {
        let csv = "name,email,password\nAda,ada@x.com,abc\n";
        let rows = parse_rows(csv).unwrap();
        assert!(!rows[0].valid);
        assert_eq!(rows[0].errors, vec!["Password must be at least 6 characters"]);
    }

    #[test]
    fn test_empty_document_yields_zero_rows() {
        let prev = preview("name,email\n").unwrap();
        assert_eq!(prev.total, 0);
        assert_eq!(prev.valid, 0);
        assert_eq!(prev.invalid, 0);

        let prev = preview("").unwrap();
        assert_eq!(prev.total, 0);
    }

    #[test]
    fn test_ragged_document_aborts_with_single_error() {
        // Row two has an extra column, which the strict reader rejects.
        let csv = "name,email\nAda,ada@x.com\nBob,bob@x.com,extra\n";
        let err = parse_rows(csv).unwrap_err();
        assert!(err.message().starts_with("Failed to parse CSV"));
    }

    #[test]
    fn test_preview_counts() {
        let csv = "name,email\nA,a@x.com\n,bad\nB,b@x.com\n";
        let prev = preview(csv).unwrap();
        assert_eq!(prev.total, 3);
        assert_eq!(prev.valid, 2);
        assert_eq!(prev.invalid, 1);
    }

    #[test]
    fn test_rows_keep_file_order() {
        let csv = "name,email\nA,a@x.com\nB,b@x.com\nC,c@x.com\n";
        let rows = parse_rows(csv).unwrap();
        let emails: Vec<_> = rows.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, vec!["a@x.com", "b@x.com", "c@x.com"]);
        assert_eq!(rows[0].row, 1);
        assert_eq!(rows[2].row, 3);
    }
}
