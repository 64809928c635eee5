//! End-to-end review of a CSV workbook on disk

use pretty_assertions::assert_eq;
use sheet_review::prelude::*;
use sheet_review::{ColumnDescription, TableSummary};

fn open_csv(name: &str, contents: &str) -> (tempfile::TempDir, Workbook) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    let workbook = Workbook::open(&path).unwrap();
    (dir, workbook)
}

#[test]
fn test_review_csv_against_schema() {
    let (_dir, workbook) = open_csv(
        "Lookups.csv",
        "Key,Value,Active,Updated\n\
         status,Open,true,2024-01-05\n\
         status,Closed,false,\n\
         priority,High,,2024-02-01\n\
         priority,Low,true,2024-02-02\n",
    );

    let expected = ExpectedSchema::mula_os();
    let report = workbook.inspect(&expected, &ReviewOptions::default());

    let sheet = &report.sheets[0];
    assert_eq!(sheet.description.row_count, 4);
    assert_eq!(sheet.sample.len(), 3);
    assert_eq!(
        sheet.description.columns[2],
        ColumnDescription {
            position: 3,
            name: "Active".to_string(),
            kind: ValueKind::Boolean,
            non_null: 3,
        }
    );
    assert_eq!(sheet.description.columns[3].kind, ValueKind::DateTime);

    assert_eq!(
        report.summary.tables,
        vec![TableSummary {
            name: "Lookups".to_string(),
            column_count: 4,
        }]
    );

    let statuses: Vec<(&str, bool)> = report
        .comparisons
        .iter()
        .map(|c| (c.name(), c.is_match()))
        .collect();
    assert_eq!(statuses.len(), expected.len());
    assert_eq!(statuses[6], ("Lookups", true));
    assert!(report.comparisons[..6]
        .iter()
        .all(|c| matches!(c, ComparisonResult::Missing { .. })));
}

#[test]
fn test_review_header_only_csv() {
    let (_dir, workbook) = open_csv("Tasks.csv", "A,A,B\n");

    let report = workbook.inspect(
        &ExpectedSchema::new().with_sheet("Tasks", 15),
        &ReviewOptions::default(),
    );

    let columns = &report.sheets[0].description.columns;
    assert_eq!(columns.len(), 3);
    assert!(columns.iter().all(|c| c.non_null == 0 && c.kind == ValueKind::Unknown));
    assert_eq!(
        report.comparisons,
        vec![ComparisonResult::Mismatch {
            name: "Tasks".to_string(),
            expected: 15,
            actual: 3,
        }]
    );

    let text = report.to_string();
    assert!(text.contains("No data rows (only headers)"));
}

#[test]
fn test_custom_sample_size() {
    let (_dir, workbook) = open_csv("Projects.csv", "Name\na\nb\nc\nd\n");

    let options = ReviewOptions { sample_size: 1 };
    let report = workbook.inspect(&ExpectedSchema::new(), &options);

    assert_eq!(report.sheets[0].sample, vec![vec![CellValue::from("a")]]);
    assert!(report.to_string().contains("Sample Data (first 1 rows):"));
}

#[cfg(feature = "serde")]
#[test]
fn test_report_serializes() {
    let (_dir, workbook) = open_csv("Accounts.csv", "Name,Seats\nAcme,12\n");

    let report = workbook.inspect(
        &ExpectedSchema::new().with_sheet("Accounts", 2),
        &ReviewOptions::default(),
    );
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["summary"]["total_columns"], 2);
    assert_eq!(value["sheets"][0]["description"]["columns"][1]["kind"], "integer");
    assert_eq!(value["comparisons"][0]["status"], "match");
}
