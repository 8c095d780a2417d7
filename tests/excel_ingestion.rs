#![cfg(feature = "excel_test_writer")]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use health_metrics::ingestion::excel::{ingest_excel_from_path, ingest_excel_workbook_from_path};
use health_metrics::ingestion::{ingest_from_path, IngestionOptions};
use health_metrics::metrics::{analyze_workbook, Grade, ReportStatus};
use health_metrics::types::Value;

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("health-metrics-{name}-{nanos}.xlsx"))
}

fn write_clinics_xlsx(path: &PathBuf) {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();

    // Clinic A: legacy column name, mixed age text, all normal/pre-risk
    let ws1 = wb.add_worksheet();
    ws1.set_name("Clinic A").unwrap();
    ws1.write_string(0, 0, "Age").unwrap();
    ws1.write_string(0, 1, "Sex").unwrap();
    ws1.write_string(0, 2, "Parameter Name").unwrap();
    ws1.write_string(0, 3, "df_a1c").unwrap();
    ws1.write_string(1, 0, "34 Y").unwrap();
    ws1.write_string(1, 1, "Male").unwrap();
    ws1.write_string(1, 2, "HbA1c").unwrap();
    ws1.write_number(1, 3, 5.2).unwrap();
    ws1.write_number(2, 0, 58).unwrap();
    ws1.write_string(2, 1, "Female").unwrap();
    ws1.write_string(2, 2, "HbA1c").unwrap();
    ws1.write_number(2, 3, 5.9).unwrap();

    // Clinic B: header starts after a blank row, values stored as text
    let ws2 = wb.add_worksheet();
    ws2.set_name("Clinic B").unwrap();
    ws2.write_string(1, 0, "Value").unwrap();
    ws2.write_string(2, 0, "6.8").unwrap();
    ws2.write_string(3, 0, "#N/A").unwrap();

    wb.save(path).unwrap();
}

#[test]
fn ingest_excel_first_sheet_only() {
    let path = tmp_file("first");
    write_clinics_xlsx(&path);

    let wb = ingest_excel_from_path(&path, None).unwrap();
    assert_eq!(wb.len(), 1);
    let sheet = &wb.sheets[0];
    assert_eq!(sheet.name, "Clinic A");
    assert_eq!(sheet.table.columns, vec!["Age", "Sex", "Parameter Name", "df_a1c"]);
    assert_eq!(sheet.table.rows[0][3], Value::Float64(5.2));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn ingest_excel_all_sheets_keeps_sheets_separate() {
    let path = tmp_file("all");
    write_clinics_xlsx(&path);

    let wb = ingest_excel_workbook_from_path(&path, None).unwrap();
    let names: Vec<_> = wb.sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Clinic A", "Clinic B"]);
    assert_eq!(wb.sheets[1].table.columns, vec!["Value"]);
    assert_eq!(wb.sheets[1].table.rows[0][0], Value::Float64(6.8));

    let report = analyze_workbook(&wb);
    assert_eq!(report.sheets[0].test_label, "HbA1c");
    assert_eq!(report.sheets[0].grade, Grade::A);
    assert_eq!(report.sheets[1].grade, Grade::D);
    assert_eq!(report.sheets[1].dropped_rows, 1);

    let summary = report.summary.unwrap();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[1].average_value, Some(6.8));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn ingest_excel_selected_sheet_only() {
    let path = tmp_file("selected");
    write_clinics_xlsx(&path);

    let sheets = vec!["Clinic B"];
    let wb = ingest_excel_workbook_from_path(&path, Some(&sheets)).unwrap();
    assert_eq!(wb.len(), 1);
    assert_eq!(wb.sheets[0].name, "Clinic B");
    assert!(analyze_workbook(&wb).summary.is_none());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn blank_worksheet_becomes_empty_sheet_report() {
    use rust_xlsxwriter::Workbook;

    let path = tmp_file("blank-tab");
    let mut xlsx = Workbook::new();
    let ws = xlsx.add_worksheet();
    ws.set_name("Clinic A").unwrap();
    ws.write_string(0, 0, "Value").unwrap();
    ws.write_number(1, 0, 6.8).unwrap();
    xlsx.add_worksheet().set_name("Notes").unwrap();
    xlsx.save(&path).unwrap();

    let wb = ingest_from_path(&path, &IngestionOptions::default()).unwrap();
    assert_eq!(wb.len(), 2);
    assert!(wb.sheet("Notes").unwrap().table.is_empty());
    assert_eq!(wb.sheet("Clinic A").unwrap().table.row_count(), 1);

    let report = analyze_workbook(&wb);
    assert_eq!(report.sheets[0].status, ReportStatus::Ok);
    assert_eq!(report.sheets[0].grade, Grade::D);
    let notes = report.sheet("Notes").unwrap();
    assert_eq!(notes.status, ReportStatus::NoUsableData);
    assert_eq!(notes.total, 0);
    assert_eq!(notes.grade, Grade::A);

    let summary = report.summary.unwrap();
    assert_eq!(summary[1].average_value, None);

    let _ = std::fs::remove_file(&path);
}
