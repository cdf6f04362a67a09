//! End-to-end pipeline tests: fixture CSV in, cleaned CSV out.

use std::path::PathBuf;

use rusty_etl::{process_pipeline, ColumnType, Error, TabularDataset};

fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn pipeline_cleans_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    // Five rows: one exact duplicate, one row with a missing amount.
    let input = write_fixture(
        &dir,
        "input.csv",
        "id,name,amount,date\n\
         1,Alice,100.0,2024-01-01\n\
         2,Bob,200.0,2024-01-02\n\
         1,Alice,100.0,2024-01-01\n\
         4,David,,2024-01-04\n\
         5,Eve,250.0,2024-01-05\n",
    );
    let output = dir.path().join("cleaned.csv");

    let report = process_pipeline(&input, &output).unwrap();

    assert_eq!(report.rows_loaded, 5);
    assert_eq!(report.rows_after_clean, 3);
    assert_eq!(report.summary.total_rows, 3);
    assert_eq!(
        report.summary.column_names(),
        vec!["id", "name", "amount", "date"]
    );

    // The persisted output reloads with the same shape.
    let reloaded = TabularDataset::load(&output).unwrap();
    assert_eq!(reloaded.row_count(), 3);
    assert_eq!(reloaded.column_names(), vec!["id", "name", "amount", "date"]);
    assert_eq!(reloaded.column_type("amount"), Some(ColumnType::Float));
    assert_eq!(reloaded.column("amount").unwrap().null_count(), 0);
}

#[test]
fn pipeline_aborts_on_missing_input_without_writing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.csv");
    let output = dir.path().join("out.csv");

    let err = process_pipeline(&input, &output).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(!output.exists());
}

#[test]
fn pipeline_aborts_on_ragged_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(&dir, "ragged.csv", "a,b\n1,2\n3,4,5\n");
    let output = dir.path().join("out.csv");

    let err = process_pipeline(&input, &output).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
    assert!(!output.exists());
}

#[test]
fn pipeline_output_is_idempotent_under_reprocessing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(
        &dir,
        "input.csv",
        "id,score\n1,10\n1,10\n2,20\n",
    );
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    process_pipeline(&input, &first).unwrap();
    process_pipeline(&first, &second).unwrap();

    let a = std::fs::read_to_string(&first).unwrap();
    let b = std::fs::read_to_string(&second).unwrap();
    assert_eq!(a, b);
}
