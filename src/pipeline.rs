//! Fixed load → clean → summarize → persist orchestration.
//!
//! Each step runs to completion before the next; any failure aborts the
//! remaining steps. There is no retry and no rollback of an output file
//! that was already written.

use std::path::Path;
use std::time::Duration;

use log::info;

use crate::error::Result;
use crate::processor::{DataProcessor, Summary};

/// Report generated after a pipeline run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Rows loaded from the input file.
    pub rows_loaded: usize,

    /// Rows remaining after cleaning.
    pub rows_after_clean: usize,

    /// Summary of the cleaned working dataset.
    pub summary: Summary,

    /// Time taken for the run.
    pub duration: Duration,
}

impl RunReport {
    /// One-line human-readable result.
    pub fn summary_line(&self) -> String {
        format!(
            "Pipeline completed: {} rows in, {} rows out, {} columns, {:.2}s",
            self.rows_loaded,
            self.rows_after_clean,
            self.summary.total_columns,
            self.duration.as_secs_f64()
        )
    }
}

/// Run the complete pipeline from `input` to `output`: load, clean,
/// summarize, persist. Progress is reported through the logging facade.
pub fn process_pipeline(input: &Path, output: &Path) -> Result<RunReport> {
    let start = std::time::Instant::now();
    info!(
        "Starting pipeline: {} -> {}",
        input.display(),
        output.display()
    );

    let mut processor = DataProcessor::from_path(input)?;
    let rows_loaded = processor.dataset().row_count();

    processor.clean_data();
    let rows_after_clean = processor.dataset().row_count();

    let summary = processor.summary();
    info!(
        "Data summary: {} rows, {} columns ({})",
        summary.total_rows,
        summary.total_columns,
        summary.column_names().join(", ")
    );

    processor.dataset().persist(output)?;
    info!("Pipeline complete. Output saved to {}", output.display());

    Ok(RunReport {
        rows_loaded,
        rows_after_clean,
        summary,
        duration: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line_reports_row_flow() {
        let report = RunReport {
            rows_loaded: 5,
            rows_after_clean: 3,
            summary: Summary {
                total_rows: 3,
                total_columns: 2,
                columns: Vec::new(),
            },
            duration: Duration::from_millis(1),
        };
        let line = report.summary_line();
        assert!(line.contains("5 rows in"));
        assert!(line.contains("3 rows out"));
    }
}
