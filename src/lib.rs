//! # rusty-etl
//!
//! A small in-memory tabular ETL core: load a delimited text file into a
//! typed columnar [`TabularDataset`], clean it, filter it by date range,
//! aggregate it, summarize it and persist it back to disk.
//!
//! ```no_run
//! use rusty_etl::{DataProcessor, Result};
//! use std::path::Path;
//!
//! fn example() -> Result<()> {
//!     let mut processor = DataProcessor::from_path(Path::new("data.csv"))?;
//!     processor.clean_data();
//!     let summary = processor.summary();
//!     println!("{} rows, {} columns", summary.total_rows, summary.total_columns);
//!     processor.dataset().persist(Path::new("cleaned.csv"))?;
//!     Ok(())
//! }
//! ```
//!
//! Everything is single-threaded and synchronous; each [`DataProcessor`]
//! exclusively owns its working dataset.

pub mod data;
pub mod error;
pub mod pipeline;
pub mod processor;

pub use data::aggregate::AggFn;
pub use data::model::{Cell, Column, ColumnType, TabularDataset, DATE_FORMAT};
pub use error::{Error, Result};
pub use pipeline::{process_pipeline, RunReport};
pub use processor::{ColumnSummary, DataProcessor, Summary};
