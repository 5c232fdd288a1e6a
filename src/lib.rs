// Library root
// -----------
// `tvac` annotates a list of genomic variant identifiers against a
// public annotation service and produces a tab-separated report.
//
// Module responsibilities:
// - `variants`: reads the input file into an ordered, de-duplicated list.
// - `api`: the HTTP transport, single-variant lookup and the batch loop
//   that tolerates per-variant failures.
// - `record`: the report row and report types.
// - `config`: endpoint template resolution (env, config file, default).
// - `ui`: progress display for the command-line binary.
// - `mock`: an in-memory transport for tests and offline use.
pub mod api;
pub mod config;
pub mod error;
pub mod mock;
pub mod record;
pub mod ui;
pub mod variants;

pub use api::{AnnotationClient, BatchObserver, HttpTransport, LogObserver, RawResponse, Transport};
pub use config::Config;
pub use error::{AnnotationError, ClientError, Result};
pub use record::{AnnotationRecord, AnnotationReport};
pub use variants::{parse_variant_lines, parse_variants};
