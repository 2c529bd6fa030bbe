//! Trial segmentation engine for EyeLink EDF eye-tracking recordings.
//!
//! This crate reorganizes the heterogeneous record stream produced by an
//! EDF decoder into trial-scoped, column-oriented tables: discrete events,
//! raw gaze samples, recording-state markers, and one header row per trial.
//! The binary decoder itself is an external collaborator, consumed through
//! the [`session::EdfSource`] and [`session::EdfSession`] capabilities.
//!
//! # Example
//!
//! ```rust,ignore
//! use edf_trials::{ReadOptions, SampleFields, TrialReader};
//!
//! let options = ReadOptions {
//!     sample_fields: SampleFields::TIME | SampleFields::GX | SampleFields::GY,
//!     ..Default::default()
//! };
//! // `decoder` implements EdfSource over the proprietary binary format
//! let bundle = TrialReader::new(options).read_file(&decoder, path)?;
//!
//! println!("{} trials, {} events", bundle.headers.len(),
//!          bundle.events.map_or(0, |t| t.len()));
//! ```

pub mod classify;
pub mod columns;
pub mod normalize;
pub mod reader;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use columns::{
    EventTable, RecordingBundle, RecordingTable, SampleFields, SampleTable, TrialHeaderTable,
};
pub use normalize::scrub_sentinels;
pub use reader::{ReadOptions, TrialReader};
pub use session::{read_preamble, ConsistencyCheck, EdfSession, EdfSource, SessionError};
pub use types::{
    EventData, EyeData, Record, RecordKind, RecordingInfo, SampleData, TrialHeader,
};
