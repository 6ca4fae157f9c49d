//! Types and traits for recording training metrics.
//!
//! A [`Record`] is a string-keyed collection of values produced during a run,
//! typically episode returns and running averages. Records are handed to a
//! [`Recorder`], which writes them to its backend. The step axis of the time
//! series travels inside the record itself, under the `"total_steps"` key.
//!
//! ```rust
//! use drover_core::record::{Record, RecordValue};
//!
//! let mut record = Record::from_scalar("total_steps", 5200.0);
//! record.insert("Train/EpisodeReturns", RecordValue::Scalar(-113.5));
//! ```
//!
//! Two implementations ship with this crate: [`NullRecorder`], which discards
//! everything (metric logging disabled), and [`BufferedRecorder`], which keeps
//! records in memory for later inspection.
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
