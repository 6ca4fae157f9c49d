use super::{Record, Recorder};

/// A recorder that ignores any record.
///
/// Used when metric logging is disabled.
pub struct NullRecorder {}

impl Recorder for NullRecorder {
    /// Discard the given record.
    fn write(&mut self, _record: Record) {}
}
