use super::Record;

/// Writes records to an output destination.
///
/// The runner hands one record per emission point to the recorder; each
/// record carries its position on the step axis under the `"total_steps"`
/// key. Implementations decide what to do with it: write a TFRecord event,
/// buffer it, or drop it.
pub trait Recorder {
    /// Write a record to the backend.
    fn write(&mut self, record: Record);
}
