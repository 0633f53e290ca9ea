//! Progress reporting hooks for long conversions.

/// Receives progress notifications while records are encoded and written.
///
/// All methods default to doing nothing.
pub trait Progress {
    /// A record of `len` symbols is about to be written.
    fn start_record(&mut self, _id: &str, _len: usize) {}

    /// `rows` more rows of the current record have been written.
    fn advance(&mut self, _rows: usize) {}

    /// The current record has been fully written.
    fn finish_record(&mut self) {}
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {}

impl<P: Progress + ?Sized> Progress for &mut P {
    fn start_record(&mut self, id: &str, len: usize) {
        (**self).start_record(id, len)
    }

    fn advance(&mut self, rows: usize) {
        (**self).advance(rows)
    }

    fn finish_record(&mut self) {
        (**self).finish_record()
    }
}
