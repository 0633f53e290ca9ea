use crate::alphabet::ClassCounts;

pub trait Parser {
    /// Get a reference to the current header, without the leading `>` and the line feed.
    fn get_header(&self) -> &[u8];

    /// Get an owned version of the current header.
    /// This will trigger a new allocation and a copy.
    fn get_header_owned(&mut self) -> Vec<u8>;

    /// Get a reference to the current sequence, without line feeds and blanks.
    fn get_sequence(&self) -> &[u8];

    /// Get an owned version of the current sequence.
    /// This takes the internal buffer, so the sequence is not copied.
    fn get_sequence_owned(&mut self) -> Vec<u8>;

    /// Get the length of the current sequence.
    fn get_seq_len(&self) -> usize;

    /// Get the number of symbols of each class in the current sequence.
    fn get_class_counts(&self) -> &ClassCounts;

    /// Clear the information of the current record.
    fn clear_record(&mut self);
}
