//! A growable scratch that glues successive chunks into one contiguous view
//! for the buffered driver.
//!
//! Mirrors the teacher's `async_stream::IncrementalBuffer` cursor/consume/
//! compact shape, generalized from a token buffer to a byte buffer and with
//! the growth policy the data model specifies (append in place, else compact,
//! else grow by a factor of roughly 3/2).

use crate::error::Error;

/// The tail exported when a parse terminates with bytes left over.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unconsumed {
    pub bytes: Vec<u8>,
    pub offset: usize,
    pub length: usize,
}

/// A growable byte buffer with a logical start, letting `consume` free a
/// prefix without repacking on every call.
pub struct Buffer {
    data: Vec<u8>,
    start: usize,
}

impl Buffer {
    pub fn new() -> Result<Self, Error> {
        Self::with_capacity(1)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::EmptyBuffer);
        }
        Ok(Self {
            data: Vec::with_capacity(capacity),
            start: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len() - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current contiguous byte range.
    pub fn view(&self) -> &[u8] {
        &self.data[self.start..]
    }

    /// Advances the logical start by `n`, freeing a prefix. Clamped to the
    /// buffer's live length.
    pub fn consume(&mut self, n: usize) {
        self.start = (self.start + n).min(self.data.len());
    }

    /// Shifts live bytes down to offset zero.
    pub fn compact(&mut self) {
        if self.start > 0 {
            self.data.drain(..self.start);
            self.start = 0;
        }
    }

    /// Appends `bytes`, growing capacity per the policy in the data model:
    /// append in place if the unused tail suffices; else compact and append
    /// if the freed prefix plus the unused tail suffices; else grow by a
    /// factor of ~3/2 until the new bytes fit, then copy-compact.
    pub fn feed(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let needed = bytes.len();
        let unused_tail = self.data.capacity() - self.data.len();
        if unused_tail >= needed {
            self.data.extend_from_slice(bytes);
            return;
        }

        let total_unused = unused_tail + self.start;
        if total_unused >= needed {
            self.compact();
            self.data.extend_from_slice(bytes);
            return;
        }

        let live = self.len();
        let mut new_capacity = self.data.capacity().max(1);
        while new_capacity.saturating_sub(live) < needed {
            new_capacity = new_capacity + new_capacity.div_ceil(2);
        }
        let mut grown = Vec::with_capacity(new_capacity);
        grown.extend_from_slice(&self.data[self.start..]);
        grown.extend_from_slice(bytes);
        self.data = grown;
        self.start = 0;
    }

    pub fn unconsumed(&self) -> Unconsumed {
        Unconsumed {
            bytes: self.data[self.start..].to_vec(),
            offset: 0,
            length: self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_capacity_is_an_error() {
        assert_eq!(Buffer::with_capacity(0).unwrap_err(), Error::EmptyBuffer);
    }

    #[test]
    fn feed_appends_in_place_when_capacity_allows() {
        let mut buffer = Buffer::with_capacity(16).unwrap();
        buffer.feed(b"hello");
        buffer.feed(b" world");
        assert_eq!(buffer.view(), b"hello world");
    }

    #[test]
    fn consume_then_feed_compacts_instead_of_growing() {
        let mut buffer = Buffer::with_capacity(8).unwrap();
        buffer.feed(b"12345678");
        buffer.consume(6);
        assert_eq!(buffer.view(), b"78");
        buffer.feed(b"abcdef");
        assert_eq!(buffer.view(), b"78abcdef");
    }

    #[test]
    fn feed_grows_when_neither_in_place_nor_compaction_suffice() {
        let mut buffer = Buffer::with_capacity(4).unwrap();
        buffer.feed(b"ab");
        buffer.feed(b"cdefgh");
        assert_eq!(buffer.view(), b"abcdefgh");
    }

    #[test]
    fn unconsumed_reports_the_live_view() {
        let mut buffer = Buffer::with_capacity(8).unwrap();
        buffer.feed(b"abcdef");
        buffer.consume(2);
        let unconsumed = buffer.unconsumed();
        assert_eq!(unconsumed.bytes, b"cdef");
        assert_eq!(unconsumed.length, 4);
    }
}
