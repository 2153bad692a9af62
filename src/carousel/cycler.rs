//! Circular index arithmetic.

/// A valid index over a fixed-size circular list.
///
/// The length is never zero: an empty list is treated as a single slot so
/// the modulo arithmetic is always defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCycler {
    index: usize,
    len: usize,
}

impl IndexCycler {
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len: len.max(1),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    pub fn prev(&mut self) {
        self.index = (self.index + self.len - 1) % self.len;
    }

    /// Jump directly to `index`.
    ///
    /// `index` must be below [`len`](Self::len); the caller owns that check.
    pub fn go_to(&mut self, index: usize) {
        debug_assert!(
            index < self.len,
            "go_to({index}) out of range for {} items",
            self.len
        );
        self.index = index;
    }

    /// Signed shortest circular distance from the current index to `index`.
    ///
    /// The result lies in `(-len/2, len/2]`: on an even-length list the card
    /// exactly opposite is reported on the positive side.
    pub fn relative_offset(&self, index: usize) -> isize {
        let len = self.len as isize;
        let mut offset = index as isize - self.index as isize;
        if 2 * offset > len {
            offset -= len;
        } else if 2 * offset <= -len {
            offset += len;
        }
        offset
    }
}
