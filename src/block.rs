/// Descriptor for one contiguous range of the arena.
///
/// A free block never carries an id; an allocated block always does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
  pub start: usize,
  pub size: usize,
  pub is_free: bool,
  pub id: Option<u32>,
}

impl Block {
  pub fn new(
    start: usize,
    size: usize,
    is_free: bool,
    id: Option<u32>,
  ) -> Self {
    Self { start, size, is_free, id }
  }

  /// Offset one past the last byte of the block.
  pub fn end(&self) -> usize {
    self.start + self.size
  }
}
