/// Total capacity of the simulated memory, in bytes.
pub const MEMORY_SIZE: usize = 65535;

/// Fixed-capacity byte buffer standing in for real memory.
///
/// Created zeroed, mutated in place, never resized. Every write is clamped
/// to its destination range so a copy can never spill past the block it
/// targets.
pub struct Arena {
  bytes: Box<[u8]>,
}

impl Arena {
  pub fn new() -> Self {
    Self {
      bytes: vec![0u8; MEMORY_SIZE].into_boxed_slice(),
    }
  }

  pub fn capacity(&self) -> usize {
    self.bytes.len()
  }

  /// Copies `data` into `[start, start + len)`, truncating to the range and
  /// to the arena capacity. Returns the number of bytes written.
  pub fn write(
    &mut self,
    start: usize,
    len: usize,
    data: &[u8],
  ) -> usize {
    let end = (start + len).min(self.bytes.len());
    if start >= end {
      return 0;
    }

    let copy_len = data.len().min(end - start);
    self.bytes[start..start + copy_len].copy_from_slice(&data[..copy_len]);

    copy_len
  }

  /// Borrows the bytes of `[start, start + len)`, clamped to capacity.
  pub fn read(
    &self,
    start: usize,
    len: usize,
  ) -> &[u8] {
    let end = (start + len).min(self.bytes.len());

    &self.bytes[start.min(end)..end]
  }
}

impl Default for Arena {
  fn default() -> Self {
    Arena::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_zero_initialized() {
    let arena = Arena::new();

    assert_eq!(arena.capacity(), MEMORY_SIZE);
    assert!(arena.read(0, MEMORY_SIZE).iter().all(|&b| b == 0));
  }

  #[test]
  fn test_write_truncates_to_range() {
    let mut arena = Arena::new();

    let written = arena.write(8, 4, b"abcdefgh");

    assert_eq!(written, 4);
    assert_eq!(arena.read(8, 4), b"abcd");
    // Bytes past the range stay untouched.
    assert_eq!(arena.read(12, 4), &[0, 0, 0, 0]);
  }

  #[test]
  fn test_short_write_leaves_tail_alone() {
    let mut arena = Arena::new();

    arena.write(0, 8, b"hi");

    assert_eq!(arena.read(0, 8), b"hi\0\0\0\0\0\0");
  }

  #[test]
  fn test_write_clamped_to_capacity() {
    let mut arena = Arena::new();

    let written = arena.write(MEMORY_SIZE - 2, 8, b"abcdefgh");

    assert_eq!(written, 2);
    assert_eq!(arena.read(MEMORY_SIZE - 2, 8), b"ab");
  }
}
