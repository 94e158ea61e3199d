use std::collections::HashMap;

use log::debug;

use crate::{
  arena::{Arena, MEMORY_SIZE},
  block::Block,
  error::CommandError,
};

/// How an update request was satisfied.
#[derive(Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
  /// The new data fit the existing block; the id is unchanged.
  InPlace,
  /// The block was too small: the old id was deleted and the data was
  /// re-inserted under a fresh id. The old id is invalid from here on.
  Reinserted { new_id: u32 },
  /// The old id was deleted but no free block fit the re-insertion.
  ReinsertFailed(CommandError),
}

/// Best-fit allocator over a fixed arena.
///
/// The block table is an ordered partition of the arena: blocks are sorted
/// by start offset, adjacent blocks touch exactly, and together they cover
/// the whole arena. The id map gives O(1) lookup from an allocation id to
/// the block's current table index and is repaired whenever the table
/// shifts.
pub struct MemoryManager {
  arena: Arena,
  blocks: Vec<Block>,
  index: HashMap<u32, usize>,
  next_id: u32,
}

impl MemoryManager {
  /// Creates a manager whose table holds one free block spanning the arena.
  pub fn new() -> Self {
    Self {
      arena: Arena::new(),
      blocks: vec![Block::new(0, MEMORY_SIZE, true, None)],
      index: HashMap::new(),
      next_id: 0,
    }
  }

  /// The block table, in start-offset order.
  pub fn blocks(&self) -> &[Block] {
    &self.blocks
  }

  /// Finds the smallest free block of at least `size` bytes; ties go to the
  /// lowest start offset. Linear scan over the table, O(n) per call; the
  /// table stays small enough that nothing smarter pays for itself.
  fn best_fit(
    &self,
    size: usize,
  ) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (i, block) in self.blocks.iter().enumerate() {
      if !block.is_free || block.size < size {
        continue;
      }
      if best.is_none_or(|b| block.size < self.blocks[b].size) {
        best = Some(i);
      }
    }

    best
  }

  /// Sweeps the table left to right and folds every adjacent free pair
  /// into the left block. Repeats at the same index until the pair is no
  /// longer free-free, so no two adjacent free blocks survive the pass.
  fn merge_blocks(&mut self) {
    let mut i = 0;

    while i + 1 < self.blocks.len() {
      if self.blocks[i].is_free && self.blocks[i + 1].is_free {
        let absorbed = self.blocks.remove(i + 1);
        self.blocks[i].size += absorbed.size;
        debug!(
          "merged free pair at {:#06x}, new size {}",
          self.blocks[i].start, self.blocks[i].size
        );
      } else {
        i += 1;
      }
    }

    self.reindex();
  }

  /// Rebuilds the id map after the table shifts. The table is mutated by
  /// splits and merges, both of which move block indexes; without this the
  /// map would keep resolving ids to the wrong blocks.
  fn reindex(&mut self) {
    self.index.clear();

    for (i, block) in self.blocks.iter().enumerate() {
      if let Some(id) = block.id {
        self.index.insert(id, i);
      }
    }
  }

  /// Allocates a power-of-two block for `size` bytes and copies `data`
  /// into it, truncating silently if `data` is longer than the block.
  ///
  /// The id counter only advances on success, so a rejected insert never
  /// burns an id.
  pub fn insert(
    &mut self,
    size: usize,
    data: &[u8],
  ) -> Result<u32, CommandError> {
    // A request beyond the arena can never fit, and rounding one near
    // usize::MAX would wrap the doubling loop and never terminate.
    if size > MEMORY_SIZE {
      debug!("request of {size} bytes exceeds the arena");
      return Err(CommandError::AllocationFailed { size });
    }

    let class = crate::round_up!(size);

    let Some(i) = self.best_fit(class) else {
      debug!("no free block fits a request of {class} bytes");
      return Err(CommandError::AllocationFailed { size: class });
    };

    // Keep the tail of an oversized block as a free remainder so allocated
    // sizes stay exact size classes. Not buddy splitting: the remainder is
    // whatever is left over, only merging ever grows it back.
    let spare = self.blocks[i].size - class;
    if spare > 0 {
      let tail_start = self.blocks[i].start + class;
      self.blocks[i].size = class;
      self.blocks.insert(i + 1, Block::new(tail_start, spare, true, None));
    }

    let id = self.next_id;
    self.next_id += 1;

    let block = &mut self.blocks[i];
    block.is_free = false;
    block.id = Some(id);

    let written = self.arena.write(block.start, block.size, data);
    debug!(
      "inserted id {id}: {written} of {} bytes at {:#06x}",
      data.len(),
      self.blocks[i].start
    );

    self.reindex();

    Ok(id)
  }

  /// Returns the stored bytes of `id` over the block's full declared size.
  /// Display-time truncation at the first zero byte is a dump concern, not
  /// a read concern.
  pub fn read(
    &self,
    id: u32,
  ) -> Result<&[u8], CommandError> {
    let block = self
      .index
      .get(&id)
      .map(|&i| &self.blocks[i])
      .filter(|block| !block.is_free)
      .ok_or(CommandError::UnknownId(i64::from(id)))?;

    Ok(self.arena.read(block.start, block.size))
  }

  /// Frees the block of `id` and coalesces adjacent free blocks. Deleting
  /// an unknown id reports a miss and mutates nothing.
  pub fn delete(
    &mut self,
    id: u32,
  ) -> Result<(), CommandError> {
    let &i = self
      .index
      .get(&id)
      .ok_or(CommandError::UnknownId(i64::from(id)))?;

    self.blocks[i].is_free = true;
    self.blocks[i].id = None;
    self.index.remove(&id);
    self.merge_blocks();

    debug!("deleted id {id}");

    Ok(())
  }

  /// Overwrites the data of `id` in place when it fits. When it does not,
  /// falls back to delete + insert, which assigns a fresh id and leaves
  /// the caller's id invalid. The fallback is inherited reference behavior
  /// and kept as observed.
  pub fn update(
    &mut self,
    id: u32,
    new_data: &[u8],
  ) -> Result<UpdateOutcome, CommandError> {
    let &i = self
      .index
      .get(&id)
      .ok_or(CommandError::UnknownId(i64::from(id)))?;

    if new_data.len() <= self.blocks[i].size {
      let (start, size) = (self.blocks[i].start, self.blocks[i].size);
      // Only the first new_data.len() bytes change; the old tail stays
      // until the next overwrite.
      self.arena.write(start, size, new_data);
      return Ok(UpdateOutcome::InPlace);
    }

    self.delete(id)?;
    match self.insert(new_data.len(), new_data) {
      Ok(new_id) => Ok(UpdateOutcome::Reinserted { new_id }),
      Err(err) => Ok(UpdateOutcome::ReinsertFailed(err)),
    }
  }

  /// Renders the block table in the diagnostic dump layout: hex address
  /// range, status, size, and for allocated blocks the stored data decoded
  /// up to the first zero byte.
  pub fn dump(&self) -> String {
    let mut out = String::from("--- Memory Dump ---\n");

    for block in &self.blocks {
      let range = format!("0x{:04x} - 0x{:04x}: ", block.start, block.end());

      match block.id {
        Some(id) => {
          out.push_str(&format!(
            "{range}ALLOCATED (ID: {id}) (Size: {} bytes)\n",
            block.size
          ));

          let stored = self.arena.read(block.start, block.size);
          let shown = stored
            .iter()
            .position(|&byte| byte == 0)
            .unwrap_or(stored.len());
          let text = String::from_utf8_lossy(&stored[..shown]);
          out.push_str(&format!("Data: {text}\n\n"));
        }
        None => {
          out.push_str(&format!("{range}FREE (Size: {} bytes)\n", block.size));
        }
      }
    }

    out
  }
}

impl Default for MemoryManager {
  fn default() -> Self {
    MemoryManager::new()
  }
}
