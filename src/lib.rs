//! # rmemsim - A Best-Fit Memory Arena Simulator
//!
//! This crate simulates a fixed-size memory arena and drives it through a
//! tiny five-command protocol (`INSERT`, `READ`, `DELETE`, `UPDATE`,
//! `DUMP`). It is a teaching model of a **best-fit allocator** with
//! power-of-two size-class rounding and adjacent-free-block coalescing.
//!
//! ## Overview
//!
//! The arena is a fixed 65535-byte buffer. A block table partitions it into
//! contiguous free and allocated ranges with no gaps and no overlaps:
//!
//! ```text
//!   Arena and Block Table:
//!
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                        ARENA (65535 bytes)                       │
//!   │                                                                  │
//!   │   ┌────────┬────────┬──────────┬───────────────────────────────┐ │
//!   │   │ ID 0   │ FREE   │ ID 2     │            FREE               │ │
//!   │   │ 16 B   │ 16 B   │ 64 B     │           65439 B             │ │
//!   │   └────────┴────────┴──────────┴───────────────────────────────┘ │
//!   │   ▲        ▲                                                     │
//!   │   │        └── freed by DELETE 1, waiting to coalesce or be      │
//!   │   │            reused by a best-fit INSERT                       │
//!   │   └── sizes are rounded up to powers of two (size classes)       │
//!   │                                                                  │
//!   └──────────────────────────────────────────────────────────────────┘
//!
//!   INSERT picks the smallest free block that fits (best-fit).
//!   DELETE frees a block and merges adjacent free neighbors.
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   rmemsim
//!   ├── round      - Size-class rounding macro (round_up!)
//!   ├── block      - Block descriptor (internal table entry)
//!   ├── arena      - Fixed-capacity, bounds-clamped byte buffer
//!   ├── manager    - Best-fit search, merge pass, the five operations
//!   ├── command    - Command parsing and dispatch
//!   └── error      - Reportable command outcomes
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use rmemsim::Dispatcher;
//!
//! let mut dispatcher = Dispatcher::new();
//!
//! assert_eq!(dispatcher.dispatch("INSERT 10 hello"), "Inserted ID 0\n");
//! assert!(dispatcher.dispatch("READ 0").starts_with("Data at ID 0: hello"));
//! assert_eq!(dispatcher.dispatch("DELETE 0"), "Deleted ID 0\n");
//! assert_eq!(dispatcher.dispatch("READ 0"), "Nothing at 0\n");
//! ```
//!
//! ## How It Works
//!
//! - Requested sizes are rounded up to the next power of two, so allocated
//!   blocks form a small set of size classes.
//! - `INSERT` scans the table for the smallest free block that fits and
//!   keeps any oversized remainder as a new free block.
//! - `DELETE` frees the block and sweeps the table, merging adjacent free
//!   pairs; merging is the only mechanism that grows free blocks back.
//! - `UPDATE` overwrites in place when the new data fits, and otherwise
//!   falls back to delete + insert, which assigns a **fresh** id.
//! - `DUMP` lists the table with hex address ranges, status, sizes and
//!   stored data up to the first zero byte.
//!
//! ## Limitations
//!
//! - **Single-threaded only**: one command runs to completion at a time.
//! - **No buddy splitting**: free blocks are never halved into buddy
//!   pairs; only rounding and best-fit selection shape allocations.
//! - **No persistence**: the arena lives and dies with the process.
//! - **Linear scans**: best-fit and merge are O(n) over the table.

pub mod arena;
pub mod block;
pub mod command;
pub mod error;
pub mod manager;
pub mod round;

pub use arena::{Arena, MEMORY_SIZE};
pub use command::{Command, Dispatcher};
pub use error::CommandError;
pub use manager::{MemoryManager, UpdateOutcome};
