//! VM parameters

use std::mem;

// REGISTER FILE

/// Number of registers in each bank (global and local).
pub const REGISTER_COUNT: usize = 256;

/// The local register that doubles as the comparison flag.
///
/// Written by `EQ`, `SLT`, `ULT`, `SGT`, `UGT`, `LNT`, and read by `GO2`.
pub const REG_FLAG: usize = 0x00;

// MEMORY

/// Length of a word, in bytes. Heap blocks are sized in words.
pub const WORD_SIZE: usize = mem::size_of::<u64>();

/// Default virtual heap size, in bytes (16 MiB).
pub const DEFAULT_HEAP_SIZE: usize = 0x1000000;

/// Capacity of the function table (a 16-bit function id indexes it).
pub const FUNCTION_TABLE_CAPACITY: usize = 0x10000;

/// Capacity of a function's label table (an 8-bit label id indexes it).
pub const LABEL_TABLE_CAPACITY: usize = 0x100;
