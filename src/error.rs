//! Interpreter error types.

use thiserror::Error;

/// Errors raised while the function table builder parses a PTB byte stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    /// A byte stream that does not begin with `FN`, or a top-level byte
    /// reached while scanning that isn't the start of a `FN` header.
    #[error("invalid instruction {0}")]
    InvalidInstruction(u8),

    /// An instruction's fixed-width operands ran past the end of the stream.
    #[error("truncated instruction at offset {0}")]
    TruncatedInstruction(usize),

    /// A register-type tag byte was neither 0 (local) nor 1 (global).
    #[error("invalid register bank {0}")]
    InvalidRegisterBank(u8),

    /// A `WR` write-type byte was outside 0..=3.
    #[error("invalid write kind {0}")]
    InvalidWriteKind(u8),

    /// The stream defined no function with id 0.
    #[error("entry function 0 is not defined")]
    MissingEntryFunction,
}

/// Errors raised while the execution engine runs a loaded program.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Propagated from the loader: an unknown opcode byte was hit during
    /// execution (e.g. inside a function body that was never swept, which
    /// cannot happen for code that passed the loader, but kept here so the
    /// dispatch loop has a single error type to return).
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Writing a `WR`/`WRL` token to the output sink failed.
    #[error("output write failed: {0}")]
    Io(#[from] std::io::Error),

    /// `CAL` referenced a function id with no entry in the function table.
    #[error("call to undefined function {0}")]
    UndefinedFunction(u16),

    /// `GO2` referenced a label that was never resolved by `LBL` in this
    /// function's body.
    #[error("jump to undefined label {0}")]
    UndefinedLabel(u8),

    /// `SDV`, `UDV`, `SMD`, or `UMD` with a zero divisor.
    #[error("division by zero")]
    DivideByZero,

    /// `MRM`/`MMR` requested with `sz` outside `1..=8`.
    #[error("invalid load/store size {0}")]
    InvalidAccessSize(u8),

    /// A heap byte access (`load`, `store`, or the `STR` write form) touched
    /// an offset outside the arena.
    #[error("heap access out of bounds: offset {offset}, arena size {arena_size}")]
    HeapOutOfBounds { offset: usize, arena_size: usize },

    /// `FRE` targeted an offset that is not the head of a currently
    /// OCCUPIED block (double free, a mid-block offset, or a never-allocated
    /// offset).
    #[error("invalid free at offset {0}")]
    BadFree(usize),

    /// The program counter ran off the end of the current function's code
    /// without hitting `RTN`.
    #[error("program counter ran past the end of function code")]
    CodeOverrun,
}
