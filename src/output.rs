//! Rendering of `WR`/`WRL` tokens to an injectable sink.
//!
//! Tests inject a `Vec<u8>` in place of real stdout; the CLI hands the
//! engine `io::stdout().lock()`. Flushing per token mirrors the reference
//! behavior.

use std::io::Write;

use crate::error::RuntimeError;
use crate::heap::Heap;
use crate::opcode::WriteKind;

/// Render one `WR` token to `out`.
pub fn write_value<W: Write>(out: &mut W, kind: WriteKind, value: u64, heap: &Heap) -> Result<(), RuntimeError> {
    match kind {
        WriteKind::Signed => write!(out, "{}", value as i64)?,
        WriteKind::Unsigned => write!(out, "{value}")?,
        WriteKind::Char => out.write_all(&[(value & 0xff) as u8])?,
        WriteKind::Str => write_c_string(out, heap, value as usize)?,
    }
    out.flush()?;
    Ok(())
}

/// Render a `WRL` newline.
pub fn write_newline<W: Write>(out: &mut W) -> Result<(), RuntimeError> {
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

fn write_c_string<W: Write>(out: &mut W, heap: &Heap, mut offset: usize) -> Result<(), RuntimeError> {
    loop {
        let byte = heap.load(offset)?;
        if byte == 0 {
            return Ok(());
        }
        out.write_all(&[byte])?;
        offset += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_reinterprets_bit_pattern() {
        let heap = Heap::new(64);
        let mut out = Vec::new();
        write_value(&mut out, WriteKind::Signed, u64::MAX, &heap).unwrap();
        assert_eq!(out, b"-1");
    }

    #[test]
    fn unsigned_prints_plain_decimal() {
        let heap = Heap::new(64);
        let mut out = Vec::new();
        write_value(&mut out, WriteKind::Unsigned, 42, &heap).unwrap();
        assert_eq!(out, b"42");
    }

    #[test]
    fn c_string_stops_at_nul() {
        let mut heap = Heap::new(64);
        let base = heap.allocate(4);
        for (i, b) in b"Hi!\0".iter().enumerate() {
            heap.store(base + i, *b).unwrap();
        }
        let mut out = Vec::new();
        write_value(&mut out, WriteKind::Str, base as u64, &heap).unwrap();
        assert_eq!(out, b"Hi!");
    }

    #[test]
    fn c_string_refuses_to_walk_past_arena_end() {
        let mut heap = Heap::new(64);
        let last = heap.len() - 1;
        heap.store(last, b'x').unwrap();
        let mut out = Vec::new();
        let err = write_value(&mut out, WriteKind::Str, last as u64, &heap);
        assert!(matches!(err, Err(RuntimeError::HeapOutOfBounds { .. })));
    }
}
