//! Parses a flat PTB byte stream into a function table.

use crate::consts::{FUNCTION_TABLE_CAPACITY, LABEL_TABLE_CAPACITY};
use crate::error::LoadError;
use crate::opcode::Opcode;

/// A single function's code and resolved label offsets.
#[derive(Debug, Clone, Default)]
pub struct Function {
    code: Vec<u8>,
    labels: Vec<Option<usize>>,
}

impl Function {
    fn new(code: Vec<u8>) -> Self {
        Self { code, labels: vec![None; LABEL_TABLE_CAPACITY] }
    }

    /// This function's instruction bytes, excluding its own `FN` header.
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    /// Resolve a label id to an offset inside [`Self::code`].
    pub fn label(&self, id: u8) -> Option<usize> {
        self.labels[id as usize]
    }
}

/// Mapping from 16-bit function id to [`Function`], built once at load time
/// and immutable thereafter.
#[derive(Debug, Clone)]
pub struct FunctionTable {
    functions: Vec<Option<Function>>,
}

impl FunctionTable {
    /// Parse `stream` into a function table.
    ///
    /// The stream must begin with an `FN` header; each header's body runs
    /// until the next `FN` or end of stream. Any other top-level byte, or
    /// any unrecognized opcode byte encountered while scanning a body, is a
    /// load error.
    pub fn build(stream: &[u8]) -> Result<Self, LoadError> {
        let mut functions: Vec<Option<Function>> = vec![None; FUNCTION_TABLE_CAPACITY];

        let mut cursor = 0usize;
        while cursor < stream.len() {
            let opcode = Opcode::try_from(stream[cursor])?;
            if opcode != Opcode::Fn {
                return Err(LoadError::InvalidInstruction(stream[cursor]));
            }

            let header = read_instruction(stream, cursor, Opcode::Fn)?;
            let id = u16::from_be_bytes([header[1], header[2]]);
            let body_start = cursor + Opcode::Fn.arg_len();

            let mut scan = body_start;
            loop {
                if scan >= stream.len() {
                    break;
                }
                let op = Opcode::try_from(stream[scan])?;
                if op == Opcode::Fn {
                    break;
                }
                read_instruction(stream, scan, op)?;
                scan += op.arg_len();
            }

            let code = stream[body_start..scan].to_vec();
            let mut function = Function::new(code);
            resolve_labels(&mut function)?;
            functions[id as usize] = Some(function);

            cursor = scan;
        }

        if functions[0].is_none() {
            return Err(LoadError::MissingEntryFunction);
        }

        Ok(Self { functions })
    }

    /// Look up a function by id.
    pub fn get(&self, id: u16) -> Option<&Function> {
        self.functions[id as usize].as_ref()
    }
}

fn read_instruction(stream: &[u8], at: usize, opcode: Opcode) -> Result<&[u8], LoadError> {
    let end = at + opcode.arg_len();
    stream.get(at..end).ok_or(LoadError::TruncatedInstruction(at))
}

/// Sweep a function's copied body once, recording the offset immediately
/// after each `LBL` instruction.
fn resolve_labels(function: &mut Function) -> Result<(), LoadError> {
    let mut cursor = 0usize;
    while cursor < function.code.len() {
        let opcode = Opcode::try_from(function.code[cursor])?;
        let instruction = read_instruction(&function.code, cursor, opcode)?;

        if opcode == Opcode::Lbl {
            let label_id = instruction[1];
            function.labels[label_id as usize] = Some(cursor + opcode.arg_len());
        }

        cursor += opcode.arg_len();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_stream_not_starting_with_fn() {
        let stream = [Opcode::Rtn as u8];
        assert_eq!(FunctionTable::build(&stream), Err(LoadError::InvalidInstruction(Opcode::Rtn as u8)));
    }

    #[test]
    fn rejects_missing_entry_function() {
        let stream = [Opcode::Fn as u8, 0, 1, Opcode::Rtn as u8];
        assert_eq!(FunctionTable::build(&stream), Err(LoadError::MissingEntryFunction));
    }

    #[test]
    fn splits_bodies_at_each_fn_header() {
        let stream = [
            Opcode::Fn as u8, 0, 0, Opcode::Rtn as u8,
            Opcode::Fn as u8, 0, 1, Opcode::Rtn as u8, Opcode::Rtn as u8,
        ];
        let table = FunctionTable::build(&stream).unwrap();
        assert_eq!(table.get(0).unwrap().code(), &[Opcode::Rtn as u8]);
        assert_eq!(table.get(1).unwrap().code(), &[Opcode::Rtn as u8, Opcode::Rtn as u8]);
    }

    #[test]
    fn resolves_label_offsets() {
        let stream = [
            Opcode::Fn as u8, 0, 0,
            Opcode::Lbl as u8, 7,
            Opcode::Rtn as u8,
        ];
        let table = FunctionTable::build(&stream).unwrap();
        assert_eq!(table.get(0).unwrap().label(7), Some(2));
    }
}
