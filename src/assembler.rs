//! A tiny fluent assembler for building PTB byte streams in tests.
//!
//! Gated behind `test-helpers` (always on under `cfg(test)`): production
//! code never depends on this module, but it keeps hand-written test
//! programs and integration scenarios readable instead of raw byte
//! arithmetic.

use crate::opcode::{Bank, Opcode, WriteKind};

/// Builds a flat PTB byte stream one instruction at a time.
#[derive(Debug, Default)]
pub struct Program {
    bytes: Vec<u8>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new `FN` header for `id`. Must precede that function's body.
    pub fn function(&mut self, id: u16) -> &mut Self {
        let [hi, lo] = id.to_be_bytes();
        self.bytes.extend([Opcode::Fn as u8, hi, lo]);
        self
    }

    pub fn label(&mut self, id: u8) -> &mut Self {
        self.bytes.extend([Opcode::Lbl as u8, id]);
        self
    }

    pub fn go2(&mut self, label: u8) -> &mut Self {
        self.bytes.extend([Opcode::Go2 as u8, label]);
        self
    }

    pub fn cal(&mut self, id: u16) -> &mut Self {
        let [hi, lo] = id.to_be_bytes();
        self.bytes.extend([Opcode::Cal as u8, hi, lo]);
        self
    }

    pub fn rtn(&mut self) -> &mut Self {
        self.bytes.push(Opcode::Rtn as u8);
        self
    }

    pub fn mrl(&mut self, bank: Bank, n: u8, value: u32) -> &mut Self {
        self.bytes.push(Opcode::Mrl as u8);
        self.bytes.extend([bank as u8, n]);
        self.bytes.extend(value.to_be_bytes());
        self
    }

    pub fn mrr(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.bytes.extend([Opcode::Mrr as u8, bank as u8, n, bank2 as u8, n2]);
        self
    }

    pub fn mrm(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8, sz: u8) -> &mut Self {
        self.bytes.extend([Opcode::Mrm as u8, bank as u8, n, bank2 as u8, n2, sz]);
        self
    }

    pub fn mmr(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8, sz: u8) -> &mut Self {
        self.bytes.extend([Opcode::Mmr as u8, bank as u8, n, bank2 as u8, n2, sz]);
        self
    }

    pub fn mlc(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.bytes.extend([Opcode::Mlc as u8, bank as u8, n, bank2 as u8, n2]);
        self
    }

    pub fn fre(&mut self, bank: Bank, n: u8) -> &mut Self {
        self.bytes.extend([Opcode::Fre as u8, bank as u8, n]);
        self
    }

    pub fn wr(&mut self, kind: WriteKind, bank: Bank, n: u8) -> &mut Self {
        self.bytes.extend([Opcode::Wr as u8, kind as u8, bank as u8, n]);
        self
    }

    pub fn wrl(&mut self) -> &mut Self {
        self.bytes.push(Opcode::Wrl as u8);
        self
    }

    fn binary(&mut self, opcode: Opcode, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.bytes.extend([opcode as u8, bank as u8, n, bank2 as u8, n2]);
        self
    }

    pub fn add(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Add, bank, n, bank2, n2)
    }
    pub fn sub(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Sub, bank, n, bank2, n2)
    }
    pub fn sml(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Sml, bank, n, bank2, n2)
    }
    pub fn uml(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Uml, bank, n, bank2, n2)
    }
    pub fn sdv(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Sdv, bank, n, bank2, n2)
    }
    pub fn udv(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Udv, bank, n, bank2, n2)
    }
    pub fn smd(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Smd, bank, n, bank2, n2)
    }
    pub fn umd(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Umd, bank, n, bank2, n2)
    }
    pub fn lsh(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Lsh, bank, n, bank2, n2)
    }
    pub fn rsh(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Rsh, bank, n, bank2, n2)
    }
    pub fn and(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::And, bank, n, bank2, n2)
    }
    pub fn or(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Or, bank, n, bank2, n2)
    }
    pub fn xor(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Xor, bank, n, bank2, n2)
    }
    pub fn eq(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Eq, bank, n, bank2, n2)
    }
    pub fn slt(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Slt, bank, n, bank2, n2)
    }
    pub fn ult(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Ult, bank, n, bank2, n2)
    }
    pub fn sgt(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Sgt, bank, n, bank2, n2)
    }
    pub fn ugt(&mut self, bank: Bank, n: u8, bank2: Bank, n2: u8) -> &mut Self {
        self.binary(Opcode::Ugt, bank, n, bank2, n2)
    }

    pub fn lnt(&mut self) -> &mut Self {
        self.bytes.push(Opcode::Lnt as u8);
        self
    }

    pub fn bnt(&mut self, bank: Bank, n: u8) -> &mut Self {
        self.bytes.extend([Opcode::Bnt as u8, bank as u8, n]);
        self
    }

    pub fn min(&mut self, bank: Bank, n: u8) -> &mut Self {
        self.bytes.extend([Opcode::Min as u8, bank as u8, n]);
        self
    }

    /// Write a byte-for-byte store of an ASCII string (with its trailing
    /// NUL) into the heap at the address currently held by `dest`, using
    /// `scratch` and `scratch2` as throwaway registers.
    pub fn store_c_string(&mut self, dest: (Bank, u8), scratch: (Bank, u8), scratch2: (Bank, u8), text: &[u8]) -> &mut Self {
        for (i, byte) in text.iter().chain(std::iter::once(&0u8)).enumerate() {
            self.mrl(scratch.0, scratch.1, *byte as u32);
            self.mrl(scratch2.0, scratch2.1, i as u32);
            self.add(scratch2.0, scratch2.1, dest.0, dest.1);
            self.mmr(scratch2.0, scratch2.1, scratch.0, scratch.1, 1);
        }
        self
    }

    pub fn build(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}
