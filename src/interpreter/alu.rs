//! Arithmetic, bitwise, and comparison opcode bodies.
//!
//! Unsigned ops operate on the register's raw bit pattern; signed ops
//! reinterpret that same pattern as two's-complement `i64`, compute, and
//! store the result's bit pattern back. No numeric conversion occurs.

use std::io::Write;

use super::Interpreter;
use crate::error::RuntimeError;
use crate::opcode::Bank;
use crate::state::ExecuteState;

impl<W: Write> Interpreter<W> {
    fn operands(&self, ins: &[u8]) -> Result<(Bank, u8, u64, u64), RuntimeError> {
        let t = Bank::try_from(ins[1])?;
        let n = ins[2];
        let t2 = Bank::try_from(ins[3])?;
        let n2 = ins[4];
        Ok((t, n, self.reg(t, n), self.reg(t2, n2)))
    }

    pub(super) fn binary_unsigned(&mut self, ins: &[u8], op: impl FnOnce(u64, u64) -> u64) -> Result<ExecuteState, RuntimeError> {
        let (t, n, a, b) = self.operands(ins)?;
        *self.reg_mut(t, n) = op(a, b);
        Ok(ExecuteState::Proceed)
    }

    pub(super) fn binary_unsigned_checked(
        &mut self,
        ins: &[u8],
        op: impl FnOnce(u64, u64) -> u64,
    ) -> Result<ExecuteState, RuntimeError> {
        let (t, n, a, b) = self.operands(ins)?;
        if b == 0 {
            return Err(RuntimeError::DivideByZero);
        }
        *self.reg_mut(t, n) = op(a, b);
        Ok(ExecuteState::Proceed)
    }

    pub(super) fn binary_signed(&mut self, ins: &[u8], op: impl FnOnce(i64, i64) -> i64) -> Result<ExecuteState, RuntimeError> {
        let (t, n, a, b) = self.operands(ins)?;
        *self.reg_mut(t, n) = op(a as i64, b as i64) as u64;
        Ok(ExecuteState::Proceed)
    }

    pub(super) fn binary_signed_checked(
        &mut self,
        ins: &[u8],
        op: impl FnOnce(i64, i64) -> i64,
    ) -> Result<ExecuteState, RuntimeError> {
        let (t, n, a, b) = self.operands(ins)?;
        if b == 0 {
            return Err(RuntimeError::DivideByZero);
        }
        *self.reg_mut(t, n) = op(a as i64, b as i64) as u64;
        Ok(ExecuteState::Proceed)
    }

    pub(super) fn compare_unsigned(&mut self, ins: &[u8], op: impl FnOnce(u64, u64) -> bool) -> Result<ExecuteState, RuntimeError> {
        let (_, _, a, b) = self.operands(ins)?;
        self.set_flag(op(a, b));
        Ok(ExecuteState::Proceed)
    }

    pub(super) fn compare_signed(&mut self, ins: &[u8], op: impl FnOnce(i64, i64) -> bool) -> Result<ExecuteState, RuntimeError> {
        let (_, _, a, b) = self.operands(ins)?;
        self.set_flag(op(a as i64, b as i64));
        Ok(ExecuteState::Proceed)
    }
}

#[cfg(test)]
mod tests {
    use crate::assembler::Program;
    use crate::interpreter::Interpreter;
    use crate::opcode::{Bank, WriteKind};

    fn run_and_capture(build: impl FnOnce(&mut Program)) -> Vec<u8> {
        let mut asm = Program::new();
        asm.function(0);
        build(&mut asm);
        let mut out = Vec::new();
        let mut vm = Interpreter::new(&asm.build(), &mut out).unwrap();
        vm.run().unwrap();
        out
    }

    #[test]
    fn signed_overflow_of_32_bit_max_reads_positive_under_64_bit_wraparound() {
        let out = run_and_capture(|asm| {
            asm.mrl(Bank::Local, 1, 0x7FFF_FFFF)
                .mrl(Bank::Local, 2, 1)
                .add(Bank::Local, 1, Bank::Local, 2)
                .wr(WriteKind::Signed, Bank::Local, 1)
                .rtn();
        });
        assert_eq!(out, b"2147483648");
    }

    #[test]
    fn bnt_applied_twice_is_identity() {
        let out = run_and_capture(|asm| {
            asm.mrl(Bank::Local, 1, 0x1234)
                .bnt(Bank::Local, 1)
                .bnt(Bank::Local, 1)
                .wr(WriteKind::Unsigned, Bank::Local, 1)
                .rtn();
        });
        assert_eq!(out, b"4660");
    }

    #[test]
    fn min_applied_twice_is_identity() {
        let out = run_and_capture(|asm| {
            asm.mrl(Bank::Local, 1, 42)
                .min(Bank::Local, 1)
                .min(Bank::Local, 1)
                .wr(WriteKind::Unsigned, Bank::Local, 1)
                .rtn();
        });
        assert_eq!(out, b"42");
    }

    #[test]
    fn division_by_zero_is_fatal() {
        let mut asm = Program::new();
        asm.function(0).mrl(Bank::Local, 1, 5).mrl(Bank::Local, 2, 0).udv(Bank::Local, 1, Bank::Local, 2).rtn();
        let mut out = Vec::new();
        let mut vm = Interpreter::new(&asm.build(), &mut out).unwrap();
        assert!(vm.run().is_err());
    }

    #[test]
    fn conditional_jump_fallthrough_advances_exactly_two_bytes() {
        let out = run_and_capture(|asm| {
            // flag starts at 0: GO2 must fall through to the WR that follows.
            asm.go2(5).wr(WriteKind::Unsigned, Bank::Local, 0).rtn();
        });
        assert_eq!(out, b"0");
    }
}
