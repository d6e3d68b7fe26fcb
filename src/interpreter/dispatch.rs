//! The decode-dispatch loop.

use std::io::Write;

use super::Interpreter;
use crate::error::{LoadError, RuntimeError};
use crate::opcode::{Bank, Opcode, WriteKind};
use crate::output;
use crate::state::ExecuteState;

impl<W: Write> Interpreter<W> {
    /// Decode and execute the instruction at the current `(function, pc)`,
    /// advancing `pc` by the opcode's argument count unless the opcode
    /// rewrote it itself.
    pub(super) fn step(&mut self) -> Result<ExecuteState, RuntimeError> {
        let code = self
            .functions
            .get(self.function_id)
            .ok_or(RuntimeError::UndefinedFunction(self.function_id))?
            .code();

        let opcode_byte = *code.get(self.pc).ok_or(RuntimeError::CodeOverrun)?;
        let opcode = Opcode::try_from(opcode_byte)?;
        let end = self.pc + opcode.arg_len();
        let instruction = code
            .get(self.pc..end)
            .ok_or(LoadError::TruncatedInstruction(self.pc))?
            .to_vec();

        tracing::trace!(function = self.function_id, pc = self.pc, opcode = opcode_byte, "dispatch");

        let state = self.execute(opcode, &instruction)?;

        if !opcode.controls_flow() && matches!(state, ExecuteState::Proceed) {
            self.pc += opcode.arg_len();
        }

        Ok(state)
    }

    fn execute(&mut self, opcode: Opcode, ins: &[u8]) -> Result<ExecuteState, RuntimeError> {
        use Opcode::*;

        match opcode {
            Fn => Err(RuntimeError::Load(LoadError::InvalidInstruction(ins[0]))),

            Cal => {
                let id = u16::from_be_bytes([ins[1], ins[2]]);
                self.op_cal(id)?;
                Ok(ExecuteState::Proceed)
            }

            Rtn => Ok(self.op_rtn()),

            Go2 => {
                self.op_go2(ins[1])?;
                Ok(ExecuteState::Proceed)
            }

            Lbl => Ok(ExecuteState::Proceed),

            Mrl => {
                let t = Bank::try_from(ins[1])?;
                let n = ins[2];
                let value = u32::from_be_bytes([ins[3], ins[4], ins[5], ins[6]]);
                *self.reg_mut(t, n) = value as u64;
                Ok(ExecuteState::Proceed)
            }

            Mrr => {
                let t = Bank::try_from(ins[1])?;
                let n = ins[2];
                let t2 = Bank::try_from(ins[3])?;
                let n2 = ins[4];
                let value = self.reg(t2, n2);
                *self.reg_mut(t, n) = value;
                Ok(ExecuteState::Proceed)
            }

            Mrm => {
                let t = Bank::try_from(ins[1])?;
                let n = ins[2];
                let t2 = Bank::try_from(ins[3])?;
                let n2 = ins[4];
                self.op_mrm(t, n, t2, n2, ins[5])?;
                Ok(ExecuteState::Proceed)
            }

            Mmr => {
                let t = Bank::try_from(ins[1])?;
                let n = ins[2];
                let t2 = Bank::try_from(ins[3])?;
                let n2 = ins[4];
                self.op_mmr(t, n, t2, n2, ins[5])?;
                Ok(ExecuteState::Proceed)
            }

            Mlc => {
                let t = Bank::try_from(ins[1])?;
                let n = ins[2];
                let t2 = Bank::try_from(ins[3])?;
                let n2 = ins[4];
                let size = self.reg(t2, n2) as usize;
                let offset = self.heap.allocate(size);
                *self.reg_mut(t, n) = offset as u64;
                Ok(ExecuteState::Proceed)
            }

            Fre => {
                let t = Bank::try_from(ins[1])?;
                let n = ins[2];
                let offset = self.reg(t, n) as usize;
                self.heap.free(offset)?;
                Ok(ExecuteState::Proceed)
            }

            Wr => {
                let kind = WriteKind::try_from(ins[1])?;
                let t = Bank::try_from(ins[2])?;
                let n = ins[3];
                let value = self.reg(t, n);
                output::write_value(&mut self.out, kind, value, &self.heap)?;
                Ok(ExecuteState::Proceed)
            }

            Wrl => {
                output::write_newline(&mut self.out)?;
                Ok(ExecuteState::Proceed)
            }

            Add => self.binary_unsigned(ins, u64::wrapping_add),
            Sub => self.binary_unsigned(ins, u64::wrapping_sub),
            Uml => self.binary_unsigned(ins, u64::wrapping_mul),
            And => self.binary_unsigned(ins, |a, b| a & b),
            Or => self.binary_unsigned(ins, |a, b| a | b),
            Xor => self.binary_unsigned(ins, |a, b| a ^ b),
            Lsh => self.binary_unsigned(ins, |a, b| a.wrapping_shl((b % 64) as u32)),
            Rsh => self.binary_unsigned(ins, |a, b| a.wrapping_shr((b % 64) as u32)),

            Udv => self.binary_unsigned_checked(ins, |a, b| a / b),
            Umd => self.binary_unsigned_checked(ins, |a, b| a % b),

            Sml => self.binary_signed(ins, i64::wrapping_mul),
            Sdv => self.binary_signed_checked(ins, i64::wrapping_div),
            Smd => self.binary_signed_checked(ins, i64::wrapping_rem),

            Eq => self.compare_unsigned(ins, |a, b| a == b),
            Ult => self.compare_unsigned(ins, |a, b| a < b),
            Ugt => self.compare_unsigned(ins, |a, b| a > b),
            Slt => self.compare_signed(ins, |a, b| a < b),
            Sgt => self.compare_signed(ins, |a, b| a > b),

            Lnt => {
                self.set_flag(self.flag() == 0);
                Ok(ExecuteState::Proceed)
            }

            Bnt => {
                let t = Bank::try_from(ins[1])?;
                let n = ins[2];
                let value = self.reg(t, n);
                *self.reg_mut(t, n) = !value;
                Ok(ExecuteState::Proceed)
            }

            Min => {
                let t = Bank::try_from(ins[1])?;
                let n = ins[2];
                let value = self.reg(t, n) as i64;
                *self.reg_mut(t, n) = value.wrapping_neg() as u64;
                Ok(ExecuteState::Proceed)
            }
        }
    }
}
