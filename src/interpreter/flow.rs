//! Call, return, and conditional-jump opcode bodies.

use std::io::Write;

use super::Interpreter;
use crate::error::RuntimeError;
use crate::opcode::Opcode;
use crate::state::ExecuteState;

impl<W: Write> Interpreter<W> {
    /// `CAL id`: push the resume point and the caller's locals, enter `id`
    /// with a fresh zero-initialized frame.
    pub(super) fn op_cal(&mut self, id: u16) -> Result<(), RuntimeError> {
        let return_pc = self.pc + Opcode::Cal.arg_len();
        self.enter_function(id, Some(return_pc))
    }

    /// `RTN`: unwind one call frame, or signal program termination if the
    /// call stack is already empty.
    pub(super) fn op_rtn(&mut self) -> ExecuteState {
        match self.frames.pop() {
            None => ExecuteState::Halted,
            Some(frame) => {
                self.function_id = frame.function_id();
                self.pc = frame.return_pc();
                self.locals = frame.into_locals();
                ExecuteState::Proceed
            }
        }
    }

    /// `GO2 label`: jump if the flag register is set, otherwise fall
    /// through by exactly the opcode's argument count.
    pub(super) fn op_go2(&mut self, label: u8) -> Result<(), RuntimeError> {
        if self.flag() != 0 {
            let offset = self
                .functions
                .get(self.function_id)
                .and_then(|f| f.label(label))
                .ok_or(RuntimeError::UndefinedLabel(label))?;
            self.pc = offset;
        } else {
            self.pc += Opcode::Go2.arg_len();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::assembler::Program;
    use crate::interpreter::Interpreter;
    use crate::opcode::{Bank, WriteKind};

    #[test]
    fn recursive_call_restores_caller_locals_on_return() {
        let mut asm = Program::new();
        asm.function(0)
            .mrl(Bank::Local, 1, 99)
            .cal(1)
            .wr(WriteKind::Unsigned, Bank::Local, 1)
            .rtn();
        asm.function(1).mrl(Bank::Local, 1, 7).rtn();

        let mut out = Vec::new();
        let mut vm = Interpreter::new(&asm.build(), &mut out).unwrap();
        vm.run().unwrap();
        assert_eq!(out, b"99");
    }

    #[test]
    fn go2_jumps_when_flag_is_set() {
        let mut asm = Program::new();
        asm.function(0)
            .mrl(Bank::Local, 1, 1)
            .mrl(Bank::Local, 2, 1)
            .eq(Bank::Local, 1, Bank::Local, 2)
            .go2(0)
            .wr(WriteKind::Unsigned, Bank::Local, 3) // skipped
            .label(0)
            .wr(WriteKind::Unsigned, Bank::Local, 1)
            .rtn();

        let mut out = Vec::new();
        let mut vm = Interpreter::new(&asm.build(), &mut out).unwrap();
        vm.run().unwrap();
        assert_eq!(out, b"1");
    }
}
