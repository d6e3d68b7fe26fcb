//! Opcode representation shared by the function table builder and the
//! execution engine.

use crate::error::LoadError;

/// A decoded PTB opcode.
///
/// The numeric values are load-bearing: they are exactly the opcode bytes
/// that appear in the PTB stream, in the dense order the reference encoder
/// emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Fn = 0,
    Cal = 1,
    Rtn = 2,
    Go2 = 3,
    Lbl = 4,
    Mrl = 5,
    Mrr = 6,
    Mrm = 7,
    Mmr = 8,
    Mlc = 9,
    Fre = 10,
    Wr = 11,
    Wrl = 12,
    Add = 13,
    Sub = 14,
    Sml = 15,
    Uml = 16,
    Sdv = 17,
    Udv = 18,
    Smd = 19,
    Umd = 20,
    Lsh = 21,
    Rsh = 22,
    And = 23,
    Or = 24,
    Xor = 25,
    Eq = 26,
    Slt = 27,
    Ult = 28,
    Sgt = 29,
    Ugt = 30,
    Lnt = 31,
    Bnt = 32,
    Min = 33,
}

impl Opcode {
    /// Total instruction length in bytes, including the opcode byte itself.
    pub const fn arg_len(self) -> usize {
        use Opcode::*;
        match self {
            Fn => 3,
            Cal => 3,
            Rtn => 1,
            Go2 => 2,
            Lbl => 2,
            Mrl => 7,
            Mrr => 5,
            Mrm => 6,
            Mmr => 6,
            Mlc => 5,
            Fre => 3,
            Wr => 4,
            Wrl => 1,
            Add | Sub | Sml | Uml | Sdv | Udv | Smd | Umd | Lsh | Rsh | And | Or | Xor | Eq | Slt | Ult | Sgt
            | Ugt => 5,
            Lnt => 1,
            Bnt => 3,
            Min => 3,
        }
    }

    /// Whether this opcode rewrites the program counter itself, meaning the
    /// dispatch loop must not apply the normal post-instruction advance.
    pub const fn controls_flow(self) -> bool {
        matches!(self, Opcode::Cal | Opcode::Rtn | Opcode::Go2)
    }
}

impl TryFrom<u8> for Opcode {
    type Error = LoadError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        use Opcode::*;
        Ok(match byte {
            0 => Fn,
            1 => Cal,
            2 => Rtn,
            3 => Go2,
            4 => Lbl,
            5 => Mrl,
            6 => Mrr,
            7 => Mrm,
            8 => Mmr,
            9 => Mlc,
            10 => Fre,
            11 => Wr,
            12 => Wrl,
            13 => Add,
            14 => Sub,
            15 => Sml,
            16 => Uml,
            17 => Sdv,
            18 => Udv,
            19 => Smd,
            20 => Umd,
            21 => Lsh,
            22 => Rsh,
            23 => And,
            24 => Or,
            25 => Xor,
            26 => Eq,
            27 => Slt,
            28 => Ult,
            29 => Sgt,
            30 => Ugt,
            31 => Lnt,
            32 => Bnt,
            33 => Min,
            n => return Err(LoadError::InvalidInstruction(n)),
        })
    }
}

/// Register bank selector (the 1-bit register-type tag).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Bank {
    Local = 0,
    Global = 1,
}

impl TryFrom<u8> for Bank {
    type Error = LoadError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0 => Ok(Bank::Local),
            1 => Ok(Bank::Global),
            n => Err(LoadError::InvalidRegisterBank(n)),
        }
    }
}

/// The formatting requested by a `WR` instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WriteKind {
    Signed = 0,
    Unsigned = 1,
    Char = 2,
    Str = 3,
}

impl TryFrom<u8> for WriteKind {
    type Error = LoadError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        use WriteKind::*;
        match byte {
            0 => Ok(Signed),
            1 => Ok(Unsigned),
            2 => Ok(Char),
            3 => Ok(Str),
            n => Err(LoadError::InvalidWriteKind(n)),
        }
    }
}
