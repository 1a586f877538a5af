use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

/// Every instruction starts with one of these tags. The operand bytes that
/// follow it are fixed by the tag alone, see [`OpCode::operand_width`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    IntoPrimitive,
    TryFromPrimitive,
    Display,
    IntoStaticStr,
    EnumIter,
    EnumCount,
)]
#[repr(u8)]
pub enum OpCode {
    /// Load constant for use. One byte pool index.
    #[strum(serialize = "OP_CONSTANT")]
    Constant,
    /// Load constant for use. Three byte little-endian pool index.
    #[strum(serialize = "OP_CONSTANT_LONG")]
    ConstantLong,
    #[strum(serialize = "OP_NEGATE")]
    Negate,
    #[strum(serialize = "OP_ADD")]
    Add,
    #[strum(serialize = "OP_SUBTRACT")]
    Subtract,
    #[strum(serialize = "OP_MULTIPLY")]
    Multiply,
    #[strum(serialize = "OP_DIVIDE")]
    Divide,
    #[strum(serialize = "OP_RETURN")]
    Return,
}

impl OpCode {
    /// Number of operand bytes following the tag
    pub const fn operand_width(self) -> usize {
        match self {
            OpCode::Constant => 1,
            OpCode::ConstantLong => 3,
            OpCode::Negate
            | OpCode::Add
            | OpCode::Subtract
            | OpCode::Multiply
            | OpCode::Divide
            | OpCode::Return => 0,
        }
    }

    /// Total bytes taken by the instruction, tag included
    pub const fn size(self) -> usize {
        1 + self.operand_width()
    }

    pub fn mnemonic(self) -> &'static str {
        self.into()
    }
}
