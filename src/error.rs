use thiserror::Error;

use crate::op_code::OpCode;

pub type Result<T> = std::result::Result<T, LoxError>;

#[derive(Debug, Error)]
pub enum LoxError {
    #[error("offset {offset} is outside of a chunk of {len} bytes")]
    OffsetOutOfRange { offset: usize, len: usize },
    #[error("constant {index} is outside of a pool of {len} constants")]
    ConstantOutOfRange { index: usize, len: usize },
    #[error("{opcode} at offset {offset} is missing its operand bytes")]
    TruncatedOperand { opcode: OpCode, offset: usize },
    #[error("Too many constants in one chunk.")]
    TooManyConstants,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
