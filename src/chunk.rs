use log::trace;

use crate::{
    error::{LoxError, Result},
    op_code::OpCode,
    value::Value,
};

/// Largest pool index reachable through `OpCode::ConstantLong`
pub const MAX_LONG_CONSTANT: usize = (1 << 24) - 1;

/// `length` consecutive bytes of code that came from source line `line`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRun {
    pub line: u32,
    pub length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInfo {
    pub line: u32,
    /// The byte before this one, if any, belongs to a different run
    pub is_run_start: bool,
}

#[derive(Debug, Default)]
pub struct Chunk {
    code: Vec<u8>,
    constants: Vec<Value>,
    // Sum of all run lengths always equals code.len()
    lines: Vec<LineRun>,
}

impl Chunk {
    pub fn new() -> Chunk {
        Chunk {
            code: vec![],
            constants: vec![],
            lines: vec![],
        }
    }

    /// Append a raw byte which originated from `line`
    pub fn write(&mut self, byte: u8, line: u32) {
        self.code.push(byte);
        match self.lines.last_mut() {
            Some(run) if run.line == line => run.length += 1,
            _ => {
                trace!("line {} starts at offset {}", line, self.code.len() - 1);
                self.lines.push(LineRun { line, length: 1 });
            }
        }
    }

    pub fn write_op(&mut self, opcode: OpCode, line: u32) {
        self.write(opcode.into(), line);
    }

    /// Add a value to the pool and return its index. Indices are never reused.
    pub fn add_constant(&mut self, value: Value) -> usize {
        self.constants.push(value);
        self.constants.len() - 1
    }

    /// Add `value` to the pool and emit the instruction loading it, picking the
    /// short form whenever the index fits in a byte.
    pub fn write_constant(&mut self, value: Value, line: u32) -> Result<usize> {
        let index = self.constants.len();
        if index > MAX_LONG_CONSTANT {
            return Err(LoxError::TooManyConstants);
        }
        self.add_constant(value);
        match u8::try_from(index) {
            Ok(slot) => {
                self.write_op(OpCode::Constant, line);
                self.write(slot, line);
            }
            Err(_) => {
                self.write_op(OpCode::ConstantLong, line);
                for byte in encode_u24(index as u32) {
                    self.write(byte, line);
                }
            }
        }
        Ok(index)
    }

    /// Find the source line of the byte at `offset`
    pub fn get_line(&self, offset: usize) -> Result<LineInfo> {
        let mut run_start = 0;
        for run in &self.lines {
            let run_end = run_start + run.length;
            if offset < run_end {
                return Ok(LineInfo {
                    line: run.line,
                    is_run_start: offset == run_start,
                });
            }
            run_start = run_end;
        }
        Err(LoxError::OffsetOutOfRange {
            offset,
            len: self.code.len(),
        })
    }

    pub fn constant(&self, index: usize) -> Result<Value> {
        self.constants
            .get(index)
            .copied()
            .ok_or(LoxError::ConstantOutOfRange {
                index,
                len: self.constants.len(),
            })
    }

    /// The operand bytes of the instruction starting at `offset`
    pub fn operand(&self, opcode: OpCode, offset: usize) -> Result<&[u8]> {
        offset
            .checked_add(1)
            .and_then(|start| Some(start..start.checked_add(opcode.operand_width())?))
            .and_then(|range| self.code.get(range))
            .ok_or(LoxError::TruncatedOperand { opcode, offset })
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn constants(&self) -> &[Value] {
        &self.constants
    }

    pub fn lines(&self) -> &[LineRun] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

/// Split the low 24 bits of `index` into little-endian bytes
pub const fn encode_u24(index: u32) -> [u8; 3] {
    let [b0, b1, b2, _] = index.to_le_bytes();
    [b0, b1, b2]
}

pub const fn decode_u24(bytes: [u8; 3]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0])
}
