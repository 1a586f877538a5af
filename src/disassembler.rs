use std::io::{self, Write};

use log::warn;

use crate::{
    chunk::{decode_u24, Chunk, LineInfo},
    error::{LoxError, Result},
    op_code::OpCode,
    value::Value,
};

pub fn disassemble_chunk(chunk: &Chunk, name: &str) -> Result<()> {
    write_chunk(&mut io::stdout().lock(), chunk, name)
}

pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> Result<usize> {
    write_instruction(&mut io::stdout().lock(), chunk, offset)
}

/// Write a header followed by every instruction in `chunk`
pub fn write_chunk<W: Write>(out: &mut W, chunk: &Chunk, name: &str) -> Result<()> {
    writeln!(out, "== {} ==", name)?;
    let mut offset = 0;
    while offset < chunk.len() {
        offset = write_instruction(out, chunk, offset)?;
    }
    Ok(())
}

/// Write the instruction at `offset` and return the offset of the next one.
///
/// Unknown opcodes are reported and skipped one byte at a time. Nothing is
/// written when the instruction's operands or its constant can't be read.
pub fn write_instruction<W: Write>(out: &mut W, chunk: &Chunk, offset: usize) -> Result<usize> {
    // Fails for any offset past the end, so indexing below is in bounds
    let line = chunk.get_line(offset)?;
    let byte = chunk.code()[offset];

    let Ok(opcode) = OpCode::try_from(byte) else {
        warn!("skipping unknown opcode {} at offset {}", byte, offset);
        write_prefix(out, offset, line)?;
        writeln!(out, "Unknown opcode {}", byte)?;
        return Ok(offset + 1);
    };

    match opcode {
        OpCode::Constant | OpCode::ConstantLong => {
            let index = read_index(chunk, opcode, offset)?;
            let value = chunk.constant(index)?;
            write_prefix(out, offset, line)?;
            constant_instruction(out, opcode, index, value)?;
        }
        OpCode::Negate
        | OpCode::Add
        | OpCode::Subtract
        | OpCode::Multiply
        | OpCode::Divide
        | OpCode::Return => {
            write_prefix(out, offset, line)?;
            simple_instruction(out, opcode)?;
        }
    }
    Ok(offset + opcode.size())
}

fn write_prefix<W: Write>(out: &mut W, offset: usize, line: LineInfo) -> io::Result<()> {
    write!(out, " {:04} ", offset)?;
    if line.is_run_start {
        write!(out, "{:4} ", line.line)
    } else {
        write!(out, "   | ")
    }
}

fn read_index(chunk: &Chunk, opcode: OpCode, offset: usize) -> Result<usize> {
    let index = match *chunk.operand(opcode, offset)? {
        [slot] => u32::from(slot),
        [b0, b1, b2] => decode_u24([b0, b1, b2]),
        _ => return Err(LoxError::TruncatedOperand { opcode, offset }),
    };
    Ok(index as usize)
}

fn simple_instruction<W: Write>(out: &mut W, opcode: OpCode) -> io::Result<()> {
    writeln!(out, "{:<16}", opcode.mnemonic())
}

fn constant_instruction<W: Write>(
    out: &mut W,
    opcode: OpCode,
    index: usize,
    value: Value,
) -> io::Result<()> {
    writeln!(out, "{:<16} {:4} '{}'", opcode.mnemonic(), index, value)
}
