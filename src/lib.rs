//#![warn(clippy::pedantic)]

#[cfg(feature = "debug_print_code")]
pub mod disassembler;

pub mod chunk;
pub mod error;
pub mod op_code;
pub mod scanner;
pub mod value;
