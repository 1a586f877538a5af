use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use cplox::{
    chunk::Chunk,
    disassembler::disassemble_chunk,
    error::Result,
    op_code::OpCode,
    scanner::{Scanner, TokenType},
    value::Value,
};
use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the tokens of a source file instead of the demo chunk
    #[arg(long, value_name = "FILE")]
    tokens: Option<PathBuf>,
    /// Header printed above the disassembled chunk
    #[arg(long, default_value = "test chunk")]
    title: String,
    /// Fill the pool with this many constants first, so later ones need OP_CONSTANT_LONG
    #[arg(long, default_value_t = 0)]
    pad_constants: usize,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(error) = SimpleLogger::new().with_level(level).init() {
        eprintln!("Unable to install logger: {}", error);
    }
    debug!("{:?}", args);

    match args.tokens {
        Some(path) => dump_tokens(&path),
        None => {
            if let Err(error) = demo(&args.title, args.pad_constants) {
                eprintln!("{}", error);
                process::exit(65);
            }
        }
    }
}

fn demo(title: &str, pad_constants: usize) -> Result<()> {
    let mut chunk = Chunk::new();
    for i in 0..pad_constants {
        chunk.add_constant(Value(i as f64));
    }
    chunk.write_constant(Value(1.2), 1)?;
    chunk.write_op(OpCode::Return, 1);
    debug!(
        "built {} bytes in {} line runs",
        chunk.len(),
        chunk.lines().len()
    );
    disassemble_chunk(&chunk, title)
}

fn dump_tokens(path: &Path) {
    let source = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) => {
            eprint!("Unable to read file {}: {}", path.display(), error);
            process::exit(74);
        }
    };

    let mut scanner = Scanner::new(&source);
    let mut line = 0;
    loop {
        let token = scanner.scan_token();
        if token.line != line {
            print!("{:4} ", token.line);
            line = token.line;
        } else {
            print!("   | ");
        }
        println!("{:?} '{}'", token.token_type, token.lexeme);

        if token.token_type == TokenType::Eof {
            break;
        }
    }
}
