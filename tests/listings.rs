#![cfg(feature = "debug_print_code")]

use std::{
    fs::{read_dir, read_to_string},
    thread,
};

use cplox::{
    chunk::Chunk,
    disassembler::{write_chunk, write_instruction},
    op_code::OpCode,
    value::Value,
};
use pretty_assertions::assert_eq;

#[test]
fn run_all_listings() {
    let dirs = read_dir("tests/listings").expect("Failed to read directory");
    let mut count = 0;
    for maybe_entry in dirs {
        let path = maybe_entry.expect("Failed to read entry").path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .expect("Failed to convert entry to string");
        dbg!(name);

        let chunk = build(name);
        let expected = read_to_string(&path).expect("Couldn't open file");
        assert_eq!(expected, listing(&chunk, name));
        count += 1;
    }
    assert_eq!(count, 4);
}

fn build(name: &str) -> Chunk {
    let mut chunk = Chunk::new();
    match name {
        "constant_return" => {
            let constant = chunk.add_constant(Value(1.2));
            chunk.write_op(OpCode::Constant, 1);
            chunk.write(constant as u8, 1);
            chunk.write_op(OpCode::Return, 1);
        }
        "arithmetic" => {
            chunk.write_constant(Value::from(1.2), 1).unwrap();
            chunk.write_constant(Value::from(3.4), 1).unwrap();
            chunk.write_op(OpCode::Add, 1);
            chunk.write_constant(Value::from(5.6), 2).unwrap();
            chunk.write_op(OpCode::Divide, 2);
            chunk.write_op(OpCode::Negate, 3);
            chunk.write_op(OpCode::Return, 3);
        }
        "long_constants" => {
            for i in 0..256 {
                chunk.add_constant(Value(i as f64));
            }
            chunk.write_constant(Value(2.5), 7).unwrap();
            chunk.write_op(OpCode::Negate, 7);
            chunk.write_op(OpCode::Constant, 8);
            chunk.write(0, 8);
            chunk.write_op(OpCode::Return, 8);
        }
        "unknown_opcode" => {
            chunk.write(255, 1);
            chunk.write(200, 1);
            chunk.write_op(OpCode::Return, 2);
        }
        _ => panic!("No chunk for listing {name}"),
    }
    chunk
}

fn listing(chunk: &Chunk, name: &str) -> String {
    let mut out = vec![];
    write_chunk(&mut out, chunk, name).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn walk_lands_exactly_on_the_end() {
    for name in ["constant_return", "arithmetic", "long_constants", "unknown_opcode"] {
        let chunk = build(name);
        let mut offsets = vec![];
        let mut offset = 0;
        while offset < chunk.len() {
            offsets.push(offset);
            offset = write_instruction(&mut Vec::<u8>::new(), &chunk, offset).unwrap();
        }
        assert_eq!(offset, chunk.len(), "{name} overshot with {offsets:?}");
    }
}

#[test]
fn built_chunks_can_be_read_from_many_threads() {
    let chunk = build("arithmetic");
    let expected = listing(&chunk, "shared");
    thread::scope(|scope| {
        let readers: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| listing(&chunk, "shared")))
            .collect();
        for reader in readers {
            assert_eq!(expected, reader.join().unwrap());
        }
    });
}
