#[macro_use]
extern crate lazy_static;

pub mod container;
pub mod disassembler;
pub mod instruction;
pub mod opcode_tables;
pub mod text;
