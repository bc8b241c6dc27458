//! An 8-bit, byte-addressed register machine: 256 bytes of memory, eight
//! general purpose registers and a fetch-decode-execute loop.

pub mod alu;
pub mod error;
pub mod memory;
pub mod processor;
pub mod registers;
