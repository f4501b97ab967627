#![no_std]

#[cfg(test)]
extern crate std;

pub mod flag;
pub mod lexer;
pub mod parser;

pub use flag::FlagDef;
pub use lexer::Tokens;
pub use parser::{Error, ParsedFlags, UnknownFlag};
