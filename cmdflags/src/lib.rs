//! cmdflags, a presence-only command flag parser for chat command dispatchers.
#![no_std]
#![deny(missing_docs)]

pub use cmdflags_macros as macros;
pub use cmdflags_parser as parser;

pub use macros::Flags;
pub use parser::{FlagDef, ParsedFlags, Tokens, UnknownFlag};

/// Defines the possible errors that may occur during usage of the crate.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// An error comes from the parsing of flags.
    #[error(transparent)]
    Parser(#[from] parser::Error),
}
