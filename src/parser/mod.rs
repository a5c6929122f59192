//! Parser for character matrix files.
//!
//! This module provides the [MatrixParser] for the whitespace-delimited
//! matrix format, along with supporting infrastructure for low-level byte
//! parsing and error handling.

pub mod byte_parser;
pub(crate) mod byte_source;
pub mod matrix;
pub mod parsing_error;

pub use matrix::{MatrixParser, parse_file, parse_str};
pub use parsing_error::{ParsingError, ParsingErrorType};
