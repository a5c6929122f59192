//! Error types for the matrix parser.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while reading character matrix files.

use crate::model::matrix::MatrixError;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use std::io;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur while parsing a character matrix.
#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum ParsingErrorType {
    #[error("No rows in matrix")]
    EmptyMatrix,
    #[error("Invalid state '{0}' - expected a non-negative integral number")]
    InvalidState(String),
    #[error("Row has {found} states but previous rows have {expected}")]
    RaggedRow { expected: usize, found: usize },
    #[error("Either all rows or no row must start with a taxon name")]
    MixedTaxonLabels,
    #[error("Taxon name '{0}' used more than once")]
    DuplicateTaxon(String),
}

// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error, with line, byte position and surrounding bytes for syntax
/// errors.
#[derive(Error, Debug)]
pub enum ParsingError {
    /// Reading the input failed
    #[error("IO error - {0}")]
    Io(#[from] io::Error),
    /// Input is not a well-formed matrix
    #[error("{kind} at line {line} (position {position}){}", format_context(.context))]
    Syntax {
        kind: ParsingErrorType,
        line: usize,
        position: usize,
        context: String,
    },
    /// Parsed rows do not form a valid matrix
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

fn format_context(context: &str) -> String {
    if context.is_empty() {
        String::new()
    } else {
        format!("\n  Context (next {} bytes): {}", context.len(), context)
    }
}

impl ParsingError {
    /// Create a ParsingError from an error type and parser state
    pub fn from_parser<S: ByteSource>(kind: ParsingErrorType, parser: &ByteParser<S>) -> Self {
        Self::Syntax {
            kind,
            line: parser.line(),
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Create a ParsingError pointing at an earlier byte `position` on the
    /// parser's current line, with the given `context`
    pub fn at_position<S: ByteSource>(
        kind: ParsingErrorType,
        parser: &ByteParser<S>,
        position: usize,
        context: String,
    ) -> Self {
        Self::Syntax {
            kind,
            line: parser.line(),
            position,
            context,
        }
    }

    /// Convenience constructor for EmptyMatrix
    pub fn empty_matrix<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParsingErrorType::EmptyMatrix, parser)
    }

    /// Get the error kind, if this is a syntax error
    pub fn kind(&self) -> Option<&ParsingErrorType> {
        match self {
            Self::Syntax { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Get the 1-based line where the error occurred, if this is a syntax error
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Get the byte position where the error occurred, if this is a syntax error
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}
