//! Parser for whitespace-delimited character matrix files.
//!
//! # Format
//! ```text
//! # comments run to the end of the line
//! 1 0 2
//! 0,0,1        # spaces, tabs and commas separate entries
//! 1.0 0.0 2e0  # any float notation of an integral state
//! ```
//! One taxon per line; blank and comment-only lines are skipped. The first
//! token of a row may be a non-numeric taxon name, in which case every row
//! must be named:
//! ```text
//! kiwi    1 0 2
//! takahe  0 1 1
//! ```

use crate::model::character::State;
use crate::model::leaf_label_map::TaxonLabelMap;
use crate::model::matrix::CharacterMatrix;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use std::path::Path;
use tracing::debug;

// =#========================================================================#=
// MATRIX PARSER
// =#========================================================================#=
/// Parses a character matrix and its taxon names.
///
/// Unnamed rows get the names `t1, t2, ...` in row order.
///
/// # Example
/// ```
/// use perfphylo::parser::MatrixParser;
///
/// let (matrix, labels) = MatrixParser::for_str("a 1 0\nb 0 1\n").parse()?;
/// assert_eq!(matrix.num_taxa(), 2);
/// assert_eq!(labels.get_index("b"), Some(1));
/// # Ok::<(), perfphylo::parser::ParsingError>(())
/// ```
pub struct MatrixParser<S: ByteSource> {
    parser: ByteParser<S>,
    rows: Vec<Vec<State>>,
    names: Option<TaxonLabelMap>,
}

impl MatrixParser<InMemoryByteSource> {
    /// Creates a parser for a matrix given as string.
    pub fn for_str(input: &str) -> Self {
        Self::new(ByteParser::from_str(input))
    }

    /// Creates a parser for the matrix file at `path`.
    ///
    /// # Errors
    /// Returns [ParsingError::Io] if the file cannot be read
    pub fn for_file<P: AsRef<Path>>(path: P) -> Result<Self, ParsingError> {
        Ok(Self::new(ByteParser::from_file(path)?))
    }
}

impl<S: ByteSource> MatrixParser<S> {
    /// Creates a parser reading from `parser`.
    pub fn new(parser: ByteParser<S>) -> Self {
        Self {
            parser,
            rows: Vec::new(),
            names: None,
        }
    }

    /// Parses all rows.
    ///
    /// # Returns
    /// The matrix and the taxon names, by row index.
    ///
    /// # Errors
    /// A [ParsingError::Syntax] for malformed input: no rows, non-integral or
    /// negative states, rows of unequal length, rows mixing named and
    /// unnamed taxa, or repeated taxon names.
    pub fn parse(mut self) -> Result<(CharacterMatrix, TaxonLabelMap), ParsingError> {
        loop {
            self.parse_line()?;
            if !self.parser.consume_line_end() {
                break;
            }
        }

        if self.rows.is_empty() {
            return Err(ParsingError::empty_matrix(&self.parser));
        }

        let num_taxa = self.rows.len();
        let labels = self
            .names
            .unwrap_or_else(|| TaxonLabelMap::numbered(num_taxa));
        let matrix = CharacterMatrix::from_rows(self.rows)?;
        debug!(
            num_taxa = matrix.num_taxa(),
            num_characters = matrix.num_characters(),
            "parsed matrix"
        );
        Ok((matrix, labels))
    }

    /// Parses the current line up to, but not including, its line end.
    fn parse_line(&mut self) -> Result<(), ParsingError> {
        let mut name = None;
        let mut row = Vec::new();

        while let Some((position, token)) = self.next_token() {
            if let Some(state) = parse_state(&token) {
                row.push(state);
            } else if row.is_empty() && name.is_none() && is_taxon_name(&token) {
                name = Some((position, token));
            } else {
                return Err(ParsingError::at_position(
                    ParsingErrorType::InvalidState(token.clone()),
                    &self.parser,
                    position,
                    token,
                ));
            }
        }

        // Blank or comment-only line
        if name.is_none() && row.is_empty() {
            return Ok(());
        }

        self.record_name(name)?;
        if let Some(expected) = self.rows.first().map(Vec::len)
            && row.len() != expected
        {
            return Err(ParsingError::from_parser(
                ParsingErrorType::RaggedRow {
                    expected,
                    found: row.len(),
                },
                &self.parser,
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Checks that rows are either all named or all unnamed, and that names
    /// are unique.
    fn record_name(&mut self, name: Option<(usize, String)>) -> Result<(), ParsingError> {
        let Some((position, name)) = name else {
            if self.names.is_some() {
                return Err(ParsingError::from_parser(
                    ParsingErrorType::MixedTaxonLabels,
                    &self.parser,
                ));
            }
            return Ok(());
        };

        if self.rows.is_empty() {
            self.names = Some(TaxonLabelMap::new(0));
        }
        let Some(names) = self.names.as_mut() else {
            return Err(ParsingError::at_position(
                ParsingErrorType::MixedTaxonLabels,
                &self.parser,
                position,
                name,
            ));
        };

        if names.contains_label(&name) {
            return Err(ParsingError::at_position(
                ParsingErrorType::DuplicateTaxon(name.clone()),
                &self.parser,
                position,
                name,
            ));
        }
        names.get_or_insert(&name);
        Ok(())
    }

    /// Returns the next token on the current line and its start position.
    fn next_token(&mut self) -> Option<(usize, String)> {
        if self.parser.at_line_end() {
            return None;
        }
        let position = self.parser.position();
        self.parser.next_token().map(|token| (position, token))
    }
}

/// Parses a token holding an integral state in any float notation.
fn parse_state(token: &str) -> Option<State> {
    let value: f64 = token.parse().ok()?;
    if value.fract() == 0.0 && (0.0..=State::MAX as f64).contains(&value) {
        Some(value as State)
    } else {
        None
    }
}

/// Whether a token is a number, integral or not.
fn is_numeric(token: &str) -> bool {
    token.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Whether a token can name a taxon: not a number, no control characters.
fn is_taxon_name(token: &str) -> bool {
    !is_numeric(token) && !token.chars().any(char::is_control)
}

// =#========================================================================#=
// QUICK ACCESS
// =#========================================================================#=
/// Parses a character matrix from a string.
///
/// See [MatrixParser] for the format.
pub fn parse_str(input: &str) -> Result<(CharacterMatrix, TaxonLabelMap), ParsingError> {
    MatrixParser::for_str(input).parse()
}

/// Parses the character matrix file at `path`.
///
/// See [MatrixParser] for the format.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<(CharacterMatrix, TaxonLabelMap), ParsingError> {
    MatrixParser::for_file(path)?.parse()
}
