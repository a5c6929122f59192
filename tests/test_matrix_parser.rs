use perfphylo::parser::byte_parser::ByteParser;
use perfphylo::parser::{MatrixParser, ParsingError, ParsingErrorType, parse_file, parse_str};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn error_kind(input: &str) -> ParsingErrorType {
    parse_str(input).unwrap_err().kind().cloned().unwrap()
}

// --- WELL-FORMED INPUT ---
#[test]
fn test_separators_comments_and_blank_lines() {
    let input = "# matrix\n\n1 0\t1\n0,1 , 0  # trailing comment\n\n";
    let (matrix, labels) = parse_str(input).unwrap();

    assert_eq!(matrix.num_taxa(), 2);
    assert_eq!(matrix.num_characters(), 3);
    assert_eq!(matrix.row(0), &[1, 0, 1]);
    assert_eq!(matrix.row(1), &[0, 1, 0]);
    assert_eq!(labels.get_label(0), Some("t1"));
}

#[test]
fn test_float_notation() {
    let (matrix, _) = parse_str("1.0 2.000e+00 0e0\n").unwrap();
    assert_eq!(matrix.row(0), &[1, 2, 0]);
}

#[test]
fn test_windows_line_ends() {
    let (matrix, _) = parse_str("1 0\r\n0 1\r\n").unwrap();
    assert_eq!(matrix.num_taxa(), 2);
    assert_eq!(matrix.row(1), &[0, 1]);
}

#[test]
fn test_lone_carriage_return_is_rejected() {
    assert_eq!(error_kind("1\r0\n"), ParsingErrorType::InvalidState("1\r0".to_string()));
}

#[test]
fn test_named_taxa() {
    let (matrix, labels) = parse_str("Apteryx_haastii 1 0\nApteryx_rowi 0 1\n").unwrap();
    assert_eq!(matrix.num_taxa(), 2);
    assert_eq!(labels.num_labels(), 2);
    assert_eq!(labels.get_index("Apteryx_rowi"), Some(1));
}

#[test]
fn test_rows_without_states() {
    let (matrix, labels) = parse_str("a\nb\n").unwrap();
    assert_eq!(matrix.num_taxa(), 2);
    assert_eq!(matrix.num_characters(), 0);
    assert_eq!(labels.get_label(1), Some("b"));
}

#[test]
fn test_parser_from_byte_parser() {
    let parser = MatrixParser::new(ByteParser::from_str("0 1\n1 1"));
    let (matrix, _) = parser.parse().unwrap();
    assert_eq!(matrix.row(1), &[1, 1]);
}

// --- MALFORMED INPUT ---
#[test]
fn test_empty_input() {
    assert_eq!(error_kind(""), ParsingErrorType::EmptyMatrix);
    assert_eq!(error_kind("# nothing here\n\n"), ParsingErrorType::EmptyMatrix);
}

#[test]
fn test_ragged_row_reports_line() {
    let err = parse_str("# header\n\n1 0\n1 0 0\n").unwrap_err();
    assert_eq!(err.kind(), Some(&ParsingErrorType::RaggedRow { expected: 2, found: 3 }));
    assert_eq!(err.line(), Some(4));
}

#[test]
fn test_invalid_states() {
    let err = parse_str("1 x\n").unwrap_err();
    assert_eq!(err.kind(), Some(&ParsingErrorType::InvalidState("x".to_string())));
    assert_eq!(err.position(), Some(2));

    assert_eq!(error_kind("0.5 1\n"), ParsingErrorType::InvalidState("0.5".to_string()));
    assert_eq!(error_kind("1 -1\n"), ParsingErrorType::InvalidState("-1".to_string()));
    assert_eq!(error_kind("a 1 b\n"), ParsingErrorType::InvalidState("b".to_string()));
}

#[test]
fn test_mixed_taxon_labels() {
    assert_eq!(error_kind("a 1\n0 1\n"), ParsingErrorType::MixedTaxonLabels);
    assert_eq!(error_kind("1 0\nb 0 1\n"), ParsingErrorType::MixedTaxonLabels);
}

#[test]
fn test_naming_checked_before_row_width() {
    let err = parse_str("a 1 0\n0 1 1\n").unwrap_err();
    assert_eq!(err.kind(), Some(&ParsingErrorType::MixedTaxonLabels));
    assert_eq!(err.line(), Some(2));

    assert_eq!(error_kind("0 1\nb 0\n"), ParsingErrorType::MixedTaxonLabels);
    assert_eq!(
        error_kind("a 1\nb 0 1\n"),
        ParsingErrorType::RaggedRow { expected: 1, found: 2 }
    );
}

#[test]
fn test_duplicate_taxon() {
    let err = parse_str("kea 1\nkaka 0\nkea 0\n").unwrap_err();
    assert_eq!(err.kind(), Some(&ParsingErrorType::DuplicateTaxon("kea".to_string())));
    assert_eq!(err.line(), Some(3));
}

#[test]
fn test_error_message_has_line_and_context() {
    let message = parse_str("1 0\n0 1 zz 1\n").unwrap_err().to_string();
    assert!(message.contains("line 2"));
    assert!(message.contains("zz"));
}

// --- FILES ---
#[test]
fn test_named_file() {
    let (matrix, labels) = parse_file(fixture("two_state_named.txt")).unwrap();
    assert_eq!(matrix.num_taxa(), 3);
    assert_eq!(matrix.row(1), &[0, 0, 1]);
    assert_eq!(labels.labels(), &["kiwi", "takahe", "kea"]);
}

#[test]
fn test_float_formatted_file() {
    let (matrix, _) = parse_file(fixture("three_state.txt")).unwrap();
    assert_eq!(matrix.num_taxa(), 4);
    assert_eq!(matrix.row(2), &[2, 1]);
}

#[test]
fn test_missing_file() {
    let err = parse_file(fixture("does_not_exist.txt")).unwrap_err();
    assert!(matches!(err, ParsingError::Io(_)));
    assert_eq!(err.kind(), None);
}
