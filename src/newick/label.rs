//! Escaping of vertex names for the Newick format.

/// Characters that force a name into single quotes.
const SPECIAL_CHARACTERS: &[char] = &[',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\''];

/// Returns `true` if `name` is wrapped in single quotes with every inner
/// quote doubled.
fn is_quoted(name: &str) -> bool {
    if name.len() < 2 || !name.starts_with('\'') || !name.ends_with('\'') {
        return false;
    }
    let inner = &name[1..name.len() - 1];
    inner.split("''").all(|part| !part.contains('\''))
}

/// Escapes a vertex name for use in a Newick string.
///
/// Names containing special characters are wrapped in single quotes, with
/// inner single quotes doubled. Otherwise spaces become underscores. Names
/// that are already quoted are returned as they are.
///
/// # Examples
/// ```
/// # use perfphylo::newick::escape_label;
/// assert_eq!(escape_label("c3"), "c3");
/// assert_eq!(escape_label("c2:1>2"), "'c2:1>2'");
/// assert_eq!(escape_label("Okarito kiwi"), "Okarito_kiwi");
/// assert_eq!(escape_label("Baillon's crake"), "'Baillon''s crake'");
/// assert_eq!(escape_label("'Baillon''s crake'"), "'Baillon''s crake'");
/// ```
pub fn escape_label(name: &str) -> String {
    if is_quoted(name) {
        name.to_string()
    } else if name.contains(SPECIAL_CHARACTERS) {
        format!("'{}'", name.replace('\'', "''"))
    } else {
        name.replace(' ', "_")
    }
}
