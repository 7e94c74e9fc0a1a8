//! Field-level parsing of `INSERT INTO ... VALUES(...)` statements

use crate::error::DumpError;

/// Text strictly between the first `(` and the last `)` of a statement
///
/// Returns an empty string if the statement has no such pair.
pub fn argument_list(line: &str) -> &str {
    match (line.find('('), line.rfind(')')) {
        (Some(open), Some(close)) if open < close => &line[open + 1..close],
        _ => "",
    }
}

/// Split a SQL value list into fields
///
/// The list is read as a single CSV record with `'` as the quote
/// character, so quoted fields may contain commas and `''` stands for one
/// literal quote. Whitespace is kept as-is.
pub fn split_fields(args: &str, line: usize) -> Result<Vec<String>, DumpError> {
    // csv closes an open quoted field silently at end of input
    if has_unterminated_quote(args) {
        return Err(DumpError::UnterminatedQuote { line });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .quote(b'\'')
        .double_quote(true)
        .flexible(true)
        .from_reader(args.as_bytes());

    let mut record = csv::StringRecord::new();
    if reader.read_record(&mut record)? {
        Ok(record.iter().map(str::to_string).collect())
    } else {
        Ok(Vec::new())
    }
}

/// Whether a quoted field is still open at the end of the value list
///
/// Mirrors csv's quoting: a quote only opens a field at its start, and a
/// doubled quote inside a quoted field is a literal.
fn has_unterminated_quote(args: &str) -> bool {
    let mut at_field_start = true;
    let mut in_quotes = false;
    let mut chars = args.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
        } else if c == '\'' && at_field_start {
            in_quotes = true;
            at_field_start = false;
        } else {
            at_field_start = c == ',';
        }
    }

    in_quotes
}

/// Best-effort integer value of a field
///
/// SQL numeric literals such as `5.0` are accepted and truncated.
/// Anything else (`NULL`, text, an empty field) yields `None`.
pub fn parse_int(field: &str) -> Option<i64> {
    let field = field.trim();
    if let Ok(value) = field.parse::<i64>() {
        return Some(value);
    }

    let value = field.parse::<f64>().ok()?;
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_and_quoted_fields() {
        assert_eq!(split_fields("a,'b,c',d", 1).unwrap(), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_split_doubled_quote() {
        assert_eq!(split_fields("a,'b''c'", 1).unwrap(), vec!["a", "b'c"]);
    }

    #[test]
    fn test_split_keeps_whitespace_and_empty_fields() {
        assert_eq!(
            split_fields("1, 2,'',NULL", 1).unwrap(),
            vec!["1", " 2", "", "NULL"]
        );
    }

    #[test]
    fn test_split_empty_list() {
        assert!(split_fields("", 1).unwrap().is_empty());
    }

    #[test]
    fn test_split_unterminated_quote_fails() {
        let err = split_fields("1,'never closed", 7).unwrap_err();
        assert!(matches!(err, DumpError::UnterminatedQuote { line: 7 }));

        assert!(split_fields("'it''s", 1).is_err());
    }

    #[test]
    fn test_quote_inside_unquoted_field_is_literal() {
        assert_eq!(split_fields("X'01',2", 1).unwrap(), vec!["X'01'", "2"]);
    }

    #[test]
    fn test_argument_list() {
        assert_eq!(
            argument_list(r#"INSERT INTO "CoreTracks" VALUES(1,2,'(x)');"#),
            "1,2,'(x)'"
        );
        assert_eq!(argument_list("CREATE INDEX foo;"), "");
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("5"), Some(5));
        assert_eq!(parse_int("5.0"), Some(5));
        assert_eq!(parse_int("7.9"), Some(7));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("NULL"), None);
        assert_eq!(parse_int("inf"), None);
        assert_eq!(parse_int("NaN"), None);
    }
}
