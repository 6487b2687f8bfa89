//! Text splitting and number extraction

use aoc_core::ParseError;
use std::fmt::Display;
use std::str::FromStr;

/// Non-blank lines with trailing whitespace removed
pub fn lines(input: &str) -> impl Iterator<Item = &str> {
    input.lines().map(str::trim_end).filter(|line| !line.is_empty())
}

/// Groups of lines separated by one or more blank lines.
///
/// ```
/// use aoc_puzzles::utils::text::paragraphs;
///
/// let groups = paragraphs("abc\r\n\r\na\nb\n\n\n\nc\n");
/// assert_eq!(groups, vec![vec!["abc"], vec!["a", "b"], vec!["c"]]);
/// ```
pub fn paragraphs(input: &str) -> Vec<Vec<&str>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();
    for line in input.lines().map(str::trim_end) {
        if line.is_empty() {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Every integer in `s`, in order.
///
/// A `-` counts as a sign only when it does not follow a digit, so ranges
/// such as `1-3` yield `1, 3` while `x=-5` yields `-5`.
///
/// ```
/// use aoc_puzzles::utils::text::numbers;
///
/// let found: Vec<i64> = numbers("Sensor at x=-2, y=15; 1-3 a").unwrap();
/// assert_eq!(found, vec![-2, 15, 1, 3]);
/// ```
pub fn numbers<T>(s: &str) -> Result<Vec<T>, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    let bytes = s.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let negative = bytes[i] == b'-'
            && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
            && (i == 0 || !bytes[i - 1].is_ascii_digit());
        if negative || bytes[i].is_ascii_digit() {
            let start = i;
            i += 1;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            found.push(parse_num(&s[start..i])?);
        } else {
            i += 1;
        }
    }
    Ok(found)
}

/// Parse a trimmed number, naming the text in the error
pub fn parse_num<T>(s: &str) -> Result<T, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    let s = s.trim();
    s.parse()
        .map_err(|e| ParseError::invalid(format!("{s:?}: {e}")))
}

/// `str::split_once`, failing with a message naming `sep` and `s`
pub fn split_once_or<'a>(s: &'a str, sep: &str) -> Result<(&'a str, &'a str), ParseError> {
    s.split_once(sep)
        .ok_or_else(|| ParseError::invalid(format!("expected {sep:?} in {s:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lines_skip_blank_and_trailing_whitespace() {
        let found: Vec<_> = lines("a \r\n\nb\n\n").collect();
        assert_eq!(found, vec!["a", "b"]);
    }

    #[test]
    fn paragraphs_of_blank_input_are_empty() {
        assert!(paragraphs("\n\n").is_empty());
        assert!(paragraphs("").is_empty());
    }

    #[test]
    fn dash_between_digits_is_not_a_sign() {
        assert_eq!(numbers::<i32>("4-8,-3").unwrap(), vec![4, 8, -3]);
        assert_eq!(numbers::<u32>("mem[8] = 11").unwrap(), vec![8, 11]);
        assert!(numbers::<u8>("300").is_err());
    }

    #[test]
    fn split_once_or_reports_separator() {
        assert_eq!(split_once_or("a: b", ": ").unwrap(), ("a", "b"));
        let err = split_once_or("ab", " -> ").unwrap_err();
        assert!(err.to_string().contains("\" -> \""));
    }

    proptest! {
        #[test]
        fn numbers_recover_joined_values(values in prop::collection::vec(-1_000_000i64..1_000_000, 0..20)) {
            let text = values
                .iter()
                .map(|v| format!("v={v}"))
                .collect::<Vec<_>>()
                .join(", ");
            prop_assert_eq!(numbers::<i64>(&text).unwrap(), values);
        }

        #[test]
        fn paragraphs_keep_every_line(groups in prop::collection::vec(
            prop::collection::vec("[a-z]{1,5}", 1..4), 0..5)
        ) {
            let text = groups.iter().map(|g| g.join("\n")).collect::<Vec<_>>().join("\n\n");
            let parsed = paragraphs(&text);
            prop_assert_eq!(parsed, groups);
        }
    }
}
