//! Publication date display

use chrono::NaiveDateTime;

/// Moment-style tokens and their chrono equivalents, longest first so that
/// `MMMM` wins over `MM`
const TOKENS: &[(&str, &str)] = &[
    ("YYYY", "%Y"),
    ("MMMM", "%B"),
    ("DDDD", "%j"),
    ("dddd", "%A"),
    ("MMM", "%b"),
    ("ddd", "%a"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
];

/// Single-letter tokens. These only apply outside words, so the `A` in
/// `At` stays a letter.
const SHORT_TOKENS: &[(char, &str)] = &[
    ('Y', "%Y"),
    ('M', "%-m"),
    ('D', "%-d"),
    ('H', "%-H"),
    ('h', "%-I"),
    ('A', "%p"),
];

/// Render `date` with a Moment-style pattern such as `MMMM DD, YYYY`
pub fn format_date(date: &NaiveDateTime, pattern: &str) -> String {
    date.format(&to_strftime(pattern)).to_string()
}

/// Machine-readable date for `<time datetime="...">`
pub fn date_iso(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Translate a Moment-style pattern in one left-to-right pass.
///
/// Text inside `[...]` is copied verbatim, as is anything that is not a
/// token. `%` is escaped for strftime.
fn to_strftime(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;
    // last character copied through was a letter of plain text
    let mut in_word = false;

    'scan: while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(end) = rest.find(']') {
                push_literal(&mut out, &rest[1..end]);
                rest = &rest[end + 1..];
                in_word = false;
                continue;
            }
        }

        for (token, directive) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(directive);
                rest = tail;
                in_word = false;
                continue 'scan;
            }
        }

        let tail = &rest[c.len_utf8()..];
        let joins_word = tail.starts_with(|next: char| next.is_alphabetic() && !starts_token(next));
        if !in_word && !joins_word {
            if let Some((_, directive)) = SHORT_TOKENS.iter().find(|(token, _)| *token == c) {
                out.push_str(directive);
                rest = tail;
                continue;
            }
        }

        push_literal(&mut out, &rest[..c.len_utf8()]);
        in_word = c.is_alphabetic();
        rest = tail;
    }

    out
}

fn starts_token(c: char) -> bool {
    TOKENS.iter().any(|(token, _)| token.starts_with(c))
        || SHORT_TOKENS.iter().any(|(token, _)| *token == c)
}

fn push_literal(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn published() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&published(), "YYYY-MM-DD"), "2024-01-15");
        assert_eq!(
            format_date(&published(), "MMMM DD, YYYY"),
            "January 15, 2024"
        );
        assert_eq!(
            format_date(&published(), "ddd, MMM DD HH:mm"),
            "Mon, Jan 15 10:30"
        );
    }

    #[test]
    fn test_date_iso() {
        assert_eq!(date_iso(&published()), "2024-01-15T10:30:00");
    }

    #[test]
    fn test_to_strftime() {
        assert_eq!(to_strftime("DD/MM/YY"), "%d/%m/%y");
        assert_eq!(to_strftime("hh:mm A"), "%I:%M %p");
        assert_eq!(to_strftime("100% YYYY"), "100%% %Y");
    }

    #[test]
    fn test_single_letter_tokens() {
        assert_eq!(format_date(&published(), "MMM D, YYYY"), "Jan 15, 2024");
        assert_eq!(format_date(&published(), "D/M/Y"), "15/1/2024");
        assert_eq!(format_date(&published(), "h:mm A"), "10:30 AM");
        assert_eq!(format_date(&published(), "H:mm"), "10:30");
    }

    #[test]
    fn test_letters_inside_words_are_literal() {
        assert_eq!(format_date(&published(), "MMM DD At HH:mm"), "Jan 15 At 10:30");
    }

    #[test]
    fn test_bracketed_text_is_literal() {
        assert_eq!(
            format_date(&published(), "[Published] MMMM D [at] h A"),
            "Published January 15 at 10 AM"
        );
        assert_eq!(to_strftime("[100%] YY"), "100%% %y");
        assert_eq!(to_strftime("[open YYYY"), "[open %Y");
    }
}
