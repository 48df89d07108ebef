use crate::value::Number;

/// Format a finite f64 as a JSON number.
///
/// Uses the shortest representation that round-trips. Exponents are kept
/// (`1e300` rather than three hundred digits) since JSON allows them, and
/// integral floats keep their `.0` so they read back as floats.
pub(crate) fn format_json_f64(value: f64) -> String {
    if !value.is_finite() {
        debug_assert!(false, "format_json_f64 called with non-finite value");
        return String::from("null");
    }
    let mut buf = ryu::Buffer::new();
    String::from(buf.format_finite(value))
}

/// JSON forbids `01`, `-007` and friends; `0`, `0.5` and `0e1` are fine.
pub(crate) fn has_forbidden_leading_zeros(token: &str) -> bool {
    let token = token.strip_prefix('-').unwrap_or(token);
    let bytes = token.as_bytes();
    if bytes.len() <= 1 || bytes[0] != b'0' {
        return false;
    }
    bytes[1].is_ascii_digit()
}

/// Convert a grammar-checked numeric token into the narrowest [`Number`].
///
/// Integers that fit go to `I64`/`U64`; anything with a fraction, an
/// exponent or outside the 64-bit range becomes `F64`.
pub(crate) fn number_from_token(token: &str) -> Option<Number> {
    let bs = token.as_bytes();
    let integral = !bs.is_empty()
        && bs
            .iter()
            .enumerate()
            .all(|(i, c)| c.is_ascii_digit() || (i == 0 && *c == b'-'));
    if integral {
        if bs[0] == b'-' {
            if let Ok(i) = token.parse::<i64>() {
                return Some(Number::I64(i));
            }
        } else if let Ok(u) = token.parse::<u64>() {
            return Some(Number::U64(u));
        }
    }
    token.parse::<f64>().ok().map(Number::F64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_format_as_valid_json() {
        assert_eq!(format_json_f64(1.5), "1.5");
        assert_eq!(format_json_f64(3.0), "3.0");
        assert_eq!(format_json_f64(1e300), "1e300");
        assert_eq!(format_json_f64(-0.25), "-0.25");
    }

    #[test]
    fn leading_zero_rules() {
        assert!(has_forbidden_leading_zeros("01"));
        assert!(has_forbidden_leading_zeros("-00"));
        assert!(!has_forbidden_leading_zeros("0"));
        assert!(!has_forbidden_leading_zeros("0.5"));
        assert!(!has_forbidden_leading_zeros("-0e3"));
        assert!(!has_forbidden_leading_zeros("10"));
    }

    #[test]
    fn narrowest_number_kind() {
        assert_eq!(number_from_token("42"), Some(Number::U64(42)));
        assert_eq!(number_from_token("-42"), Some(Number::I64(-42)));
        assert_eq!(number_from_token("4.5"), Some(Number::F64(4.5)));
        assert_eq!(number_from_token("1e2"), Some(Number::F64(100.0)));
        assert_eq!(
            number_from_token("184467440737095516160"),
            Some(Number::F64(184467440737095516160.0))
        );
    }
}
