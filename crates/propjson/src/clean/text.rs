//! String-level sanitization shared by values and object keys.

/// Placeholder texts that stand for "no value" rather than real data.
const SENTINELS: [&str; 8] = [
    "nan",
    "none",
    "null",
    "infinity",
    "inf",
    "-inf",
    "undefined",
    "",
];

/// Replacement for a problematic character, `None` when it is kept as is.
fn replacement(c: char) -> Option<&'static str> {
    let r = match c {
        '\u{00A0}' => " ",
        '\u{00B2}' => " sqm",
        '\u{2013}' | '\u{2014}' => "-",
        '\u{2018}' | '\u{2019}' => "'",
        '\u{201C}' | '\u{201D}' => "\"",
        '\u{2022}' => "-",
        '\u{2026}' => "...",
        '\u{FEFF}' => "",
        _ => return None,
    };
    Some(r)
}

/// C0 controls other than tab/LF/CR, plus DEL and the C1 block.
fn is_stripped_control(c: char) -> bool {
    let u = c as u32;
    (u < 0x20 && !matches!(c, '\t' | '\n' | '\r')) || (0x7F..=0x9F).contains(&u)
}

/// Unicode noncharacters: U+FDD0..U+FDEF and the last two code points of
/// every plane.
pub(crate) fn is_noncharacter(c: char) -> bool {
    let u = c as u32;
    (0xFDD0..=0xFDEF).contains(&u) || (u & 0xFFFE) == 0xFFFE
}

/// Normalize typographic characters and drop characters that cannot be
/// interchanged safely. Idempotent.
pub fn sanitize_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if let Some(r) = replacement(c) {
            out.push_str(r);
        } else if is_stripped_control(c) || is_noncharacter(c) {
            continue;
        } else {
            out.push(c);
        }
    }
    out
}

/// Whether `s` is a missing-value marker such as `"NaN"`, `"None"` or `""`.
pub fn is_sentinel(s: &str) -> bool {
    let t = s.trim();
    SENTINELS.iter().any(|m| t.eq_ignore_ascii_case(m))
}
