// ============================================================
// LOCALE NUMBER PARSING
// ============================================================
// French-formatted numbers: "9 595,51 €", "12,34%", "29 836"

/// A numeric cell value, `None` when the cell is absent or unparseable
pub type ParsedValue = Option<f64>;

/// Whitespace as stripped from exports: Unicode White_Space plus the BOM
fn is_export_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn finite(value: f64) -> ParsedValue {
    value.is_finite().then_some(value)
}

/// Parse a French-formatted number.
///
/// Removes every whitespace character (including non-breaking spaces), the first
/// `€` and the first `%`, every `.` (thousands separator), then turns the first `,`
/// into the decimal point. Returns `None` for absent, empty or unparseable input;
/// it never falls back to zero.
pub fn parse_locale_number(value: Option<&str>) -> ParsedValue {
    let raw = value?;
    if raw.is_empty() {
        return None;
    }

    let stripped: String = raw.chars().filter(|c| !is_export_whitespace(*c)).collect();
    let mut cleaned = stripped.replacen('€', "", 1).replacen('%', "", 1);
    cleaned.retain(|c| c != '.');
    let cleaned = cleaned.replacen(',', ".", 1);

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().and_then(finite)
}

/// Parse a currency amount the way the campaign exports are read elsewhere:
/// whitespace and the first `€` removed, first `,` as decimal point, then the
/// longest leading decimal is taken. Dots are kept, so `"1.5 €"` stays 1.5.
pub fn parse_currency(value: Option<&str>) -> ParsedValue {
    let raw = value?;
    let stripped: String = raw.chars().filter(|c| !is_export_whitespace(*c)).collect();
    let cleaned = stripped.replacen('€', "", 1).replacen(',', ".", 1);
    parse_decimal_prefix(&cleaned)
}

/// Parse a rate cell. Search Console writes `"4.17%"` and Ads writes
/// `"4,17 %"`, so dots are kept: whitespace and the first `%` removed, first
/// `,` as decimal point, then the longest leading decimal is taken.
pub fn parse_percentage(value: Option<&str>) -> ParsedValue {
    let raw = value?;
    let stripped: String = raw.chars().filter(|c| !is_export_whitespace(*c)).collect();
    let cleaned = stripped.replacen('%', "", 1).replacen(',', ".", 1);
    parse_decimal_prefix(&cleaned)
}

/// Longest leading decimal number of `value` (`"7.5"` → 7.5, `"12abc"` → 12)
pub fn parse_decimal_prefix(value: &str) -> ParsedValue {
    let s = value.trim_start_matches(is_export_whitespace);
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().and_then(finite)
}

/// Longest leading base-10 integer of `value` (`"1(2)"` → 1, `"07 h"` → 7)
pub fn parse_integer_prefix(value: &str) -> Option<i64> {
    let s = value.trim_start_matches(is_export_whitespace);
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    s[..end].parse::<i64>().ok()
}
