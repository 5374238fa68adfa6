//! Small string helpers used when building page metadata and admin labels.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_-]+").unwrap());

/// Return at most `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Treat `None`, empty and whitespace-only strings alike.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// URL slug for a display name: lower-cased, spaces to dashes, anything
/// outside ASCII word characters and `-` dropped.
pub fn slugify(name: &str) -> String {
    let dashed = name.trim().to_lowercase().replace(' ', "-");
    NON_SLUG_CHARS.replace_all(&dashed, "").into_owned()
}

/// Format an amount with thousands separators and at most two decimals, e.g. `12,500.5`.
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let cents = ((abs - abs.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = if negative {
        format!("-{grouped}")
    } else {
        grouped
    };
    if cents > 0 {
        let fraction = format!("{cents:02}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_code_points() {
        assert_eq!(truncate_chars("sapphire", 3), "sap");
        assert_eq!(truncate_chars("ruby", 10), "ruby");
        assert_eq!(truncate_chars("ශ්‍රී ලංකා", 2), "ශ්");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(Some("x".to_string())), Some("x".to_string()));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Blue Sapphires"), "blue-sapphires");
        assert_eq!(slugify(" Padparadscha & Co. "), "padparadscha--co");
        assert_eq!(slugify("Star-Ruby"), "star-ruby");
        assert_eq!(slugify("Café Gems"), "caf-gems");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("pending"), "Pending");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(12500.0), "12,500");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1234567.5), "1,234,567.5");
        assert_eq!(format_amount(0.25), "0.25");
    }
}
