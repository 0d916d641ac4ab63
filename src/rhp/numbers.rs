//! Numeric literal parsing: base disambiguation, underscore stripping, and
//! arbitrary-radix integer conversion. Kept separate from the grammar so the
//! "number purity" property (§8.1) can be tested in isolation.

use crate::rhp::ast::{NonFinite, NumberFormat, NumberValue};

/// Strip underscore digit separators. Consecutive underscores collapse;
/// underscores are only ever removed, never validated for placement here —
/// the grammar only calls this on text it already knows is digit-shaped.
pub fn strip_underscores(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_was_underscore = false;
    for ch in raw.chars() {
        if ch == '_' {
            prev_was_underscore = true;
            continue;
        }
        prev_was_underscore = false;
        out.push(ch);
    }
    let _ = prev_was_underscore;
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNumber {
    pub value: NumberValue,
    pub format: NumberFormat,
}

/// Parse the body of a number literal (sign already consumed by the caller
/// for the purposes of digit scanning, but included here so the final value
/// carries its sign).
pub fn parse_number(raw: &str) -> Option<ParsedNumber> {
    if raw == "Infinity" {
        return Some(ParsedNumber {
            value: NumberValue::NonFinite(NonFinite::Infinity),
            format: NumberFormat::Float,
        });
    }
    if raw == "-Infinity" {
        return Some(ParsedNumber {
            value: NumberValue::NonFinite(NonFinite::NegInfinity),
            format: NumberFormat::Float,
        });
    }
    if raw == "NaN" {
        return Some(ParsedNumber {
            value: NumberValue::NonFinite(NonFinite::NaN),
            format: NumberFormat::Float,
        });
    }

    let (sign, body) = match raw.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, raw),
    };

    let cleaned = strip_underscores(body);

    if let Some(hex) = cleaned.strip_prefix("0x").or_else(|| cleaned.strip_prefix("0X")) {
        let value = i64::from_str_radix(hex, 16).ok()?;
        return Some(ParsedNumber {
            value: NumberValue::Integer(sign * value),
            format: NumberFormat::Hex,
        });
    }
    if let Some(bin) = cleaned.strip_prefix("0b").or_else(|| cleaned.strip_prefix("0B")) {
        let value = i64::from_str_radix(bin, 2).ok()?;
        return Some(ParsedNumber {
            value: NumberValue::Integer(sign * value),
            format: NumberFormat::Binary,
        });
    }
    if let Some(oct) = cleaned.strip_prefix("0o").or_else(|| cleaned.strip_prefix("0O")) {
        let value = i64::from_str_radix(oct, 8).ok()?;
        return Some(ParsedNumber {
            value: NumberValue::Integer(sign * value),
            format: NumberFormat::Octal,
        });
    }

    // Legacy octal: a leading zero followed by more digits and no '.'/'e'/'E'.
    if cleaned.len() > 1
        && cleaned.starts_with('0')
        && !cleaned.contains('.')
        && !cleaned.contains('e')
        && !cleaned.contains('E')
    {
        let value = i64::from_str_radix(&cleaned, 8).ok()?;
        return Some(ParsedNumber {
            value: NumberValue::Integer(sign * value),
            format: NumberFormat::Octal,
        });
    }

    let has_exponent = cleaned.contains('e') || cleaned.contains('E');
    let has_dot = cleaned.contains('.');

    if has_dot || has_exponent {
        let value: f64 = cleaned.parse().ok()?;
        return Some(ParsedNumber {
            value: NumberValue::Float(sign as f64 * value),
            format: if has_exponent {
                NumberFormat::Scientific
            } else {
                NumberFormat::Float
            },
        });
    }

    let value: i64 = cleaned.parse().ok()?;
    Some(ParsedNumber {
        value: NumberValue::Integer(sign * value),
        format: NumberFormat::Decimal,
    })
}

/// `08`/`09` and similar are an invalid legacy octal (no digit 8 or 9 is
/// valid in base 8); the grammar raises rather than silently reinterpreting
/// these as decimal.
pub fn is_invalid_legacy_octal(raw: &str) -> bool {
    let body = raw.strip_prefix('-').unwrap_or(raw);
    let cleaned = strip_underscores(body);
    let has_base_prefix = ["0x", "0X", "0b", "0B", "0o", "0O"]
        .iter()
        .any(|p| cleaned.starts_with(p));
    if !has_base_prefix
        && cleaned.len() > 1
        && cleaned.starts_with('0')
        && !cleaned.contains('.')
        && !cleaned.contains('e')
        && !cleaned.contains('E')
    {
        return cleaned.chars().any(|c| c == '8' || c == '9');
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_underscores_anywhere() {
        assert_eq!(strip_underscores("1_000_000"), "1000000");
        assert_eq!(strip_underscores("1__0"), "10");
    }

    #[test]
    fn parses_all_bases() {
        assert_eq!(
            parse_number("0b1010").unwrap().value,
            NumberValue::Integer(10)
        );
        assert_eq!(
            parse_number("0o755").unwrap().value,
            NumberValue::Integer(493)
        );
        assert_eq!(
            parse_number("0xFF").unwrap().value,
            NumberValue::Integer(255)
        );
        assert_eq!(
            parse_number("1_000_000").unwrap().value,
            NumberValue::Integer(1_000_000)
        );
        assert_eq!(
            parse_number("1.5e10").unwrap().value,
            NumberValue::Float(1.5e10)
        );
    }

    #[test]
    fn legacy_octal_disambiguation() {
        assert_eq!(
            parse_number("0755").unwrap().value,
            NumberValue::Integer(493)
        );
        assert!(is_invalid_legacy_octal("08"));
        assert!(!is_invalid_legacy_octal("0.8"));
        assert!(!is_invalid_legacy_octal("0x89"));
        assert!(!is_invalid_legacy_octal("0x98"));
        assert!(!is_invalid_legacy_octal("0b1001"));
    }

    #[test]
    fn non_finite_literals() {
        assert_eq!(
            parse_number("Infinity").unwrap().value,
            NumberValue::NonFinite(NonFinite::Infinity)
        );
        assert_eq!(
            parse_number("-Infinity").unwrap().value,
            NumberValue::NonFinite(NonFinite::NegInfinity)
        );
        assert_eq!(
            parse_number("NaN").unwrap().value,
            NumberValue::NonFinite(NonFinite::NaN)
        );
    }

    use proptest::prelude::*;

    fn arb_i64_in_radix_range() -> impl Strategy<Value = i64> {
        // i64::from_str_radix(_, 2) only accepts bodies up to 63 bits of
        // magnitude; stay well inside that so every base round-trips.
        -0x0FFF_FFFFi64..=0x0FFF_FFFFi64
    }

    fn underscore_every_three(digits: &str) -> String {
        let mut out = String::new();
        for (i, ch) in digits.chars().rev().enumerate() {
            if i > 0 && i % 3 == 0 {
                out.push('_');
            }
            out.push(ch);
        }
        out.chars().rev().collect()
    }

    proptest! {
        // "RHP number purity": any decimal/binary/octal/hex/underscored
        // literal round-trips to the mathematically correct integer.
        #[test]
        fn prop_integer_purity_across_bases(n in arb_i64_in_radix_range()) {
            let decimal = n.to_string();
            prop_assert_eq!(parse_number(&decimal).unwrap().value, NumberValue::Integer(n));

            let (sign, mag) = if n < 0 { ("-", -n) } else { ("", n) };
            let hex = format!("{sign}0x{mag:x}");
            prop_assert_eq!(parse_number(&hex).unwrap().value, NumberValue::Integer(n));
            let oct = format!("{sign}0o{mag:o}");
            prop_assert_eq!(parse_number(&oct).unwrap().value, NumberValue::Integer(n));
            let bin = format!("{sign}0b{mag:b}");
            prop_assert_eq!(parse_number(&bin).unwrap().value, NumberValue::Integer(n));
        }

        #[test]
        fn prop_underscored_decimal_matches_plain(n in 0i64..=0x0FFF_FFFFi64) {
            let plain = n.to_string();
            let underscored = underscore_every_three(&plain);
            let parsed = parse_number(&underscored).unwrap();
            prop_assert_eq!(parsed.value, NumberValue::Integer(n));
            prop_assert!(!strip_underscores(&underscored).contains('_'));
        }
    }
}
