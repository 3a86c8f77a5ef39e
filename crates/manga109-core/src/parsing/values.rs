use crate::model::AttrValue;

/// Coerce a raw attribute literal into an `AttrValue`.
///
/// The literal becomes `Integer` only if it parses as an `i64` and renders
/// back to exactly the same text. Anything else is kept as `String`:
/// - "234" -> Integer(234)
/// - "-5" -> Integer(-5)
/// - "007", "+7", " 7", "-0" -> String (not canonical)
/// - "0007a8be" -> String
/// - "99999999999999999999" -> String (out of range)
pub fn coerce_literal(raw: &str) -> AttrValue {
    match raw.parse::<i64>() {
        Ok(n) if n.to_string() == raw => AttrValue::Integer(n),
        _ => AttrValue::String(raw.to_string()),
    }
}

/// Strict integer read for fields that must be integers.
pub fn parse_integer(raw: &str) -> Option<i64> {
    coerce_literal(raw).as_int()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_integer() {
        assert_eq!(coerce_literal("234"), AttrValue::Integer(234));
        assert_eq!(coerce_literal("0"), AttrValue::Integer(0));
    }

    #[test]
    fn test_negative_integer() {
        assert_eq!(coerce_literal("-5"), AttrValue::Integer(-5));
    }

    #[test]
    fn test_hex_like_id_stays_string() {
        assert_eq!(
            coerce_literal("0007a8be"),
            AttrValue::String("0007a8be".into())
        );
    }

    #[test]
    fn test_leading_zero_stays_string() {
        assert_eq!(coerce_literal("007"), AttrValue::String("007".into()));
        assert_eq!(coerce_literal("00"), AttrValue::String("00".into()));
    }

    #[test]
    fn test_sign_and_whitespace_stay_string() {
        assert_eq!(coerce_literal("+7"), AttrValue::String("+7".into()));
        assert_eq!(coerce_literal("-0"), AttrValue::String("-0".into()));
        assert_eq!(coerce_literal(" 7"), AttrValue::String(" 7".into()));
        assert_eq!(coerce_literal("7 "), AttrValue::String("7 ".into()));
    }

    #[test]
    fn test_no_float_or_bool_coercion() {
        assert_eq!(coerce_literal("1.5"), AttrValue::String("1.5".into()));
        assert_eq!(coerce_literal("true"), AttrValue::String("true".into()));
        assert_eq!(coerce_literal(""), AttrValue::String("".into()));
    }

    #[test]
    fn test_out_of_range_stays_string() {
        let big = "99999999999999999999";
        assert_eq!(coerce_literal(big), AttrValue::String(big.into()));
        assert_eq!(
            coerce_literal("9223372036854775807"),
            AttrValue::Integer(i64::MAX)
        );
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("1654"), Some(1654));
        assert_eq!(parse_integer("01"), None);
    }
}
