use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Separator conventions for axis numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberLocale {
    #[default]
    EnUs,
    EsEs,
}

impl NumberLocale {
    #[must_use]
    pub const fn thousands_separator(self) -> char {
        match self {
            Self::EnUs => ',',
            Self::EsEs => '.',
        }
    }

    #[must_use]
    pub const fn decimal_separator(self) -> char {
        match self {
            Self::EnUs => '.',
            Self::EsEs => ',',
        }
    }
}

// Decimal cannot hold more fractional digits than this.
const MAX_DECIMAL_SCALE: u32 = 28;

/// Formats `value` with exactly `precision` fractional digits and grouped thousands.
#[must_use]
pub fn format_axis_number(value: f64, precision: u8, locale: NumberLocale) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let scale = u32::from(precision).min(MAX_DECIMAL_SCALE);
    let plain = match Decimal::from_f64(value) {
        Some(decimal) => {
            let mut rounded =
                decimal.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(scale);
            if rounded.is_zero() {
                rounded.set_sign_positive(true);
            }
            rounded.to_string()
        }
        // Out of Decimal's range; plain float formatting is exact enough at that magnitude.
        None => {
            let digits = scale as usize;
            format!("{value:.digits$}")
        }
    };

    localize(&plain, locale)
}

fn localize(plain: &str, locale: NumberLocale) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(plain.len() + integer.len() / 3);
    out.push_str(sign);
    out.push_str(&group_thousands(integer, locale.thousands_separator()));
    if let Some(fraction) = fraction {
        out.push(locale.decimal_separator());
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{NumberLocale, format_axis_number, group_thousands};

    #[test]
    fn groups_integer_digits() {
        assert_eq!(group_thousands("1234567", ','), "1,234,567");
        assert_eq!(group_thousands("123", ','), "123");
        assert_eq!(group_thousands("1000", ','), "1,000");
    }

    #[test]
    fn formats_with_precision_and_separator() {
        assert_eq!(format_axis_number(1_000_000.0, 0, NumberLocale::EnUs), "1,000,000");
        assert_eq!(format_axis_number(1234.5, 2, NumberLocale::EnUs), "1,234.50");
        assert_eq!(format_axis_number(1234.5, 1, NumberLocale::EsEs), "1.234,5");
        assert_eq!(format_axis_number(-2500.0, 0, NumberLocale::EnUs), "-2,500");
    }

    #[test]
    fn rounds_half_away_from_zero_without_negative_zero() {
        assert_eq!(format_axis_number(2.5, 0, NumberLocale::EnUs), "3");
        assert_eq!(format_axis_number(-0.4, 0, NumberLocale::EnUs), "0");
        assert_eq!(format_axis_number(0.2, 1, NumberLocale::EnUs), "0.2");
    }
}
