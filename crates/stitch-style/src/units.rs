//! Exact CSS length parsing.
//!
//! Lengths are held as signed thousandths so scale lookups compare integers
//! and never round.

use strum::{Display, EnumString};

/// Pixels per `rem`, the browser default root font size.
pub const PX_PER_REM: i64 = 16;

const FRACTION_DIGITS: usize = 3;

/// Units understood by the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Unit {
    /// Unitless number.
    #[strum(serialize = "")]
    None,
    /// CSS pixels.
    Px,
    /// Root-relative ems.
    Rem,
    /// Element-relative ems.
    Em,
    /// Percentage of the containing block.
    #[strum(serialize = "%")]
    Percent,
    /// Viewport height.
    Vh,
    /// Viewport width.
    Vw,
}

/// A parsed numeric CSS value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    /// The magnitude in thousandths of `unit`.
    pub thousandths: i64,
    /// The unit.
    pub unit: Unit,
}

impl Length {
    /// Parses values such as `16px`, `-0.5rem`, `50%` or `1.25`.
    ///
    /// Returns `None` for non-numeric values, unknown units or more than
    /// three fractional digits.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let split = trimmed
            .char_indices()
            .find(|&(index, ch)| !is_number_char(index, ch))
            .map_or(trimmed.len(), |(index, _)| index);
        let (number, unit_text) = trimmed.split_at_checked(split)?;
        let unit = unit_text.parse::<Unit>().ok()?;
        Some(Self {
            thousandths: parse_thousandths(number)?,
            unit,
        })
    }

    /// Returns whether the value is zero in any unit.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.thousandths == 0
    }

    /// Returns whether the value is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.thousandths < 0
    }

    /// Returns the same length with a non-negative magnitude.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self {
            thousandths: self.thousandths.saturating_abs(),
            unit: self.unit,
        }
    }

    /// Converts to thousandths of a pixel.
    ///
    /// Pixels and rems convert; a unitless zero is zero pixels. Every other
    /// unit returns `None`.
    #[must_use]
    pub const fn to_px_thousandths(&self) -> Option<i64> {
        match self.unit {
            Unit::Px => Some(self.thousandths),
            Unit::Rem => self.thousandths.checked_mul(PX_PER_REM),
            Unit::None if self.thousandths == 0 => Some(0),
            _ => None,
        }
    }
}

/// Parses a decimal number into thousandths.
#[must_use]
pub fn parse_thousandths(number: &str) -> Option<i64> {
    let (negative, digits) = number.strip_prefix('-').map_or_else(
        || (false, number.strip_prefix('+').unwrap_or(number)),
        |rest| (true, rest),
    );
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if (whole.is_empty() && fraction.is_empty()) || fraction.len() > FRACTION_DIGITS {
        return None;
    }
    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().ok()?
    };
    let mut fraction_value = 0_i64;
    for position in 0..FRACTION_DIGITS {
        let digit = fraction
            .chars()
            .nth(position)
            .map_or(Some(0), |ch| ch.to_digit(10))?;
        fraction_value = fraction_value
            .checked_mul(10)?
            .checked_add(i64::from(digit))?;
    }
    let magnitude = whole_value.checked_mul(1_000)?.checked_add(fraction_value)?;
    if negative {
        magnitude.checked_neg()
    } else {
        Some(magnitude)
    }
}

const fn is_number_char(index: usize, ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.' || (index == 0 && matches!(ch, '-' | '+'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("16px", 16_000, Unit::Px)]
    #[case("1.5rem", 1_500, Unit::Rem)]
    #[case("-0.25rem", -250, Unit::Rem)]
    #[case("50%", 50_000, Unit::Percent)]
    #[case(".5", 500, Unit::None)]
    #[case("100vh", 100_000, Unit::Vh)]
    #[case(" 0 ", 0, Unit::None)]
    fn parses_lengths(#[case] input: &str, #[case] thousandths: i64, #[case] unit: Unit) {
        assert_eq!(Length::parse(input), Some(Length { thousandths, unit }));
    }

    #[rstest]
    #[case("auto")]
    #[case("12pt")]
    #[case("1.23456px")]
    #[case("px")]
    #[case("1px 2px")]
    fn rejects_non_lengths(#[case] input: &str) {
        assert_eq!(Length::parse(input), None);
    }

    #[test]
    fn rems_convert_to_pixels() {
        let length = Length::parse("0.875rem").expect("length");
        assert_eq!(length.to_px_thousandths(), Some(14_000));
        assert_eq!(Length::parse("2em").and_then(|l| l.to_px_thousandths()), None);
    }
}
