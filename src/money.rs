use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::sheet::Cell;

/// A numeric cell whose value does not fit in a `Decimal`.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{text:?} is too large for an amount")]
pub struct OutOfRange {
    pub text: String,
}

/// Converts a debit or credit cell into an amount.
///
/// Numbers are used as-is and text is parsed as a plain or scientific
/// decimal after trimming. Everything else, including blank cells and text
/// that does not parse, counts as zero rather than failing the row. Numbers
/// too large to represent are an error, not zero.
pub fn coerce_amount(cell: &Cell) -> Result<Decimal, OutOfRange> {
    match cell {
        Cell::Number(d) => Ok(*d),
        Cell::Text(s) => parse_decimal(s.trim()),
        Cell::Empty | Cell::Bool(_) | Cell::Error(_) => Ok(Decimal::ZERO),
    }
}

fn parse_decimal(s: &str) -> Result<Decimal, OutOfRange> {
    if s.is_empty() {
        return Ok(Decimal::ZERO);
    }
    if let Ok(d) = Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)) {
        return Ok(d);
    }
    match s.parse::<f64>() {
        // "inf" and "NaN" parse as floats but are not amounts.
        Ok(f) if f.abs() >= 1.0 && s.bytes().any(|b| b.is_ascii_digit()) => Err(OutOfRange {
            text: s.to_string(),
        }),
        // Too many fractional digits; close enough to round.
        Ok(f) => Ok(Decimal::from_f64(f).unwrap_or(Decimal::ZERO)),
        Err(_) => Ok(Decimal::ZERO),
    }
}

/// Adds up `amounts`, or `None` if the total does not fit in a `Decimal`.
pub fn checked_sum<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

/// Displays an amount rounded to whole units with thousands separators,
/// e.g. `-1,234,568`.
pub struct Whole(pub Decimal);

impl fmt::Display for Whole {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let rounded = self
            .0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
        if rounded.is_zero() {
            return f.write_str("0");
        }
        let digits = rounded.abs().trunc().to_string();
        if rounded.is_sign_negative() {
            f.write_str("-")?;
        }
        let lead = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i != 0 && (i + 3 - lead) % 3 == 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}
