use std::{cmp::Ordering, fmt, str::FromStr};

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::error::{Error, Result};

/**
An arbitrary-precision decimal: `coefficient * 10^exponent`.

Two decimals are equal when they have the same value, so `1.0` equals `1.00` and `100d-2`.
*/
#[derive(Debug, Clone, Default)]
pub struct Decimal {
    coefficient: BigInt,
    exponent: i64,
}

impl Decimal {
    pub fn new(coefficient: impl Into<BigInt>, exponent: i64) -> Self {
        Decimal {
            coefficient: coefficient.into(),
            exponent,
        }
    }

    pub fn coefficient(&self) -> &BigInt {
        &self.coefficient
    }

    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    pub fn is_zero(&self) -> bool {
        self.coefficient.is_zero()
    }

    /**
    The nearest `f64` to this decimal.
    */
    pub fn to_f64(&self) -> f64 {
        // the standard library's float parser rounds correctly, so let it do the work
        format!("{}e{}", self.coefficient, self.exponent)
            .parse()
            .unwrap_or(f64::NAN)
    }

    /**
    Strip trailing zeros from the coefficient, so equal values have equal parts.
    */
    fn normalized(&self) -> (BigInt, i64) {
        if self.coefficient.is_zero() {
            return (BigInt::zero(), 0);
        }

        let mut coefficient = self.coefficient.clone();
        let mut exponent = self.exponent;

        while (&coefficient % 10u32).is_zero() {
            coefficient /= 10u32;
            exponent += 1;
        }

        (coefficient, exponent)
    }

    /**
    Parse a decimal literal like `-12.5`, `123.` or `125d-1`.

    Underscores must already have been removed.
    */
    pub(crate) fn parse(literal: &str) -> Result<Self> {
        let invalid = |reason| Error::invalid_literal(literal, reason);

        let (mantissa, exponent) = match literal.find(|c: char| c == 'd' || c == 'D') {
            Some(i) => {
                let exponent = &literal[i + 1..];
                let digits = exponent.strip_prefix(&['+', '-'][..]).unwrap_or(exponent);

                if !is_digits(digits) {
                    return Err(invalid("malformed exponent"));
                }

                let exponent = exponent
                    .strip_prefix('+')
                    .unwrap_or(exponent)
                    .parse::<i64>()
                    .map_err(|_| invalid("exponent out of range"))?;

                (&literal[..i], exponent)
            }
            None => (literal, 0),
        };

        let (negative, mantissa) = match mantissa.strip_prefix('-') {
            Some(mantissa) => (true, mantissa),
            None => (false, mantissa),
        };

        let (integer, fraction) = match mantissa.find('.') {
            Some(i) => (&mantissa[..i], &mantissa[i + 1..]),
            None => (mantissa, ""),
        };

        if !is_digits(integer) || !(fraction.is_empty() || is_digits(fraction)) {
            return Err(invalid("malformed decimal"));
        }

        let mut digits = String::with_capacity(integer.len() + fraction.len() + 1);
        if negative {
            digits.push('-');
        }
        digits.push_str(integer);
        digits.push_str(fraction);

        let coefficient = BigInt::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| invalid("malformed decimal"))?;

        let exponent = i64::try_from(fraction.len())
            .ok()
            .and_then(|scale| exponent.checked_sub(scale))
            .ok_or_else(|| invalid("exponent out of range"))?;

        Ok(Decimal {
            coefficient,
            exponent,
        })
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|c| c.is_ascii_digit())
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Decimal::parse(s)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Decimal {}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.coefficient.is_negative() { "-" } else { "" };
        let digits = self.coefficient.magnitude().to_string();

        match self.exponent.cmp(&0) {
            Ordering::Equal => write!(f, "{}{}.", sign, digits),
            Ordering::Greater => write!(f, "{}{}d{}", sign, digits, self.exponent),
            Ordering::Less => {
                let scale = self.exponent.unsigned_abs();

                if scale < digits.len() as u64 {
                    let (integer, fraction) = digits.split_at(digits.len() - scale as usize);
                    write!(f, "{}{}.{}", sign, integer, fraction)
                } else if scale - (digits.len() as u64) < 8 {
                    let zeros = (scale as usize) - digits.len();
                    write!(f, "{}0.{}{}", sign, "0".repeat(zeros), digits)
                } else {
                    write!(f, "{}{}d{}", sign, digits, self.exponent)
                }
            }
        }
    }
}
