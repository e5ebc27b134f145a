//! Exact decimal arithmetic.
//!
//! A [`Decimal`] is an arbitrary precision integer magnitude together with a
//! non-negative scale, the number of digits after the decimal point. Values
//! are kept canonical (no trailing fractional zeros), so structural equality
//! is numeric equality: `1.20` and `1.2` are the same value.
//!
//! Addition, subtraction, multiplication and comparison are exact. Division
//! expands the quotient digit by digit and stops once the expansion
//! terminates, repeats (after a minimum number of digits), or reaches an
//! optional cap. See [`Decimal::div`].

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rustc_hash::FxHashSet;

/// Digits a non-terminating quotient is expanded to before cycle detection
/// may stop it.
pub const DEFAULT_MIN_SCALE: u32 = 17;

/// Largest exponent accepted in `1.5e3` style literals.
const MAX_EXPONENT: i64 = 4096;

/// Failure of a decimal operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecimalError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("not a decimal number: {0:?}")]
    Malformed(String),
}

/// An exact decimal number: `magnitude / 10^scale`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    magnitude: BigInt,
    scale: u32,
}

#[inline]
fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u8).pow(exponent)
}

impl Decimal {
    /// Build a decimal from a magnitude and scale, canonicalizing it.
    pub fn new(magnitude: impl Into<BigInt>, scale: u32) -> Self {
        let mut magnitude = magnitude.into();
        if magnitude.is_zero() {
            return Self::zero();
        }
        let ten = BigInt::from(10u8);
        let mut scale = scale;
        while scale > 0 {
            let (quotient, remainder) = magnitude.div_rem(&ten);
            if !remainder.is_zero() {
                break;
            }
            magnitude = quotient;
            scale -= 1;
        }
        Decimal { magnitude, scale }
    }

    pub fn zero() -> Self {
        Decimal {
            magnitude: BigInt::zero(),
            scale: 0,
        }
    }

    pub fn one() -> Self {
        Decimal {
            magnitude: BigInt::one(),
            scale: 0,
        }
    }

    #[inline]
    pub fn magnitude(&self) -> &BigInt {
        &self.magnitude
    }

    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.magnitude.is_negative()
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.scale == 0
    }

    pub fn abs(&self) -> Self {
        Decimal {
            magnitude: self.magnitude.abs(),
            scale: self.scale,
        }
    }

    /// Largest integer not greater than `self`.
    pub fn floor(&self) -> BigInt {
        if self.scale == 0 {
            return self.magnitude.clone();
        }
        self.magnitude.div_floor(&pow10(self.scale))
    }

    /// The floor of `self` as an `i64`, if it fits.
    pub fn floor_i64(&self) -> Option<i64> {
        self.floor().to_i64()
    }

    /// The floor of `self` as a `usize`, if it is non-negative and fits.
    pub fn floor_usize(&self) -> Option<usize> {
        self.floor().to_usize()
    }

    /// Magnitude rescaled to `scale`, which must not be below `self.scale`.
    fn magnitude_at(&self, scale: u32) -> BigInt {
        debug_assert!(scale >= self.scale);
        if scale == self.scale {
            self.magnitude.clone()
        } else {
            &self.magnitude * pow10(scale - self.scale)
        }
    }

    /// Both magnitudes brought to the larger of the two scales.
    fn aligned(&self, other: &Decimal) -> (BigInt, BigInt, u32) {
        let scale = self.scale.max(other.scale);
        (self.magnitude_at(scale), other.magnitude_at(scale), scale)
    }

    /// Divide `self` by `divisor`.
    ///
    /// Both operands are turned into one reduced fraction `n/d`. An integral
    /// fraction is returned as is. Otherwise the quotient is expanded one
    /// digit at a time (with floor division, so negative quotients round
    /// toward negative infinity) until one of these holds:
    ///
    /// - the remainder is zero;
    /// - the remainder has been seen before and at least `min_scale` digits
    ///   have been produced;
    /// - `max_scale` digits have been produced. `None` and `Some(0)` both
    ///   mean "no cap".
    pub fn div(
        &self,
        divisor: &Decimal,
        max_scale: Option<u32>,
        min_scale: u32,
    ) -> Result<Decimal, DecimalError> {
        if divisor.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        let numerator = &self.magnitude * pow10(divisor.scale);
        let denominator = &divisor.magnitude * pow10(self.scale);
        let gcd = numerator.gcd(&denominator);
        let mut n = numerator / &gcd;
        let d = denominator / &gcd;
        if d.is_one() {
            return Ok(Decimal::new(n, 0));
        }

        let cap = max_scale.filter(|&cap| cap > 0);
        let ten = BigInt::from(10u8);
        let mut seen = FxHashSet::default();
        let mut digits = BigInt::zero();
        let mut scale = 0u32;
        while !n.is_zero()
            && (!seen.contains(&n) || scale < min_scale)
            && cap.map_or(true, |cap| scale < cap)
        {
            seen.insert(n.clone());
            scale += 1;
            n *= &ten;
            let (quotient, remainder) = n.div_mod_floor(&d);
            digits = digits * &ten + quotient;
            n = remainder;
        }
        Ok(Decimal::new(digits, scale))
    }

    /// [`Decimal::div`] with no cap and [`DEFAULT_MIN_SCALE`].
    pub fn checked_div(&self, divisor: &Decimal) -> Result<Decimal, DecimalError> {
        self.div(divisor, None, DEFAULT_MIN_SCALE)
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::new(value, 0)
    }
}

impl From<usize> for Decimal {
    fn from(value: usize) -> Self {
        Decimal::new(value, 0)
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Self {
        Decimal::new(value, 0)
    }
}

impl FromStr for Decimal {
    type Err = DecimalError;

    /// Accepts `[-+]digits[.digits][(e|E)[-+]digits]`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || DecimalError::Malformed(text.to_string());

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (mantissa, exponent) = match unsigned.find(|c| c == 'e' || c == 'E') {
            Some(ix) => (&unsigned[..ix], Some(&unsigned[ix + 1..])),
            None => (unsigned, None),
        };
        let (int_digits, frac_digits) = match mantissa.split_once('.') {
            Some((int_digits, frac_digits)) if !frac_digits.is_empty() => {
                (int_digits, frac_digits)
            }
            Some(_) => return Err(malformed()),
            None => (mantissa, ""),
        };
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if int_digits.is_empty() || !all_digits(int_digits) || !all_digits(frac_digits) {
            return Err(malformed());
        }

        let mut magnitude: BigInt = format!("{int_digits}{frac_digits}")
            .parse()
            .map_err(|_| malformed())?;
        if negative {
            magnitude = -magnitude;
        }

        let mut scale = i64::try_from(frac_digits.len()).map_err(|_| malformed())?;
        if let Some(exponent) = exponent {
            let exponent: i64 = exponent.parse().map_err(|_| malformed())?;
            if exponent.abs() > MAX_EXPONENT {
                return Err(malformed());
            }
            scale -= exponent;
        }
        if scale < 0 {
            let shift = u32::try_from(-scale).map_err(|_| malformed())?;
            magnitude *= pow10(shift);
            scale = 0;
        }
        let scale = u32::try_from(scale).map_err(|_| malformed())?;
        Ok(Decimal::new(magnitude, scale))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.magnitude);
        }
        let scale = self.scale as usize;
        let mut digits = self.magnitude.abs().to_string();
        if digits.len() <= scale {
            digits.insert_str(0, &"0".repeat(scale + 1 - digits.len()));
        }
        let (int_part, frac_part) = digits.split_at(digits.len() - scale);
        if self.is_negative() {
            f.write_str("-")?;
        }
        write!(f, "{int_part}.{frac_part}")
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({self})")
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.aligned(other);
        a.cmp(&b)
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &Decimal) -> Decimal {
        let (a, b, scale) = self.aligned(rhs);
        Decimal::new(a + b, scale)
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &Decimal) -> Decimal {
        let (a, b, scale) = self.aligned(rhs);
        Decimal::new(a - b, scale)
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &Decimal) -> Decimal {
        Decimal::new(&self.magnitude * &rhs.magnitude, self.scale + rhs.scale)
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal {
            magnitude: -&self.magnitude,
            scale: self.scale,
        }
    }
}

macro_rules! forward_owned_binop {
    ($($trait:ident :: $method:ident),*) => {$(
        impl $trait for Decimal {
            type Output = Decimal;

            #[inline]
            fn $method(self, rhs: Decimal) -> Decimal {
                (&self).$method(&rhs)
            }
        }
    )*};
}

forward_owned_binop!(Add::add, Sub::sub, Mul::mul);

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        -&self
    }
}
