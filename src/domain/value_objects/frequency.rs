//! # Billing Frequency
//!
//! The four premium collection periods and the four-slot container used
//! for every per-frequency total.
//!
//! # Examples
//!
//! ```
//! use policy_quotation::domain::value_objects::frequency::{Frequency, FrequencySlots};
//! use rust_decimal::Decimal;
//!
//! assert_eq!(Frequency::Annual.code(), 4);
//! assert_eq!(Frequency::Semiannual.discount_multiplier(), Decimal::TWO);
//!
//! let mut totals = FrequencySlots::<Decimal>::default();
//! totals[Frequency::Quarterly] = Decimal::new(42, 0);
//! assert_eq!(totals.as_array()[1], Decimal::new(42, 0));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a frequency code or name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFrequencyError {
    /// Numeric code outside `1..=4`.
    #[error("invalid frequency code: {0}")]
    InvalidCode(u8),
    /// Unrecognised textual name.
    #[error("invalid frequency name: {0}")]
    InvalidName(String),
}

/// Billing period for premium collection.
///
/// The discriminant is the code the rating service expects, and also
/// `slot() + 1` in every [`FrequencySlots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Frequency {
    /// Billed every month.
    Monthly = 1,
    /// Billed every three months.
    Quarterly = 2,
    /// Billed every six months.
    Semiannual = 3,
    /// Billed once a year.
    Annual = 4,
}

impl Frequency {
    /// All frequencies in code order.
    pub const ALL: [Frequency; 4] = [
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Semiannual,
        Frequency::Annual,
    ];

    /// Returns the service code (1..=4).
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the zero-based slot in a [`FrequencySlots`].
    #[inline]
    #[must_use]
    pub const fn slot(self) -> usize {
        self as usize - 1
    }

    /// Parses a service code.
    ///
    /// # Errors
    ///
    /// Returns `ParseFrequencyError::InvalidCode` for codes outside `1..=4`.
    pub fn from_code(code: u8) -> Result<Self, ParseFrequencyError> {
        match code {
            1 => Ok(Self::Monthly),
            2 => Ok(Self::Quarterly),
            3 => Ok(Self::Semiannual),
            4 => Ok(Self::Annual),
            other => Err(ParseFrequencyError::InvalidCode(other)),
        }
    }

    /// Multiplier applied to the service's raw discount.
    ///
    /// The service reports discounts in monthly/quarterly units; a semiannual
    /// or annual period spans two of them.
    #[inline]
    #[must_use]
    pub fn discount_multiplier(self) -> Decimal {
        match self {
            Self::Monthly | Self::Quarterly => Decimal::ONE,
            Self::Semiannual | Self::Annual => Decimal::TWO,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "MONTHLY"),
            Self::Quarterly => write!(f, "QUARTERLY"),
            Self::Semiannual => write!(f, "SEMIANNUAL"),
            Self::Annual => write!(f, "ANNUAL"),
        }
    }
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MONTHLY" | "1" => Ok(Self::Monthly),
            "QUARTERLY" | "2" => Ok(Self::Quarterly),
            "SEMIANNUAL" | "3" => Ok(Self::Semiannual),
            "ANNUAL" | "4" => Ok(Self::Annual),
            _ => Err(ParseFrequencyError::InvalidName(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Frequency {
    type Error = ParseFrequencyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code)
    }
}

impl From<Frequency> for u8 {
    fn from(frequency: Frequency) -> Self {
        frequency.code()
    }
}

/// Fixed four-slot container indexed by [`Frequency`].
///
/// Always holds four values; slots for frequencies that were not quoted keep
/// their default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencySlots<T>([T; 4]);

impl<T> FrequencySlots<T> {
    /// Creates slots from a raw array ordered by frequency code.
    #[must_use]
    pub const fn from_array(values: [T; 4]) -> Self {
        Self(values)
    }

    /// Returns the raw array ordered by frequency code.
    #[must_use]
    pub const fn as_array(&self) -> &[T; 4] {
        &self.0
    }

    /// Iterates `(frequency, value)` pairs in code order.
    pub fn iter(&self) -> impl Iterator<Item = (Frequency, &T)> {
        Frequency::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Frequency> for FrequencySlots<T> {
    type Output = T;

    fn index(&self, frequency: Frequency) -> &T {
        match frequency {
            Frequency::Monthly => &self.0[0],
            Frequency::Quarterly => &self.0[1],
            Frequency::Semiannual => &self.0[2],
            Frequency::Annual => &self.0[3],
        }
    }
}

impl<T> IndexMut<Frequency> for FrequencySlots<T> {
    fn index_mut(&mut self, frequency: Frequency) -> &mut T {
        match frequency {
            Frequency::Monthly => &mut self.0[0],
            Frequency::Quarterly => &mut self.0[1],
            Frequency::Semiannual => &mut self.0[2],
            Frequency::Annual => &mut self.0[3],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn codes_match_slots() {
        for frequency in Frequency::ALL {
            assert_eq!(frequency.slot() + 1, usize::from(frequency.code()));
        }
    }

    #[test]
    fn from_code_rejects_out_of_range() {
        assert_eq!(
            Frequency::from_code(0),
            Err(ParseFrequencyError::InvalidCode(0))
        );
        assert_eq!(
            Frequency::from_code(5),
            Err(ParseFrequencyError::InvalidCode(5))
        );
    }

    #[test]
    fn from_str_accepts_names_and_codes() {
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!("4".parse::<Frequency>().unwrap(), Frequency::Annual);
        assert!("weekly".parse::<Frequency>().is_err());
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&Frequency::Semiannual).unwrap();
        assert_eq!(json, "3");
        let back: Frequency = serde_json::from_str("2").unwrap();
        assert_eq!(back, Frequency::Quarterly);
        assert!(serde_json::from_str::<Frequency>("9").is_err());
    }

    #[test]
    fn slots_default_to_zero_and_keep_length() {
        let mut slots = FrequencySlots::<Decimal>::default();
        slots[Frequency::Annual] = Decimal::TEN;
        assert_eq!(
            slots.as_array(),
            &[Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::TEN]
        );
        assert_eq!(serde_json::to_value(slots).unwrap().as_array().unwrap().len(), 4);
    }

    proptest! {
        #[test]
        fn discount_scaling_doubles_only_long_periods(raw in -100_000i64..100_000i64) {
            let d = Decimal::new(raw, 2);
            prop_assert_eq!(d * Frequency::Monthly.discount_multiplier(), d);
            prop_assert_eq!(d * Frequency::Quarterly.discount_multiplier(), d);
            prop_assert_eq!(d * Frequency::Semiannual.discount_multiplier(), d + d);
            prop_assert_eq!(d * Frequency::Annual.discount_multiplier(), d + d);
        }
    }
}
