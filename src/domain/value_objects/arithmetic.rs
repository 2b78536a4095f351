//! # Checked Arithmetic
//!
//! Overflow-safe arithmetic for premium accumulation.
//!
//! Premium totals are summed across beneficiaries, products and frequencies;
//! every accumulation step goes through [`CheckedArithmetic`] so that an
//! absurd tariff surfaces as an error instead of a panic.
//!
//! # Examples
//!
//! ```
//! use policy_quotation::domain::value_objects::arithmetic::{ArithmeticError, CheckedArithmetic};
//! use rust_decimal::Decimal;
//!
//! let total = Decimal::new(1050, 2).safe_add(Decimal::new(250, 2));
//! assert_eq!(total, Ok(Decimal::new(1300, 2)));
//!
//! assert_eq!(4usize.safe_div(0), Err(ArithmeticError::DivisionByZero));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Error type for arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation resulted in overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Arithmetic operation resulted in underflow.
    #[error("arithmetic underflow")]
    Underflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Trait for checked arithmetic operations.
///
/// Implementors must never panic: overflow, underflow and division by zero
/// are reported through [`ArithmeticError`].
pub trait CheckedArithmetic: Sized {
    /// Safely add two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely subtract two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Underflow` if the result would underflow.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely multiply two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely divide two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::DivisionByZero` if the divisor is zero.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}

impl CheckedArithmetic for usize {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_div(rhs).ok_or(ArithmeticError::DivisionByZero)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod checked_arithmetic_decimal {
        use super::*;

        #[test]
        fn safe_add_works() {
            let a = Decimal::new(100, 0);
            let b = Decimal::new(50, 0);
            assert_eq!(a.safe_add(b).unwrap(), Decimal::new(150, 0));
        }

        #[test]
        fn safe_add_overflow_fails() {
            assert_eq!(
                Decimal::MAX.safe_add(Decimal::ONE),
                Err(ArithmeticError::Overflow)
            );
        }

        #[test]
        fn safe_sub_allows_negative_results() {
            let a = Decimal::new(10, 0);
            let b = Decimal::new(25, 0);
            assert_eq!(a.safe_sub(b).unwrap(), Decimal::new(-15, 0));
        }

        #[test]
        fn safe_mul_works() {
            let a = Decimal::new(1250, 2);
            assert_eq!(a.safe_mul(Decimal::TWO).unwrap(), Decimal::new(25, 0));
        }

        #[test]
        fn safe_div_by_zero_fails() {
            assert_eq!(
                Decimal::ONE.safe_div(Decimal::ZERO),
                Err(ArithmeticError::DivisionByZero)
            );
        }
    }

    mod checked_arithmetic_usize {
        use super::*;

        #[test]
        fn safe_div_works() {
            assert_eq!(6usize.safe_div(3).unwrap(), 2);
        }

        #[test]
        fn safe_div_truncates() {
            assert_eq!(5usize.safe_div(2).unwrap(), 2);
        }

        #[test]
        fn safe_div_by_zero_fails() {
            assert_eq!(6usize.safe_div(0), Err(ArithmeticError::DivisionByZero));
        }

        #[test]
        fn safe_sub_underflow_fails() {
            assert_eq!(0usize.safe_sub(1), Err(ArithmeticError::Underflow));
        }
    }
}
