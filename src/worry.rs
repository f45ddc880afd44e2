use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::ConfigError;
use crate::monkey::Monkey;

/// Numeric type an item's worry level is tracked in during a game.
pub trait WorryLevel: Clone + fmt::Debug + fmt::Display + PartialEq + From<u64> {
    fn try_add(&self, rhs: &Self) -> Option<Self>;

    fn try_mul(&self, rhs: &Self) -> Option<Self>;

    fn divisible_by(&self, divisor: u64) -> bool;
}

impl WorryLevel for u128 {
    fn try_add(&self, rhs: &Self) -> Option<Self> {
        u128::checked_add(*self, *rhs)
    }

    fn try_mul(&self, rhs: &Self) -> Option<Self> {
        u128::checked_mul(*self, *rhs)
    }

    fn divisible_by(&self, divisor: u64) -> bool {
        *self % u128::from(divisor) == 0
    }
}

impl WorryLevel for BigUint {
    fn try_add(&self, rhs: &Self) -> Option<Self> {
        Some(self + rhs)
    }

    fn try_mul(&self, rhs: &Self) -> Option<Self> {
        Some(self * rhs)
    }

    fn divisible_by(&self, divisor: u64) -> bool {
        (self % divisor).is_zero()
    }
}

/// Post-inspection step that keeps worry levels in check before the
/// divisibility test.
pub trait WorryReducer {
    type Worry: WorryLevel;

    fn reduce(&self, worry: &Self::Worry) -> Self::Worry;

    /// Whether `reduce` leaves every monkey's divisibility test unchanged.
    fn preserves_divisibility(&self) -> bool;
}

/// Relief after each inspection: worry is divided by three, rounding down.
///
/// Nothing bounds the result, so worry is tracked without a size limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dampened;

impl WorryReducer for Dampened {
    type Worry = BigUint;

    fn reduce(&self, worry: &BigUint) -> BigUint {
        worry / 3u32
    }

    fn preserves_divisibility(&self) -> bool {
        false
    }
}

/// Reduces modulo the product of all divisors.
///
/// If `d` divides `m`, then `x % d == (x % m) % d`, so reducing modulo a
/// common multiple of every divisor keeps each monkey's test answering exactly
/// as it would on the unreduced value.
///
/// The modulus fits in a `u64` and worry is held in a `u128`, so an inspection
/// of a reduced item (at most a square of a `u64`) can never overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedEquivalence {
    modulus: u64,
}

impl BoundedEquivalence {
    /// `modulus` must be a multiple of every divisor in the run.
    pub fn new(modulus: u64) -> Result<Self, ConfigError> {
        if modulus == 0 {
            return Err(ConfigError::ZeroModulus);
        }
        Ok(BoundedEquivalence { modulus })
    }

    pub fn for_monkeys<W>(monkeys: &[Monkey<W>]) -> Result<Self, ConfigError> {
        let modulus = monkeys
            .iter()
            .try_fold(1u64, |acc, monkey| acc.checked_mul(monkey.divisor()))
            .ok_or(ConfigError::ModulusOverflow)?;
        BoundedEquivalence::new(modulus)
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }
}

impl WorryReducer for BoundedEquivalence {
    type Worry = u128;

    fn reduce(&self, worry: &u128) -> u128 {
        worry % u128::from(self.modulus)
    }

    fn preserves_divisibility(&self) -> bool {
        true
    }
}
