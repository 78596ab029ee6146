//! Musical fraction of a whole note

use std::fmt;

use num_rational::Ratio;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimeSpanError};

/// Length as a fraction of a whole note, always kept reduced.
///
/// 1/4 is a quarter note whatever the tempo map says; only the time
/// division matters when converting to ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MusicalTimeSpan {
    fraction: Ratio<u64>,
}

impl MusicalTimeSpan {
    pub const WHOLE: MusicalTimeSpan = MusicalTimeSpan::constant(1);
    pub const HALF: MusicalTimeSpan = MusicalTimeSpan::constant(2);
    pub const QUARTER: MusicalTimeSpan = MusicalTimeSpan::constant(4);
    pub const EIGHTH: MusicalTimeSpan = MusicalTimeSpan::constant(8);
    pub const SIXTEENTH: MusicalTimeSpan = MusicalTimeSpan::constant(16);
    pub const THIRTY_SECOND: MusicalTimeSpan = MusicalTimeSpan::constant(32);
    pub const SIXTY_FOURTH: MusicalTimeSpan = MusicalTimeSpan::constant(64);

    const fn constant(denominator: u64) -> Self {
        MusicalTimeSpan {
            fraction: Ratio::new_raw(1, denominator),
        }
    }

    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        if denominator == 0 {
            return Err(TimeSpanError::InvalidRepresentation(format!(
                "musical fraction {}/0 has a zero denominator",
                numerator
            )));
        }
        Ok(MusicalTimeSpan {
            fraction: Ratio::new(numerator, denominator),
        })
    }

    pub fn from_ratio(fraction: Ratio<u64>) -> Self {
        MusicalTimeSpan { fraction }
    }

    pub fn numerator(&self) -> u64 {
        *self.fraction.numer()
    }

    pub fn denominator(&self) -> u64 {
        *self.fraction.denom()
    }

    pub fn fraction(&self) -> Ratio<u64> {
        self.fraction
    }

    /// Lengthen by `dots` augmentation dots: each dot adds half of the
    /// previous addition, so one dot is ×3/2 and two dots ×7/4
    pub fn dotted(self, dots: u32) -> Result<Self> {
        let denominator = 1u64.checked_shl(dots).filter(|d| *d <= u64::MAX / 2).ok_or_else(|| {
            TimeSpanError::InvalidRepresentation(format!("{} dots is too many", dots))
        })?;
        let numerator = denominator * 2 - 1;
        self.scaled(numerator, denominator)
    }

    /// Three in the time of two
    pub fn triplet(self) -> Result<Self> {
        self.tuplet(3, 2)
    }

    /// `notes` in the time of `space`
    pub fn tuplet(self, notes: u64, space: u64) -> Result<Self> {
        if notes == 0 || space == 0 {
            return Err(TimeSpanError::InvalidRepresentation(format!(
                "tuplet {}:{} must have positive parts",
                notes, space
            )));
        }
        self.scaled(space, notes)
    }

    /// Sum, or `None` when the reduced result does not fit in 64 bits
    pub fn checked_add(self, other: MusicalTimeSpan) -> Option<MusicalTimeSpan> {
        let (left, right, denominator) = self.cross(other)?;
        MusicalTimeSpan::reduced(left.checked_add(right)?, denominator)
    }

    /// Difference, or `None` when it would be negative or does not fit
    pub fn checked_sub(self, other: MusicalTimeSpan) -> Option<MusicalTimeSpan> {
        let (left, right, denominator) = self.cross(other)?;
        MusicalTimeSpan::reduced(left.checked_sub(right)?, denominator)
    }

    // Both numerators over the common denominator b*d, widened so the
    // products of two u64 values cannot overflow
    fn cross(self, other: MusicalTimeSpan) -> Option<(u128, u128, u128)> {
        let (a, b) = (self.numerator() as u128, self.denominator() as u128);
        let (c, d) = (other.numerator() as u128, other.denominator() as u128);
        Some((a.checked_mul(d)?, c.checked_mul(b)?, b.checked_mul(d)?))
    }

    fn reduced(numerator: u128, denominator: u128) -> Option<MusicalTimeSpan> {
        let fraction = Ratio::new(numerator, denominator);
        let numer = u64::try_from(*fraction.numer()).ok()?;
        let denom = u64::try_from(*fraction.denom()).ok()?;
        Some(MusicalTimeSpan::from_ratio(Ratio::new_raw(numer, denom)))
    }

    fn scaled(self, numerator: u64, denominator: u64) -> Result<Self> {
        let overflow =
            || TimeSpanError::InvalidRepresentation(format!("{} scaled by {}/{} overflows", self, numerator, denominator));
        let numer = self.numerator().checked_mul(numerator).ok_or_else(overflow)?;
        let denom = self.denominator().checked_mul(denominator).ok_or_else(overflow)?;
        MusicalTimeSpan::new(numer, denom)
    }
}

impl Default for MusicalTimeSpan {
    fn default() -> Self {
        MusicalTimeSpan {
            fraction: Ratio::new_raw(0, 1),
        }
    }
}

impl fmt::Display for MusicalTimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator(), self.denominator())
    }
}
