//! Sorted time → value table for parameters that change over a sequence
//!
//! A `ValueLine` holds change points keyed by tick. The value in effect at
//! any tick is the one set by the last change point at or before it, or
//! the line's default when no change point precedes the tick.

use std::collections::BTreeMap;
use std::ops::{Bound, RangeBounds};

use serde::{Deserialize, Serialize};

/// Absolute position or length in MIDI ticks
pub type Tick = u64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueLine<T> {
    default: T,
    values: BTreeMap<Tick, T>,
}

impl<T: Default> Default for ValueLine<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> ValueLine<T> {
    /// Create an empty line that reports `default` everywhere
    pub fn new(default: T) -> Self {
        ValueLine {
            default,
            values: BTreeMap::new(),
        }
    }

    /// Build a line from change points in ascending time order.
    ///
    /// Input is not re-sorted by the caller's contract; a change point that
    /// repeats or precedes an earlier key is logged and overwrites it.
    pub fn from_changes<I>(default: T, changes: I) -> Self
    where
        I: IntoIterator<Item = (Tick, T)>,
    {
        let mut line = Self::new(default);
        let mut previous: Option<Tick> = None;

        for (time, value) in changes {
            if let Some(prev) = previous {
                if time <= prev {
                    log::warn!("Change point at tick {} is not after tick {}", time, prev);
                }
            }
            previous = Some(time);
            line.values.insert(time, value);
        }

        line
    }

    /// Value in effect at `time`
    pub fn at_time(&self, time: Tick) -> &T {
        self.values
            .range(..=time)
            .next_back()
            .map(|(_, value)| value)
            .unwrap_or(&self.default)
    }

    /// Insert a change point, or overwrite the value of an existing one
    pub fn set_value(&mut self, time: Tick, value: T) {
        self.values.insert(time, value);
    }

    /// Change points between `lo` and `hi` in ascending order.
    ///
    /// # Arguments
    /// * `inclusive_lo` - Include a change point exactly at `lo`
    /// * `exclusive_hi` - Leave out a change point exactly at `hi`
    pub fn changes_in_range(
        &self,
        lo: Tick,
        hi: Tick,
        inclusive_lo: bool,
        exclusive_hi: bool,
    ) -> impl Iterator<Item = (Tick, &T)> + '_ {
        let lower = if inclusive_lo { Bound::Included(lo) } else { Bound::Excluded(lo) };
        let upper = if exclusive_hi { Bound::Excluded(hi) } else { Bound::Included(hi) };

        // BTreeMap::range panics on inverted or doubly-excluded empty ranges
        let empty = lo > hi || (lo == hi && (!inclusive_lo || exclusive_hi));
        let range = if empty { None } else { Some(self.values.range((lower, upper))) };

        range.into_iter().flatten().map(|(time, value)| (*time, value))
    }

    /// Change points strictly inside `(lo, hi)`
    pub fn changes_between(&self, lo: Tick, hi: Tick) -> impl Iterator<Item = (Tick, &T)> + '_ {
        self.changes_in_range(lo, hi, false, true)
    }

    /// Change points strictly after `time`
    pub fn changes_after(&self, time: Tick) -> impl Iterator<Item = (Tick, &T)> + '_ {
        self.values
            .range((Bound::Excluded(time), Bound::Unbounded))
            .map(|(time, value)| (*time, value))
    }

    /// Remove every change point whose tick falls in `range`
    pub fn delete_values<R: RangeBounds<Tick>>(&mut self, range: R) {
        self.values.retain(|time, _| !range.contains(time));
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tick, &T)> + '_ {
        self.values.iter().map(|(time, value)| (*time, value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }
}
