//! Bars, beats and ticks

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tempo_map::Tick;

/// Bars, beats and leftover ticks.
///
/// Spans produced by conversion keep `ticks` below one beat at the point
/// they are anchored. Hand-built spans may carry more; conversion back to
/// ticks simply adds them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarBeatTicksTimeSpan {
    pub bars: u64,
    pub beats: u64,
    pub ticks: Tick,
}

impl BarBeatTicksTimeSpan {
    pub fn new(bars: u64, beats: u64, ticks: Tick) -> Self {
        BarBeatTicksTimeSpan { bars, beats, ticks }
    }
}

impl fmt::Display for BarBeatTicksTimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.bars, self.beats, self.ticks)
    }
}
