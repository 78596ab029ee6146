//! Raw tick count

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::tempo_map::Tick;

/// Raw tick count
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MidiTimeSpan {
    pub ticks: Tick,
}

impl MidiTimeSpan {
    pub fn new(ticks: Tick) -> Self {
        MidiTimeSpan { ticks }
    }

    pub fn checked_sub(self, other: MidiTimeSpan) -> Option<MidiTimeSpan> {
        self.ticks.checked_sub(other.ticks).map(MidiTimeSpan::new)
    }
}

impl Add for MidiTimeSpan {
    type Output = MidiTimeSpan;

    fn add(self, other: MidiTimeSpan) -> MidiTimeSpan {
        MidiTimeSpan::new(self.ticks.saturating_add(other.ticks))
    }
}

impl From<Tick> for MidiTimeSpan {
    fn from(ticks: Tick) -> Self {
        MidiTimeSpan::new(ticks)
    }
}

impl fmt::Display for MidiTimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ticks)
    }
}
