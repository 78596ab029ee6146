//! Time span representations
//!
//! A time span is a position (offset from tick 0) or a length (offset
//! from an anchor tick) expressed in one of several representations. The
//! representations form a closed set, modeled as the [`TimeSpan`] enum.
//!
//! Equality is structural: two spans of the same kind are equal when their
//! fields are equal, not when they denote the same number of ticks.

mod bar_beat_cents;
mod bar_beat_ticks;
mod math;
mod metric;
mod midi;
mod musical;
#[cfg(feature = "parse")]
mod parse;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use bar_beat_cents::BarBeatCentsTimeSpan;
pub use bar_beat_ticks::BarBeatTicksTimeSpan;
pub use math::{MathOperation, MathOperationMode, MathTimeSpan};
pub use metric::MetricTimeSpan;
pub use midi::MidiTimeSpan;
pub use musical::MusicalTimeSpan;

use crate::error::TimeSpanError;

/// Tag of a time span representation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeSpanKind {
    Midi,
    Metric,
    Musical,
    BarBeatTicks,
    BarBeatCents,
    Math,
}

impl TimeSpanKind {
    pub const ALL: [TimeSpanKind; 6] = [
        TimeSpanKind::Midi,
        TimeSpanKind::Metric,
        TimeSpanKind::Musical,
        TimeSpanKind::BarBeatTicks,
        TimeSpanKind::BarBeatCents,
        TimeSpanKind::Math,
    ];
}

impl fmt::Display for TimeSpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeSpanKind::Midi => "MIDI",
            TimeSpanKind::Metric => "metric",
            TimeSpanKind::Musical => "musical",
            TimeSpanKind::BarBeatTicks => "bar/beat/ticks",
            TimeSpanKind::BarBeatCents => "bar/beat/cents",
            TimeSpanKind::Math => "math",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TimeSpan {
    Midi(MidiTimeSpan),
    Metric(MetricTimeSpan),
    Musical(MusicalTimeSpan),
    BarBeatTicks(BarBeatTicksTimeSpan),
    BarBeatCents(BarBeatCentsTimeSpan),
    Math(MathTimeSpan),
}

impl TimeSpan {
    pub fn kind(&self) -> TimeSpanKind {
        match self {
            TimeSpan::Midi(_) => TimeSpanKind::Midi,
            TimeSpan::Metric(_) => TimeSpanKind::Metric,
            TimeSpan::Musical(_) => TimeSpanKind::Musical,
            TimeSpan::BarBeatTicks(_) => TimeSpanKind::BarBeatTicks,
            TimeSpan::BarBeatCents(_) => TimeSpanKind::BarBeatCents,
            TimeSpan::Math(_) => TimeSpanKind::Math,
        }
    }

    /// Canonical zero of a representation; Math has none
    pub fn zero(kind: TimeSpanKind) -> Option<TimeSpan> {
        match kind {
            TimeSpanKind::Midi => Some(MidiTimeSpan::default().into()),
            TimeSpanKind::Metric => Some(MetricTimeSpan::default().into()),
            TimeSpanKind::Musical => Some(MusicalTimeSpan::default().into()),
            TimeSpanKind::BarBeatTicks => Some(BarBeatTicksTimeSpan::default().into()),
            TimeSpanKind::BarBeatCents => Some(BarBeatCentsTimeSpan::default().into()),
            TimeSpanKind::Math => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            TimeSpan::Midi(span) => span.ticks == 0,
            TimeSpan::Metric(span) => span.total_microseconds() == 0,
            TimeSpan::Musical(span) => span.numerator() == 0,
            TimeSpan::BarBeatTicks(span) => *span == BarBeatTicksTimeSpan::default(),
            TimeSpan::BarBeatCents(span) => *span == BarBeatCentsTimeSpan::default(),
            TimeSpan::Math(span) => span.first().is_zero() && span.second().is_zero(),
        }
    }

    /// Sum of two spans.
    ///
    /// Tick and musical spans of the same kind are added in place since
    /// they do not depend on the tempo map; anything else, including a
    /// musical sum too large for 64 bits, becomes a [`MathTimeSpan`]
    /// resolved at conversion time.
    pub fn add(self, other: TimeSpan, mode: MathOperationMode) -> TimeSpan {
        match (self, other) {
            (TimeSpan::Midi(a), TimeSpan::Midi(b)) => TimeSpan::Midi(a + b),
            (TimeSpan::Musical(a), TimeSpan::Musical(b)) => match a.checked_add(b) {
                Some(sum) => TimeSpan::Musical(sum),
                None => MathTimeSpan::new(a.into(), b.into(), MathOperation::Sum, mode).into(),
            },
            (a, b) => MathTimeSpan::new(a, b, MathOperation::Sum, mode).into(),
        }
    }

    /// Difference of two spans, folded in place when it is non-negative
    pub fn subtract(self, other: TimeSpan, mode: MathOperationMode) -> TimeSpan {
        match (self, other) {
            (TimeSpan::Midi(a), TimeSpan::Midi(b)) if a >= b => TimeSpan::Midi(MidiTimeSpan::new(a.ticks - b.ticks)),
            (TimeSpan::Musical(a), TimeSpan::Musical(b)) => match a.checked_sub(b) {
                Some(difference) => TimeSpan::Musical(difference),
                None => MathTimeSpan::new(a.into(), b.into(), MathOperation::Subtract, mode).into(),
            },
            (a, b) => MathTimeSpan::new(a, b, MathOperation::Subtract, mode).into(),
        }
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSpan::Midi(span) => span.fmt(f),
            TimeSpan::Metric(span) => span.fmt(f),
            TimeSpan::Musical(span) => span.fmt(f),
            TimeSpan::BarBeatTicks(span) => span.fmt(f),
            TimeSpan::BarBeatCents(span) => span.fmt(f),
            TimeSpan::Math(span) => span.fmt(f),
        }
    }
}

pub(crate) fn kind_mismatch(expected: TimeSpanKind, actual: TimeSpanKind) -> TimeSpanError {
    TimeSpanError::InvalidRepresentation(format!("expected a {} time span, got {}", expected, actual))
}

/// A concrete representation that can be pulled back out of a [`TimeSpan`]
pub trait KindedTimeSpan: Into<TimeSpan> + TryFrom<TimeSpan, Error = TimeSpanError> {
    const KIND: TimeSpanKind;
}

macro_rules! kinded_time_span {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for TimeSpan {
            fn from(span: $ty) -> TimeSpan {
                TimeSpan::$variant(span)
            }
        }

        impl TryFrom<TimeSpan> for $ty {
            type Error = TimeSpanError;

            fn try_from(span: TimeSpan) -> Result<Self, TimeSpanError> {
                match span {
                    TimeSpan::$variant(inner) => Ok(inner),
                    other => Err(kind_mismatch(TimeSpanKind::$variant, other.kind())),
                }
            }
        }

        impl KindedTimeSpan for $ty {
            const KIND: TimeSpanKind = TimeSpanKind::$variant;
        }
    };
}

kinded_time_span!(MidiTimeSpan, Midi);
kinded_time_span!(MetricTimeSpan, Metric);
kinded_time_span!(MusicalTimeSpan, Musical);
kinded_time_span!(BarBeatTicksTimeSpan, BarBeatTicks);
kinded_time_span!(BarBeatCentsTimeSpan, BarBeatCents);
kinded_time_span!(MathTimeSpan, Math);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_for_every_kind() {
        for kind in TimeSpanKind::ALL {
            match TimeSpan::zero(kind) {
                Some(zero) => {
                    assert_eq!(zero.kind(), kind);
                    assert!(zero.is_zero());
                }
                None => assert_eq!(kind, TimeSpanKind::Math),
            }
        }
    }

    #[test]
    fn test_same_kind_add_folds() {
        let sum = TimeSpan::from(MidiTimeSpan::new(100))
            .add(MidiTimeSpan::new(20).into(), MathOperationMode::LengthLength);
        assert_eq!(sum, TimeSpan::Midi(MidiTimeSpan::new(120)));

        let sum = TimeSpan::from(MusicalTimeSpan::QUARTER)
            .add(MusicalTimeSpan::EIGHTH.into(), MathOperationMode::LengthLength);
        assert_eq!(sum, TimeSpan::Musical(MusicalTimeSpan::new(3, 8).unwrap()));
    }

    #[test]
    fn test_cross_kind_add_builds_math() {
        let sum = TimeSpan::from(MusicalTimeSpan::QUARTER)
            .add(MetricTimeSpan::from_microseconds(1_000).into(), MathOperationMode::TimeLength);
        match sum {
            TimeSpan::Math(math) => {
                assert_eq!(math.operation(), MathOperation::Sum);
                assert_eq!(math.mode(), MathOperationMode::TimeLength);
                assert_eq!(math.first().kind(), TimeSpanKind::Musical);
                assert_eq!(math.second().kind(), TimeSpanKind::Metric);
            }
            other => panic!("expected math span, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_subtract_stays_symbolic() {
        let difference = TimeSpan::from(MidiTimeSpan::new(10))
            .subtract(MidiTimeSpan::new(20).into(), MathOperationMode::LengthLength);
        assert_eq!(difference.kind(), TimeSpanKind::Math);

        let difference = TimeSpan::from(MidiTimeSpan::new(30))
            .subtract(MidiTimeSpan::new(20).into(), MathOperationMode::LengthLength);
        assert_eq!(difference, TimeSpan::Midi(MidiTimeSpan::new(10)));
    }

    #[test]
    fn test_musical_overflow_falls_back_to_math() {
        let a = MusicalTimeSpan::new(1, u64::MAX - 1).unwrap();
        let b = MusicalTimeSpan::new(1, u64::MAX - 2).unwrap();

        let sum = TimeSpan::from(a).add(b.into(), MathOperationMode::LengthLength);
        match sum {
            TimeSpan::Math(math) => {
                assert_eq!(math.operation(), MathOperation::Sum);
                assert_eq!(math.first(), &TimeSpan::Musical(a));
                assert_eq!(math.second(), &TimeSpan::Musical(b));
            }
            other => panic!("expected math span, got {:?}", other),
        }

        let difference = TimeSpan::from(b).subtract(a.into(), MathOperationMode::LengthLength);
        assert_eq!(difference.kind(), TimeSpanKind::Math);
    }

    #[test]
    fn test_try_from_wrong_kind() {
        let span = TimeSpan::from(MidiTimeSpan::new(5));
        let err = MetricTimeSpan::try_from(span).unwrap_err();
        assert_eq!(
            err,
            TimeSpanError::InvalidRepresentation("expected a metric time span, got MIDI".to_string())
        );
    }

    #[test]
    fn test_display() {
        let span = TimeSpan::from(BarBeatTicksTimeSpan::new(2, 1, 30));
        assert_eq!(span.to_string(), "2.1.30");
    }
}
