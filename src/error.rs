//! Error types shared by the tempo map and the conversion engine

use thiserror::Error;

use crate::timespan::TimeSpanKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeSpanError {
    /// Bar/beat and musical conversions only work with ticks-per-quarter-note division
    #[error("{0} conversion requires a ticks-per-quarter-note time division")]
    UnsupportedTimeDivision(TimeSpanKind),
    #[error("invalid time span: {0}")]
    InvalidRepresentation(String),
    #[error("subtraction produces a negative result: {minuend} - {subtrahend}")]
    NegativeResult { minuend: u64, subtrahend: u64 },
    #[error("no converter registered for {0} time spans")]
    UnknownRepresentationKind(TimeSpanKind),
    #[error("invalid tempo: {0} microseconds per quarter note")]
    InvalidTempo(u64),
    #[error("invalid time signature: {numerator}/{denominator}")]
    InvalidTimeSignature { numerator: u32, denominator: u32 },
    #[error("invalid time division: {0}")]
    InvalidTimeDivision(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, TimeSpanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TimeSpanError::UnsupportedTimeDivision(TimeSpanKind::BarBeatCents);
        assert_eq!(
            err.to_string(),
            "bar/beat/cents conversion requires a ticks-per-quarter-note time division"
        );

        let err = TimeSpanError::NegativeResult { minuend: 10, subtrahend: 20 };
        assert_eq!(err.to_string(), "subtraction produces a negative result: 10 - 20");

        let err = TimeSpanError::InvalidTimeSignature { numerator: 3, denominator: 5 };
        assert_eq!(err.to_string(), "invalid time signature: 3/5");
    }
}
