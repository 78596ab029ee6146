//! Resolution of sums and differences of time spans

use super::ConverterRegistry;
use crate::error::{Result, TimeSpanError};
use crate::tempo_map::{TempoMap, Tick};
use crate::timespan::{kind_mismatch, MathOperation, MathOperationMode, TimeSpan, TimeSpanKind};

/// Resolve both operands through `registry`, anchored as the span's mode
/// says, then combine them
pub(crate) fn from_span(span: &TimeSpan, anchor: Tick, tempo_map: &TempoMap, registry: &ConverterRegistry) -> Result<Tick> {
    let math = match span {
        TimeSpan::Math(math) => math,
        other => return Err(kind_mismatch(TimeSpanKind::Math, other.kind())),
    };

    let (first, second) = match math.mode() {
        MathOperationMode::TimeTime => (
            registry.convert_time_to_ticks(math.first(), tempo_map)?,
            registry.convert_time_to_ticks(math.second(), tempo_map)?,
        ),
        MathOperationMode::TimeLength => {
            let position = registry.convert_time_to_ticks(math.first(), tempo_map)?;
            (position, registry.convert_length_to_ticks(math.second(), position, tempo_map)?)
        }
        MathOperationMode::LengthLength => (
            registry.convert_length_to_ticks(math.first(), anchor, tempo_map)?,
            registry.convert_length_to_ticks(math.second(), anchor, tempo_map)?,
        ),
    };

    match math.operation() {
        MathOperation::Sum => first.checked_add(second).ok_or_else(|| {
            TimeSpanError::InvalidRepresentation(format!("{} + {} ticks overflows", first, second))
        }),
        MathOperation::Subtract => first.checked_sub(second).ok_or(TimeSpanError::NegativeResult {
            minuend: first,
            subtrahend: second,
        }),
    }
}
