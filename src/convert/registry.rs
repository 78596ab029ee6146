//! Lookup table from time span kind to conversion algorithms

use std::collections::HashMap;
use std::fmt;

use super::{bar_beat_cents, bar_beat_ticks, math, metric, midi, musical};
use crate::error::{Result, TimeSpanError};
use crate::tempo_map::{TempoMap, Tick};
use crate::timespan::{TimeSpan, TimeSpanKind};

/// Ticks (length, anchor) into a time span of one kind
pub type ConvertTo = fn(Tick, Tick, &TempoMap) -> Result<TimeSpan>;

/// A time span of one kind, anchored at a tick, into ticks. The registry
/// is passed along so composite spans can convert their operands.
pub type ConvertFrom = fn(&TimeSpan, Tick, &TempoMap, &ConverterRegistry) -> Result<Tick>;

#[derive(Clone, Copy)]
pub struct ConverterEntry {
    /// `None` for kinds that cannot be produced from ticks (math spans)
    pub to: Option<ConvertTo>,
    pub from: ConvertFrom,
}

impl fmt::Debug for ConverterEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterEntry")
            .field("to", &self.to.is_some())
            .field("from", &true)
            .finish()
    }
}

#[derive(Clone)]
pub struct ConverterRegistry {
    entries: HashMap<TimeSpanKind, ConverterEntry>,
}

impl ConverterRegistry {
    /// A registry with no converters; every conversion fails until kinds
    /// are registered
    pub fn empty() -> Self {
        ConverterRegistry {
            entries: HashMap::new(),
        }
    }

    /// Register (or replace) the algorithms for `kind`
    pub fn register(&mut self, kind: TimeSpanKind, entry: ConverterEntry) -> &mut Self {
        self.entries.insert(kind, entry);
        self
    }

    pub fn entry(&self, kind: TimeSpanKind) -> Result<&ConverterEntry> {
        self.entries
            .get(&kind)
            .ok_or(TimeSpanError::UnknownRepresentationKind(kind))
    }

    pub fn is_registered(&self, kind: TimeSpanKind) -> bool {
        self.entries.contains_key(&kind)
    }

    /// Length of `length` ticks starting at `anchor`, as a `kind` span
    pub fn convert_length(&self, length: Tick, anchor: Tick, kind: TimeSpanKind, tempo_map: &TempoMap) -> Result<TimeSpan> {
        log::trace!("Converting {} ticks at {} to {}", length, anchor, kind);
        let to = self
            .entry(kind)?
            .to
            .ok_or(TimeSpanError::UnknownRepresentationKind(kind))?;
        to(length, anchor, tempo_map)
    }

    /// Ticks covered by `span` when it starts at `anchor`
    pub fn convert_length_to_ticks(&self, span: &TimeSpan, anchor: Tick, tempo_map: &TempoMap) -> Result<Tick> {
        log::trace!("Converting {} at {} to ticks", span, anchor);
        let from = self.entry(span.kind())?.from;
        from(span, anchor, tempo_map, self)
    }

    /// Position `time` as a `kind` span measured from tick 0
    pub fn convert_time(&self, time: Tick, kind: TimeSpanKind, tempo_map: &TempoMap) -> Result<TimeSpan> {
        self.convert_length(time, 0, kind, tempo_map)
    }

    /// Tick position denoted by `span` measured from tick 0
    pub fn convert_time_to_ticks(&self, span: &TimeSpan, tempo_map: &TempoMap) -> Result<Tick> {
        self.convert_length_to_ticks(span, 0, tempo_map)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        let mut registry = ConverterRegistry::empty();
        registry
            .register(
                TimeSpanKind::Midi,
                ConverterEntry { to: Some(midi::to_span), from: midi::from_span },
            )
            .register(
                TimeSpanKind::Metric,
                ConverterEntry { to: Some(metric::to_span), from: metric::from_span },
            )
            .register(
                TimeSpanKind::Musical,
                ConverterEntry { to: Some(musical::to_span), from: musical::from_span },
            )
            .register(
                TimeSpanKind::BarBeatTicks,
                ConverterEntry { to: Some(bar_beat_ticks::to_span), from: bar_beat_ticks::from_span },
            )
            .register(
                TimeSpanKind::BarBeatCents,
                ConverterEntry { to: Some(bar_beat_cents::to_span), from: bar_beat_cents::from_span },
            )
            .register(TimeSpanKind::Math, ConverterEntry { to: None, from: math::from_span });
        registry
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&TimeSpanKind> = self.entries.keys().collect();
        kinds.sort();
        f.debug_struct("ConverterRegistry").field("kinds", &kinds).finish()
    }
}
