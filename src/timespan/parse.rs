//! Text forms of time spans
//!
//! | Kind             | Form                | Example    |
//! |------------------|---------------------|------------|
//! | MIDI             | `ticks`             | `960`      |
//! | Metric           | `h:m:s:ms` or `m:s` | `0:1:30:0` |
//! | Musical          | `n/d`               | `3/8`      |
//! | Bar/beat/ticks   | `bars.beats.ticks`  | `2.1.120`  |
//! | Bar/beat/cents   | `bars.beats.centsc` | `1.2.25c`  |

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{
    BarBeatCentsTimeSpan, BarBeatTicksTimeSpan, MetricTimeSpan, MidiTimeSpan, MusicalTimeSpan, TimeSpan,
};
use crate::error::{Result, TimeSpanError};

type Pattern = Lazy<std::result::Result<Regex, regex::Error>>;

static MIDI: Pattern = Lazy::new(|| Regex::new(r"^\s*(\d+)\s*$"));
static METRIC_FULL: Pattern = Lazy::new(|| Regex::new(r"^\s*(\d+):(\d+):(\d+):(\d+)\s*$"));
static METRIC_SHORT: Pattern = Lazy::new(|| Regex::new(r"^\s*(\d+):(\d+)\s*$"));
static MUSICAL: Pattern = Lazy::new(|| Regex::new(r"^\s*(\d+)\s*/\s*(\d+)\s*$"));
static BAR_BEAT_TICKS: Pattern = Lazy::new(|| Regex::new(r"^\s*(\d+)\.(\d+)\.(\d+)\s*$"));
static BAR_BEAT_CENTS: Pattern = Lazy::new(|| Regex::new(r"^\s*(\d+)\.(\d+)\.(\d+(?:\.\d+)?)\s*c\s*$"));

fn captures<'t>(pattern: &Pattern, input: &'t str) -> Result<Option<Captures<'t>>> {
    match &**pattern {
        Ok(regex) => Ok(regex.captures(input)),
        Err(e) => Err(TimeSpanError::Parse(format!("bad time span pattern: {}", e))),
    }
}

fn number<T: FromStr>(caps: &Captures, group: usize) -> Result<T> {
    let text = caps.get(group).map(|m| m.as_str()).unwrap_or_default();
    text.parse::<T>()
        .map_err(|_| TimeSpanError::Parse(format!("'{}' is out of range", text)))
}

fn mismatch(input: &str, what: &str) -> TimeSpanError {
    TimeSpanError::Parse(format!("'{}' is not a {} time span", input, what))
}

impl FromStr for MidiTimeSpan {
    type Err = TimeSpanError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = captures(&MIDI, s)?.ok_or_else(|| mismatch(s, "MIDI"))?;
        Ok(MidiTimeSpan::new(number(&caps, 1)?))
    }
}

impl FromStr for MetricTimeSpan {
    type Err = TimeSpanError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(caps) = captures(&METRIC_FULL, s)? {
            return Ok(MetricTimeSpan::new(
                number(&caps, 1)?,
                number(&caps, 2)?,
                number(&caps, 3)?,
                number(&caps, 4)?,
            ));
        }
        let caps = captures(&METRIC_SHORT, s)?.ok_or_else(|| mismatch(s, "metric"))?;
        Ok(MetricTimeSpan::new(0, number(&caps, 1)?, number(&caps, 2)?, 0))
    }
}

impl FromStr for MusicalTimeSpan {
    type Err = TimeSpanError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = captures(&MUSICAL, s)?.ok_or_else(|| mismatch(s, "musical"))?;
        MusicalTimeSpan::new(number(&caps, 1)?, number(&caps, 2)?)
            .map_err(|e| TimeSpanError::Parse(format!("'{}': {}", s, e)))
    }
}

impl FromStr for BarBeatTicksTimeSpan {
    type Err = TimeSpanError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = captures(&BAR_BEAT_TICKS, s)?.ok_or_else(|| mismatch(s, "bar/beat/ticks"))?;
        Ok(BarBeatTicksTimeSpan::new(
            number(&caps, 1)?,
            number(&caps, 2)?,
            number(&caps, 3)?,
        ))
    }
}

impl FromStr for BarBeatCentsTimeSpan {
    type Err = TimeSpanError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = captures(&BAR_BEAT_CENTS, s)?.ok_or_else(|| mismatch(s, "bar/beat/cents"))?;
        BarBeatCentsTimeSpan::new(number(&caps, 1)?, number(&caps, 2)?, number(&caps, 3)?)
            .map_err(|e| TimeSpanError::Parse(format!("'{}': {}", s, e)))
    }
}

impl FromStr for TimeSpan {
    type Err = TimeSpanError;

    /// Try each text form in turn: MIDI, metric, musical, bar/beat/ticks,
    /// bar/beat/cents
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(span) = s.parse::<MidiTimeSpan>() {
            return Ok(span.into());
        }
        if let Ok(span) = s.parse::<MetricTimeSpan>() {
            return Ok(span.into());
        }
        if let Ok(span) = s.parse::<MusicalTimeSpan>() {
            return Ok(span.into());
        }
        if let Ok(span) = s.parse::<BarBeatTicksTimeSpan>() {
            return Ok(span.into());
        }
        if let Ok(span) = s.parse::<BarBeatCentsTimeSpan>() {
            return Ok(span.into());
        }
        Err(TimeSpanError::Parse(format!("'{}' is not a time span", s)))
    }
}
