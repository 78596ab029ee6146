//! Default values for tempo maps and time spans
//!
//! A tempo map with no explicit tempo or time signature change behaves as
//! if 120 BPM in 4/4 were set at tick 0.

/// Default tempo: 500,000 µs per quarter note (120 BPM)
pub const DEFAULT_MICROSECONDS_PER_QUARTER_NOTE: u64 = 500_000;

/// Default time signature numerator (beats per bar)
pub const DEFAULT_TIME_SIGNATURE_NUMERATOR: u32 = 4;

/// Default time signature denominator (note value of one beat)
pub const DEFAULT_TIME_SIGNATURE_DENOMINATOR: u32 = 4;

/// Default ticks per quarter note (MIDI resolution)
/// 96 is the customary SMF default when nothing else is specified
pub const DEFAULT_TICKS_PER_QUARTER_NOTE: u16 = 96;

/// Largest resolution the 15-bit SMF header field can carry
pub const MAX_TICKS_PER_QUARTER_NOTE: u16 = 0x7FFF;

/// Default MIDI velocity for notes built from time spans
pub const DEFAULT_VELOCITY: u8 = 64;

/// Cents in one beat
pub const CENTS_PER_BEAT: f64 = 100.0;

/// Cents below this value count as zero when converting a bar/beat/cents span
pub const CENTS_EPSILON: f64 = 1e-6;

pub const QUARTER_NOTES_PER_WHOLE_NOTE: u64 = 4;

pub const MICROSECONDS_PER_MILLISECOND: u64 = 1_000;
pub const MICROSECONDS_PER_SECOND: u64 = 1_000_000;
pub const MICROSECONDS_PER_MINUTE: u64 = 60 * MICROSECONDS_PER_SECOND;
pub const MICROSECONDS_PER_HOUR: u64 = 60 * MICROSECONDS_PER_MINUTE;
