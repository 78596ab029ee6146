//! Arithmetic helpers shared by the converters

pub mod math;
