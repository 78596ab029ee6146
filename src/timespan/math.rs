//! Symbolic sum or difference of two spans

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TimeSpan;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MathOperation {
    Sum,
    Subtract,
}

/// How the operands of a math span are anchored when converted
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MathOperationMode {
    /// Both operands are positions from tick 0
    TimeTime,
    /// The first operand is a position, the second a length starting there
    TimeLength,
    /// Both operands are lengths from the same anchor
    LengthLength,
}

/// Two spans combined by a sum or difference, evaluated lazily against
/// a tempo map
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MathTimeSpan {
    first: Box<TimeSpan>,
    second: Box<TimeSpan>,
    operation: MathOperation,
    mode: MathOperationMode,
}

impl MathTimeSpan {
    pub fn new(first: TimeSpan, second: TimeSpan, operation: MathOperation, mode: MathOperationMode) -> Self {
        MathTimeSpan {
            first: Box::new(first),
            second: Box::new(second),
            operation,
            mode,
        }
    }

    pub fn first(&self) -> &TimeSpan {
        &self.first
    }

    pub fn second(&self) -> &TimeSpan {
        &self.second
    }

    pub fn operation(&self) -> MathOperation {
        self.operation
    }

    pub fn mode(&self) -> MathOperationMode {
        self.mode
    }
}

impl fmt::Display for MathTimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.operation {
            MathOperation::Sum => '+',
            MathOperation::Subtract => '-',
        };
        write!(f, "({} {} {})", self.first, sign, self.second)
    }
}
