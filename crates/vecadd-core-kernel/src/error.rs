//! Kernel error types

use std::fmt;

use thiserror::Error;

/// Which buffer of `c = a + b` a validation error refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operand {
    A,
    B,
    C,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operand::A => "a",
            Operand::B => "b",
            Operand::C => "c",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("{op}: length mismatch: `{operand}` has {len} elements, need {required}")]
    LengthMismatch {
        op: &'static str,
        operand: Operand,
        len: usize,
        required: usize,
    },

    #[error("{op}: invalid element count {count}")]
    InvalidCount { op: &'static str, count: i64 },
}

pub type Result<T> = std::result::Result<T, KernelError>;
