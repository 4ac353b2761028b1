//! Configuration error types

use thiserror::Error;

/// Errors raised while validating generator parameters.
///
/// All of these are detected before any table is computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("number of bits must be 7 .. 12 (got {bits})")]
    BitDepthOutOfRange { bits: u32 },

    #[error("compand scale constant must be finite and positive (got {scale})")]
    InvalidScale { scale: f64 },

    #[error("compand curve is not finite at x = {x}")]
    NonFiniteCurve { x: u32 },

    #[error("empty sampling window {min} .. {max}")]
    EmptyWindow { min: u32, max: u32 },
}
