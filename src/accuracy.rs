//! Accuracy of reduced-precision integer magnitudes
//!
//! For a bit depth `b` in 7..=12 both coordinates are truncated to `b` bits,
//! the integer magnitude is computed and scaled back up, and the result is
//! compared against the full 12-bit `floor(sqrt(i² + j²))` over a fixed
//! sampling window.

use serde::Serialize;
use tracing::debug;

use crate::error::ConfigError;

/// Full sample precision in bits
pub const FULL_BITS: u32 = 12;

/// Smallest supported reduced bit depth
pub const MIN_BITS: u32 = 7;

/// Ratio reported when the exact magnitude is 0 but the approximation is not
pub const RATIO_SENTINEL: f64 = 1_000_000.0;

/// Lower edge of the sampling window; relative error near zero is meaningless
pub const WINDOW_MIN: u32 = 100;

/// Upper edge of the sampling window (-2048 exists but is not sampled)
pub const WINDOW_MAX: u32 = 2047;

/// Validated bit depth for the approximation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BitDepth(u32);

impl BitDepth {
    pub fn new(bits: u32) -> Result<Self, ConfigError> {
        if (MIN_BITS..=FULL_BITS).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(ConfigError::BitDepthOutOfRange { bits })
        }
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Number of low bits dropped from each coordinate
    pub fn shift(&self) -> u32 {
        FULL_BITS - self.0
    }
}

impl Default for BitDepth {
    fn default() -> Self {
        Self(FULL_BITS)
    }
}

impl TryFrom<u32> for BitDepth {
    type Error = ConfigError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

/// Inclusive coordinate range sampled on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleWindow {
    pub min: u32,
    pub max: u32,
}

impl SampleWindow {
    pub fn new(min: u32, max: u32) -> Result<Self, ConfigError> {
        if min > max || max > WINDOW_MAX {
            return Err(ConfigError::EmptyWindow { min, max });
        }
        Ok(Self { min, max })
    }

    /// Number of sampled (i, j) pairs
    pub fn pairs(&self) -> u64 {
        let side = (self.max - self.min + 1) as u64;
        side * side
    }
}

impl Default for SampleWindow {
    fn default() -> Self {
        Self {
            min: WINDOW_MIN,
            max: WINDOW_MAX,
        }
    }
}

/// One evaluated input pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MagnitudeSample {
    pub i: u32,
    pub j: u32,
    /// Reduced-precision magnitude, rescaled to 12 bits
    pub approx: u32,
    /// Full-precision magnitude
    pub exact: u32,
}

/// Extremal ratio seen so far
///
/// Starts at 1.0 with no sample; only strictly larger (or smaller) ratios
/// replace it, so the first pair reaching a new extreme is the one kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extremum {
    pub ratio: f64,
    pub sample: Option<MagnitudeSample>,
}

impl Default for Extremum {
    fn default() -> Self {
        Self {
            ratio: 1.0,
            sample: None,
        }
    }
}

/// Worst under- and over-approximation over the sampling window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyReport {
    pub bits: BitDepth,
    pub window: SampleWindow,
    pub smallest: Extremum,
    pub largest: Extremum,
}

/// `floor(sqrt(i² + j²))`
///
/// f64 sqrt is correctly rounded, so the floor is exact for these ranges.
#[inline(always)]
pub fn exact_magnitude(i: u32, j: u32) -> u32 {
    let sum = (i as u64) * (i as u64) + (j as u64) * (j as u64);
    (sum as f64).sqrt() as u32
}

/// Magnitude computed from coordinates truncated to `bits`
#[inline(always)]
pub fn approx_magnitude(bits: BitDepth, i: u32, j: u32) -> u32 {
    let shift = bits.shift();
    if shift == 0 {
        return exact_magnitude(i, j);
    }
    exact_magnitude(i >> shift, j >> shift) << shift
}

/// `approx / exact`, with explicit handling of a zero reference
pub fn magnitude_ratio(approx: u32, exact: u32) -> f64 {
    if exact == 0 {
        if approx == 0 {
            1.0
        } else {
            RATIO_SENTINEL
        }
    } else {
        approx as f64 / exact as f64
    }
}

/// Evaluate `bits` over the standard 100..=2047 window
pub fn evaluate(bits: BitDepth) -> AccuracyReport {
    evaluate_window(bits, SampleWindow::default())
}

/// Evaluate `bits` over every (i, j) in `window` × `window`
pub fn evaluate_window(bits: BitDepth, window: SampleWindow) -> AccuracyReport {
    let mut smallest = Extremum::default();
    let mut largest = Extremum::default();

    for i in window.min..=window.max {
        for j in window.min..=window.max {
            let exact = exact_magnitude(i, j);
            let approx = approx_magnitude(bits, i, j);
            let ratio = magnitude_ratio(approx, exact);

            let sample = MagnitudeSample {
                i,
                j,
                approx,
                exact,
            };
            if ratio > largest.ratio {
                largest = Extremum {
                    ratio,
                    sample: Some(sample),
                };
            }
            if ratio < smallest.ratio {
                smallest = Extremum {
                    ratio,
                    sample: Some(sample),
                };
            }
        }
    }

    debug!(
        "Evaluated {} pairs at {} bits: ratio {:.6} .. {:.6}",
        window.pairs(),
        bits.bits(),
        smallest.ratio,
        largest.ratio
    );

    AccuracyReport {
        bits,
        window,
        smallest,
        largest,
    }
}
