//! Logarithmic companding of 12-bit sample magnitudes
//!
//! A raw magnitude |I| or |Q| in 0..=2047 is compressed to 0..=255 with
//! `y = floor(ln(1 + x/k) * com_fac)`, where `com_fac` is calibrated so that
//! 2047 lands exactly on 255. The reverse table keeps the first raw
//! magnitude that reaches each compressed level.

use tracing::debug;

use crate::error::ConfigError;

/// Number of raw magnitudes (0..=2047)
pub const RAW_LEVELS: usize = 2048;

/// Number of compressed magnitudes (0..=255)
pub const COMPRESSED_LEVELS: usize = 256;

/// Largest raw magnitude covered by the table
pub const RAW_MAX: u16 = (RAW_LEVELS - 1) as u16;

/// Largest compressed magnitude
pub const COMPRESSED_MAX: u8 = (COMPRESSED_LEVELS - 1) as u8;

/// Scale constant `k`, iterated offline so the curve is linear near zero
pub const DEFAULT_SCALE: f64 = 70.0;

/// The compressive curve `ln(1 + x/k)` together with its calibration factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompandCurve {
    scale: f64,
    com_fac: f64,
}

impl CompandCurve {
    /// Build a curve for scale constant `k`, rejecting values that would
    /// make the log argument or the calibration factor non-finite.
    pub fn new(scale: f64) -> Result<Self, ConfigError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidScale { scale });
        }

        let curve = Self::calibrated(scale);
        if !curve.com_fac.is_finite() || curve.com_fac <= 0.0 {
            return Err(ConfigError::NonFiniteCurve {
                x: RAW_MAX as u32,
            });
        }

        Ok(curve)
    }

    fn calibrated(scale: f64) -> Self {
        let top = (1.0 + RAW_MAX as f64 / scale).ln();
        Self {
            scale,
            com_fac: COMPRESSED_MAX as f64 / top,
        }
    }

    /// Scale constant `k`
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Calibration factor, `255 / ln(1 + 2047/k)`
    pub fn com_fac(&self) -> f64 {
        self.com_fac
    }

    /// Uncalibrated curve value `ln(1 + x/k)`
    pub fn shape(&self, x: u16) -> f64 {
        (1.0 + x as f64 / self.scale).ln()
    }

    /// Compressed level for raw magnitude `x` (truncated, not rounded)
    pub fn compress(&self, x: u16) -> u8 {
        if x == 0 {
            return 0;
        }
        // The calibrated product at 2047 can land at 254.999...
        if x >= RAW_MAX {
            return COMPRESSED_MAX;
        }
        (self.shape(x) * self.com_fac) as u8
    }
}

impl Default for CompandCurve {
    fn default() -> Self {
        Self::calibrated(DEFAULT_SCALE)
    }
}

/// Forward (2048 → 256) and reverse (256 → 2048) compand tables
#[derive(Debug, Clone)]
pub struct CompandTable {
    curve: CompandCurve,
    forward: Vec<u8>,
    reverse: Vec<u16>,
}

impl CompandTable {
    /// Generate both tables from `curve`
    pub fn new(curve: CompandCurve) -> Self {
        let mut forward = vec![0u8; RAW_LEVELS];
        let mut reverse = vec![0u16; COMPRESSED_LEVELS];

        let mut prev = 0u8;
        for x in 1..=RAW_MAX {
            let level = curve.compress(x);
            forward[x as usize] = level;
            if level != prev {
                // First raw magnitude reaching this level wins
                reverse[level as usize] = x;
                prev = level;
            }
        }

        let table = Self {
            curve,
            forward,
            reverse,
        };

        debug!(
            "Compand table: k = {}, com_fac = {:.6}, {} skipped levels",
            curve.scale(),
            curve.com_fac(),
            table.skipped_levels().count()
        );

        table
    }

    pub fn curve(&self) -> &CompandCurve {
        &self.curve
    }

    /// Forward table, index = raw magnitude
    pub fn forward(&self) -> &[u8] {
        &self.forward
    }

    /// Reverse table, index = compressed magnitude
    pub fn reverse(&self) -> &[u16] {
        &self.reverse
    }

    /// Compressed level of a raw magnitude, `None` above 2047
    #[inline(always)]
    pub fn compress(&self, raw: u16) -> Option<u8> {
        self.forward.get(raw as usize).copied()
    }

    /// Representative raw magnitude of a compressed level
    #[inline(always)]
    pub fn representative(&self, level: u8) -> u16 {
        self.reverse[level as usize]
    }

    /// True when `raw` is the first magnitude of its compressed level
    pub fn starts_level(&self, raw: u16) -> bool {
        let raw = raw as usize;
        raw > 0 && raw < RAW_LEVELS && self.forward[raw] != self.forward[raw - 1]
    }

    /// Compressed levels that no raw magnitude maps to
    ///
    /// Their reverse entries stay at 0.
    pub fn skipped_levels(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=COMPRESSED_MAX).filter(move |&level| self.reverse[level as usize] == 0)
    }
}

impl Default for CompandTable {
    fn default() -> Self {
        Self::new(CompandCurve::default())
    }
}
