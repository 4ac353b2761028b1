//! Phase angle table indexed by compressed magnitudes
//!
//! Entry (i, j) is `atan2(reverse[i], reverse[j])`, i.e. the angle of a
//! first-quadrant sample whose compressed Q is `i` and compressed I is `j`.

use tracing::debug;

use crate::compand::{CompandTable, COMPRESSED_LEVELS};

/// Total number of angles in the table
pub const PHASE_ENTRIES: usize = COMPRESSED_LEVELS * COMPRESSED_LEVELS;

/// Pre-computed 256 × 256 angle table (radians, row-major)
///
/// Built once per run; consumers index it, never recompute it.
#[derive(Debug, Clone)]
pub struct PhaseTable {
    angles: Vec<f64>,
}

impl PhaseTable {
    /// Compute all 65536 angles from the reverse compand table
    pub fn new(compand: &CompandTable) -> Self {
        let mut angles = vec![0.0f64; PHASE_ENTRIES];

        for i in 0..COMPRESSED_LEVELS {
            let i_raw = compand.representative(i as u8) as f64;
            for j in 0..COMPRESSED_LEVELS {
                let j_raw = compand.representative(j as u8) as f64;
                // atan2(0, 0) is pinned to 0.0 rather than left to libm
                angles[i * COMPRESSED_LEVELS + j] = if i == 0 && j == 0 {
                    0.0
                } else {
                    i_raw.atan2(j_raw)
                };
            }
        }

        debug!("Phase table: {} entries", angles.len());

        Self { angles }
    }

    /// Angle for compressed magnitudes (i, j)
    #[inline(always)]
    pub fn get(&self, i: u8, j: u8) -> f64 {
        self.angles[((i as usize) << 8) | (j as usize)]
    }

    /// One row of the table (fixed `i`)
    pub fn row(&self, i: u8) -> &[f64] {
        let start = (i as usize) * COMPRESSED_LEVELS;
        &self.angles[start..start + COMPRESSED_LEVELS]
    }

    /// Iterate over rows in index order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.angles.chunks_exact(COMPRESSED_LEVELS)
    }

    /// All angles, row-major
    pub fn as_slice(&self) -> &[f64] {
        &self.angles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compand::{CompandCurve, COMPRESSED_MAX};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_origin_is_zero() {
        let table = PhaseTable::new(&CompandTable::default());
        assert_eq!(table.get(0, 0), 0.0);
    }

    #[test]
    fn test_matches_atan2_of_representatives() {
        let compand = CompandTable::default();
        let table = PhaseTable::new(&compand);
        let reverse = compand.reverse();

        for i in 0..=COMPRESSED_MAX {
            for j in 0..=COMPRESSED_MAX {
                if i == 0 && j == 0 {
                    continue;
                }
                let expected = (reverse[i as usize] as f64).atan2(reverse[j as usize] as f64);
                assert_eq!(table.get(i, j), expected, "phase[{}][{}]", i, j);
            }
        }
    }

    #[test]
    fn test_range() {
        let table = PhaseTable::new(&CompandTable::default());
        assert_eq!(table.as_slice().len(), PHASE_ENTRIES);
        assert!(table.as_slice().iter().all(|&phi| phi > -PI && phi <= PI));
    }

    #[test]
    fn test_axes_and_diagonal() {
        let table = PhaseTable::new(&CompandTable::default());

        // Pure I and pure Q
        assert_eq!(table.get(0, 5), 0.0);
        assert_eq!(table.get(5, 0), FRAC_PI_2);

        for level in 1..=COMPRESSED_MAX {
            assert!((table.get(level, level) - PI / 4.0).abs() < 1e-12);
        }

        // reverse[1] = 1, reverse[2] = 2
        assert!((table.get(1, 2) - 0.5f64.atan()).abs() < 1e-12);
    }

    #[test]
    fn test_rows() {
        let table = PhaseTable::new(&CompandTable::default());
        assert_eq!(table.rows().count(), COMPRESSED_LEVELS);
        assert_eq!(table.row(7)[9], table.get(7, 9));
        assert_eq!(table.rows().nth(255).unwrap(), table.row(255));
    }

    #[test]
    fn test_skipped_levels_use_zero_representative() {
        let compand = CompandTable::new(CompandCurve::new(10.0).unwrap());
        let level = compand.skipped_levels().next().unwrap();
        let table = PhaseTable::new(&compand);

        // A skipped row behaves like compressed magnitude 0
        assert_eq!(table.get(level, 0), 0.0);
        assert_eq!(table.get(level, 200), 0.0);
        assert_eq!(table.get(200, level), FRAC_PI_2);
    }
}
