//! Full-circle phase of a signed IQ pair through the generated tables
//!
//! Mirrors what the consuming decoder does: compress |I| and |Q|, read the
//! first-quadrant angle and add the quadrant offset.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::compand::CompandTable;
use crate::phase::PhaseTable;

/// Table-driven phase lookup for 12-bit signed samples
pub struct IqPhase<'a> {
    compand: &'a CompandTable,
    phase: &'a PhaseTable,
}

impl<'a> IqPhase<'a> {
    pub fn new(compand: &'a CompandTable, phase: &'a PhaseTable) -> Self {
        Self { compand, phase }
    }

    /// Phase of (I, Q) in [0, 2π)
    ///
    /// Returns `None` when a magnitude exceeds 2047 (only -2048 in 12-bit).
    pub fn phase(&self, i: i16, q: i16) -> Option<f64> {
        let ic = self.compand.compress(i.unsigned_abs())?;
        let qc = self.compand.compress(q.unsigned_abs())?;

        let phi = match (i < 0, q < 0) {
            (false, false) => self.phase.get(qc, ic),
            (true, false) => self.phase.get(ic, qc) + FRAC_PI_2,
            (true, true) => self.phase.get(qc, ic) + PI,
            (false, true) => self.phase.get(ic, qc) + 1.5 * PI,
        };

        // phi[c(i)][0] is π/2 when |Q| compresses to 0, which reaches 2π here
        Some(if phi >= TAU { phi - TAU } else { phi })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compand::CompandCurve;

    fn tables() -> (CompandTable, PhaseTable) {
        let compand = CompandTable::default();
        let phase = PhaseTable::new(&compand);
        (compand, phase)
    }

    #[test]
    fn test_axes() {
        let (compand, phase) = tables();
        let lookup = IqPhase::new(&compand, &phase);

        assert_eq!(lookup.phase(0, 0), Some(0.0));
        assert_eq!(lookup.phase(1000, 0), Some(0.0));
        assert_eq!(lookup.phase(0, 1000), Some(FRAC_PI_2));
        assert_eq!(lookup.phase(-1000, 0), Some(PI));
        assert_eq!(lookup.phase(0, -1000), Some(1.5 * PI));
    }

    #[test]
    fn test_exact_in_linear_region() {
        let (compand, phase) = tables();
        let lookup = IqPhase::new(&compand, &phase);

        // Magnitudes below 10 compress losslessly
        for (i, q) in [(3i16, 4i16), (-3, 4), (-3, -4), (3, -4), (7, 1)] {
            let expected = (q as f64).atan2(i as f64).rem_euclid(TAU);
            let phi = lookup.phase(i, q).unwrap();
            assert!(
                (phi - expected).abs() < 1e-12,
                "({}, {}): {} vs {}",
                i,
                q,
                phi,
                expected
            );
        }
    }

    #[test]
    fn test_tracks_atan2_across_plane() {
        let (compand, phase) = tables();
        let lookup = IqPhase::new(&compand, &phase);

        for i in (-2047i16..=2047).step_by(7) {
            for q in (-2047i16..=2047).step_by(7) {
                if i == 0 && q == 0 {
                    continue;
                }
                let phi = lookup.phase(i, q).unwrap();
                assert!((0.0..TAU).contains(&phi), "({}, {}) out of range: {}", i, q, phi);

                let expected = (q as f64).atan2(i as f64).rem_euclid(TAU);
                let diff = (phi - expected).abs();
                let err = diff.min(TAU - diff);
                assert!(err < 0.06, "({}, {}): error {} rad", i, q, err);
            }
        }
    }

    #[test]
    fn test_wraps_to_zero_when_small_q_compresses_to_zero() {
        let compand = CompandTable::new(CompandCurve::new(1000.0).unwrap());
        let phase = PhaseTable::new(&compand);
        let lookup = IqPhase::new(&compand, &phase);

        assert_eq!(compand.compress(1), Some(0));
        assert_eq!(lookup.phase(500, -1), Some(0.0));

        for i in (-2047i16..=2047).step_by(23) {
            for q in -3i16..=3 {
                let phi = lookup.phase(i, q).unwrap();
                assert!((0.0..TAU).contains(&phi), "({}, {}) out of range: {}", i, q, phi);
            }
        }
    }

    #[test]
    fn test_rejects_minus_2048() {
        let (compand, phase) = tables();
        let lookup = IqPhase::new(&compand, &phase);

        assert_eq!(lookup.phase(-2048, 0), None);
        assert_eq!(lookup.phase(0, -2048), None);
        assert!(lookup.phase(-2047, 2047).is_some());
    }
}
