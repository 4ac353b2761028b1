//! Rendering of generated tables and accuracy reports
//!
//! Tables are emitted either as C array literals (`com_tab`, `phi_tab`) for
//! inclusion in a decoder, or as a flat binary blob:
//! 2048 compand bytes followed by 65536 little-endian f32 angles.

use std::fmt;
use std::io::{self, Write};

use crate::accuracy::{AccuracyReport, Extremum};
use crate::compand::{CompandTable, COMPRESSED_LEVELS};
use crate::config::OutputFormat;
use crate::phase::{PhaseTable, PHASE_ENTRIES};

/// Size of the binary blob in bytes
pub const BINARY_LEN: usize = crate::compand::RAW_LEVELS + PHASE_ENTRIES * 4;

/// Render both tables in `format`
pub fn write_tables<W: Write>(
    out: &mut W,
    format: OutputFormat,
    compand: &CompandTable,
    phase: &PhaseTable,
) -> io::Result<()> {
    match format {
        OutputFormat::C => {
            write_compand_c(out, compand)?;
            write_phase_c(out, phase)
        }
        OutputFormat::Binary => write_binary(out, compand, phase),
    }
}

/// `int com_tab[2048]`, annotated with the raw magnitude of each entry
/// and the level it opens
pub fn write_compand_c<W: Write>(out: &mut W, compand: &CompandTable) -> io::Result<()> {
    writeln!(out, "// com_fac == {:.6}", compand.curve().com_fac())?;
    writeln!(out, "int com_tab[{}] = {{", compand.forward().len())?;
    writeln!(out, "    0,")?;

    for (raw, &level) in compand.forward().iter().enumerate().skip(1) {
        if compand.starts_level(raw as u16) {
            writeln!(out, "  {:3}, // {:4} [{}]", level, raw, level)?;
        } else {
            writeln!(out, "  {:3}, // {:4}", level, raw)?;
        }
    }

    writeln!(out, "}};")
}

/// `float phi_tab[256][256]`, one braced block per row
pub fn write_phase_c<W: Write>(out: &mut W, phase: &PhaseTable) -> io::Result<()> {
    writeln!(
        out,
        "float phi_tab[{}][{}] = {{",
        COMPRESSED_LEVELS, COMPRESSED_LEVELS
    )?;

    let last = COMPRESSED_LEVELS - 1;
    for (i, row) in phase.rows().enumerate() {
        writeln!(out, "  {{")?;
        for (j, phi) in row.iter().enumerate() {
            let sep = if j == last { "" } else { "," };
            writeln!(out, "    {:.6}{}", phi, sep)?;
        }
        writeln!(out, "{}", if i == last { "  }" } else { "  }," })?;
    }

    writeln!(out, "}};")
}

/// Compand bytes, then angles as little-endian f32, row-major
pub fn write_binary<W: Write>(
    out: &mut W,
    compand: &CompandTable,
    phase: &PhaseTable,
) -> io::Result<()> {
    out.write_all(compand.forward())?;

    let mut buf = Vec::with_capacity(PHASE_ENTRIES * 4);
    for &phi in phase.as_slice() {
        buf.extend_from_slice(&(phi as f32).to_le_bytes());
    }
    out.write_all(&buf)
}

/// Accuracy report as pretty-printed JSON
pub fn report_json(report: &AccuracyReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn fmt_extremum(f: &mut fmt::Formatter<'_>, label: &str, e: &Extremum) -> fmt::Result {
    match &e.sample {
        Some(s) => write!(
            f,
            "{} fraction {:?} pyth({},{})={} vs {}",
            label, e.ratio, s.i, s.j, s.approx, s.exact
        ),
        None => write!(f, "{} fraction {:?} (no pair deviates)", label, e.ratio),
    }
}

impl fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_extremum(f, "smallest", &self.smallest)?;
        writeln!(f)?;
        fmt_extremum(f, "largest", &self.largest)
    }
}
