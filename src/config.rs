//! Configuration loaded from the command line and environment variables

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::accuracy::{BitDepth, FULL_BITS};
use crate::compand::{CompandCurve, DEFAULT_SCALE};
use crate::error::ConfigError;

/// Output encoding for the generated tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// C array literals (`com_tab`, `phi_tab`)
    #[default]
    C,
    /// Raw compand bytes followed by little-endian f32 angles
    Binary,
}

/// Generate the compand and phase lookup tables
#[derive(Debug, Clone, Parser)]
#[command(name = "phasegen")]
pub struct PhasegenConfig {
    /// Output file (stdout if not given)
    #[arg(short = 'o', long = "output", env = "PHASEGEN_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = OutputFormat::C, env = "PHASEGEN_FORMAT")]
    pub format: OutputFormat,

    /// Compand scale constant k in ln(1 + x/k)
    #[arg(long, default_value_t = DEFAULT_SCALE, env = "PHASEGEN_SCALE")]
    pub scale: f64,
}

impl PhasegenConfig {
    /// Validated compand curve for the configured scale
    pub fn curve(&self) -> Result<CompandCurve, ConfigError> {
        CompandCurve::new(self.scale)
    }
}

/// Measure the accuracy of reduced-precision integer magnitudes
#[derive(Debug, Clone, Parser)]
#[command(name = "pythagen")]
pub struct PythagenConfig {
    /// Number of bits kept per coordinate (7 .. 12)
    #[arg(short = 'b', long = "bits", default_value_t = FULL_BITS, env = "PYTHAGEN_BITS")]
    pub bits: u32,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl PythagenConfig {
    /// Validated bit depth
    pub fn bit_depth(&self) -> Result<BitDepth, ConfigError> {
        BitDepth::new(self.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phasegen_defaults() {
        let config = PhasegenConfig::try_parse_from(["phasegen"]).unwrap();
        assert_eq!(config.output, None);
        assert_eq!(config.format, OutputFormat::C);
        assert_eq!(config.curve(), Ok(CompandCurve::default()));
    }

    #[test]
    fn test_phasegen_flags() {
        let config =
            PhasegenConfig::try_parse_from(["phasegen", "-o", "tables.h", "--format", "binary"])
                .unwrap();
        assert_eq!(config.output, Some(PathBuf::from("tables.h")));
        assert_eq!(config.format, OutputFormat::Binary);

        let config = PhasegenConfig::try_parse_from(["phasegen", "--scale=-1"]).unwrap();
        assert!(config.curve().is_err());
    }

    #[test]
    fn test_phasegen_rejects_unknown() {
        assert!(PhasegenConfig::try_parse_from(["phasegen", "-x"]).is_err());
        assert!(PhasegenConfig::try_parse_from(["phasegen", "positional"]).is_err());
        assert!(PhasegenConfig::try_parse_from(["phasegen", "-o"]).is_err());
    }

    #[test]
    fn test_pythagen_bits() {
        let config = PythagenConfig::try_parse_from(["pythagen", "-b", "7"]).unwrap();
        assert_eq!(config.bit_depth().map(|b| b.bits()), Ok(7));
        assert!(!config.json);

        let config = PythagenConfig::try_parse_from(["pythagen", "-b", "13"]).unwrap();
        assert_eq!(
            config.bit_depth(),
            Err(ConfigError::BitDepthOutOfRange { bits: 13 })
        );

        assert!(PythagenConfig::try_parse_from(["pythagen", "-b", "seven"]).is_err());
        assert!(PythagenConfig::try_parse_from(["pythagen", "-s"]).is_err());
    }

    #[test]
    fn test_pythagen_json() {
        let config = PythagenConfig::try_parse_from(["pythagen", "--json"]).unwrap();
        assert!(config.json);
    }
}
