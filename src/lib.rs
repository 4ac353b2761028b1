//! IQ lookup tables - compand, phase and magnitude accuracy generators
//!
//! Produces the static tables a 12-bit IQ decoder uses to turn sample pairs
//! into phase without calling atan2 per sample:
//! 1. Compand |I| and |Q| from 12 bits to 8 bits on a log curve
//! 2. Build the reverse (8 bit → representative 12 bit) table
//! 3. Build the 256 × 256 phase table from the reverse table
//!
//! It also measures how far an integer `sqrt(I² + Q²)` drifts when the
//! coordinates are truncated to fewer bits.

pub mod accuracy;
pub mod compand;
pub mod config;
pub mod error;
pub mod lookup;
pub mod phase;
pub mod render;

pub use accuracy::{evaluate, AccuracyReport, BitDepth};
pub use compand::{CompandCurve, CompandTable};
pub use config::{OutputFormat, PhasegenConfig, PythagenConfig};
pub use error::ConfigError;
pub use lookup::IqPhase;
pub use phase::PhaseTable;

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging on stderr, keeping stdout free for table output
///
/// Level defaults to `info` and can be overridden through `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
