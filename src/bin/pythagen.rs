//! pythagen - accuracy of integer magnitudes at reduced bit depth
//!
//! **Usage:**
//! ```text
//! pythagen [-b <nbits>] [--json]
//! ```

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use iq_tables::render::report_json;
use iq_tables::{evaluate, PythagenConfig};

fn main() -> Result<()> {
    iq_tables::init_tracing();

    let config = PythagenConfig::parse();

    let bits = match config.bit_depth() {
        Ok(bits) => bits,
        Err(e) => {
            error!("pythagen: {}", e);
            process::exit(1);
        }
    };

    info!("Evaluating {}-bit magnitudes (shift {})", bits.bits(), bits.shift());

    let report = evaluate(bits);

    if config.json {
        let json = report_json(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        println!("{}", report);
    }

    Ok(())
}
